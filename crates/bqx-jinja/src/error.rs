//! Error types for bqx-jinja

use thiserror::Error;

/// Jinja templating errors
#[derive(Error, Debug)]
pub enum JinjaError {
    /// Template render error (J001)
    #[error("[J001] Jinja render error: {0}")]
    RenderError(String),
}

/// Result type alias for JinjaError
pub type JinjaResult<T> = Result<T, JinjaError>;

impl From<minijinja::Error> for JinjaError {
    fn from(err: minijinja::Error) -> Self {
        JinjaError::RenderError(err.to_string())
    }
}

/// Reasons a raw job input could not be decoded.
///
/// These are never fatal: the lenient decoders log them and fall back.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Variables payload is not JSON (J101)
    #[error("[J101] Variables payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Variables payload is JSON but not an object (J102)
    #[error("[J102] Variables payload must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// SQL is empty after stripping line breaks (J103)
    #[error("[J103] SQL is empty")]
    EmptySql,

    /// SQL is not base64 (J104)
    #[error("[J104] SQL is not base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// Base64 payload does not decode to UTF-8 text (J105)
    #[error("[J105] Decoded SQL is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
