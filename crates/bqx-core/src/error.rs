//! Error types for bqx-core

use thiserror::Error;

/// Core error type for bqx
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Execution date is not a `YYYY-MM-DD` calendar date
    #[error("[E004] Invalid execution date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// E005: IO error with file path context
    #[error("[E005] IO error on {path}: {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
