//! Lenient decoding of raw job inputs.
//!
//! Each input has a strict `try_` decoder that reports why decoding failed
//! and a total wrapper that logs the failure and falls back to a safe value.
//! Neither wrapper ever fails the job.

use crate::error::DecodeError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Caller-supplied template variables
pub type VariableMap = serde_json::Map<String, serde_json::Value>;

/// Parse a variables payload that must be a JSON object
pub fn try_decode_variables(raw: &str) -> Result<VariableMap, DecodeError> {
    match serde_json::from_str::<serde_json::Value>(raw)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(DecodeError::NotAnObject {
            found: json_kind(&other),
        }),
    }
}

/// Parse a variables payload, falling back to no variables at all.
///
/// The result is either the whole object or empty; a malformed payload is
/// never partially applied.
pub fn decode_variables(raw: &str) -> VariableMap {
    match try_decode_variables(raw) {
        Ok(vars) => vars,
        Err(e) => {
            log::warn!(
                "could not parse the variables \"{}\" ({}). forced to empty.",
                raw,
                e
            );
            VariableMap::new()
        }
    }
}

/// Decode base64-wrapped SQL.
///
/// Line breaks are ignored so that wrapped encoder output is accepted.
pub fn try_decode_sql(raw: &str) -> Result<String, DecodeError> {
    let compact: String = raw.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    if compact.is_empty() {
        return Err(DecodeError::EmptySql);
    }
    let bytes = STANDARD.decode(compact.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// Decode SQL that may or may not be base64-wrapped.
///
/// Returns the decoded text when `raw` is base64 of UTF-8 text and `raw`
/// itself otherwise.
pub fn decode_sql(raw: &str) -> String {
    match try_decode_sql(raw) {
        Ok(sql) => {
            log::debug!("decoded base64 SQL query ({} bytes)", sql.len());
            sql
        }
        Err(e) => {
            log::info!("skipping base64 decoding of the SQL query: {}", e);
            raw.to_string()
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod tests;
