//! Error types for bqx-db

use thiserror::Error;

/// Warehouse operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Warehouse connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table not found: {0}")]
    TableNotFound(String),

    /// Extract error (D004)
    #[error("[D004] Extract failed: {0}")]
    ExtractError(String),

    /// Authentication error (D005)
    #[error("[D005] Authentication failed: {0}")]
    AuthError(String),

    /// Mutex poisoned (D006)
    #[error("[D006] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// HTTP transport error (D007)
    #[error("[D007] HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Warehouse API rejected a request (D008)
    #[error("[D008] Warehouse API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Warehouse job finished with an error (D009)
    #[error("[D009] Job {job_id} failed: {reason}")]
    JobFailed { job_id: String, reason: String },
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose structured variants, so the message
        // is the only thing to classify on.
        let msg = err.to_string();
        if msg.contains("Table with name")
            || msg.contains("Table or view with name")
            || (msg.contains("Catalog Error") && msg.contains("Table") && msg.contains("not found"))
        {
            DbError::TableNotFound(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
