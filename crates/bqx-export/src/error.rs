//! Error types for bqx-export

use crate::pipeline::PipelineState;
use bqx_db::DbError;
use bqx_jinja::JinjaError;
use thiserror::Error;

/// Fatal export errors
///
/// The underlying template or warehouse error is the `source()`.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Template could not be rendered (X001)
    #[error("[X001] Template resolution failed")]
    Template(#[from] JinjaError),

    /// Staging query failed (X002)
    #[error("[X002] Staging query into {table} failed")]
    Stage { table: String, source: DbError },

    /// Extract of the staging table failed (X003)
    #[error("[X003] Extract of {table} to {destination} failed")]
    Extract {
        table: String,
        destination: String,
        source: DbError,
    },
}

impl ExportError {
    /// Last state the pipeline reached before failing
    pub fn failed_after(&self) -> PipelineState {
        match self {
            ExportError::Template(_) | ExportError::Stage { .. } => PipelineState::Start,
            ExportError::Extract { .. } => PipelineState::Staged,
        }
    }
}

/// Result type alias for ExportError
pub type ExportResult<T> = Result<T, ExportError>;
