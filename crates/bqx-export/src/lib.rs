//! bqx-export - Export pipeline for bqx
//!
//! This crate runs a resolved job against a [`bqx_db::Warehouse`]: the query
//! is staged into a freshly named table, then that table is extracted to the
//! destination as gzip-compressed CSV.

pub mod error;
pub mod pipeline;

pub use error::{ExportError, ExportResult};
pub use pipeline::{prepare_job, run_job, ExportOutcome, ExportPipeline, PipelineState};
