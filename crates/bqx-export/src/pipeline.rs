//! Stage-then-extract export pipeline
//!
//! ```text
//! START -> STAGED -> EXTRACTED
//!   |        |
//!   +--------+----> FAILED
//! ```
//!
//! Each run stages into a new table from the id generator, so repeated or
//! concurrent runs never share a staging table. Staging tables are left in
//! place after the run.

use crate::error::{ExportError, ExportResult};
use bqx_core::{ExportConfig, IdGenerator, JobInvocation, StagingTableRef, UuidGenerator};
use bqx_db::{ExtractOptions, Warehouse, WriteDisposition};
use bqx_jinja::{resolve_job, ResolvedJob};
use std::fmt;
use std::time::Instant;

/// Progress of a single pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Start,
    Staged,
    Extracted,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Start => "START",
            PipelineState::Staged => "STAGED",
            PipelineState::Extracted => "EXTRACTED",
            PipelineState::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Table the query result was staged in
    pub staging_table: StagingTableRef,
    /// Location the table was extracted to
    pub destination_uri: String,
    /// Always [`PipelineState::Extracted`]
    pub state: PipelineState,
}

/// Runs resolved jobs against a warehouse
pub struct ExportPipeline<'a> {
    warehouse: &'a dyn Warehouse,
    config: &'a ExportConfig,
    ids: Box<dyn IdGenerator>,
}

impl<'a> ExportPipeline<'a> {
    /// Create a pipeline that names staging tables with random UUIDs
    pub fn new(warehouse: &'a dyn Warehouse, config: &'a ExportConfig) -> Self {
        Self {
            warehouse,
            config,
            ids: Box::new(UuidGenerator),
        }
    }

    /// Replace the staging table id generator
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// A staging reference that no other run uses
    pub fn staging_reference(&self) -> StagingTableRef {
        StagingTableRef::generate(self.config, self.ids.as_ref())
    }

    /// Write the result of `sql` to `staging`, replacing any existing contents
    pub async fn stage(&self, sql: &str, staging: &StagingTableRef) -> ExportResult<()> {
        log::info!("staging the query result in {} (temporary table)", staging);
        let start = Instant::now();
        self.warehouse
            .query_to_table(sql, staging, WriteDisposition::Truncate)
            .await
            .map_err(|e| ExportError::Stage {
                table: staging.to_string(),
                source: e,
            })?;
        log::debug!("staged {} in {}ms", staging, start.elapsed().as_millis());
        Ok(())
    }

    /// Export `staging` to `destination` as gzip-compressed CSV
    pub async fn extract(&self, staging: &StagingTableRef, destination: &str) -> ExportResult<()> {
        log::info!("extracting {} to {}", staging, destination);
        let start = Instant::now();
        self.warehouse
            .extract_table(staging, destination, &ExtractOptions::gzip_csv())
            .await
            .map_err(|e| ExportError::Extract {
                table: staging.to_string(),
                destination: destination.to_string(),
                source: e,
            })?;
        log::debug!(
            "extracted {} in {}ms",
            staging,
            start.elapsed().as_millis()
        );
        Ok(())
    }

    /// Stage `job.sql` into a fresh table, then extract it to `job.destination_uri`
    pub async fn run(&self, job: &ResolvedJob) -> ExportResult<ExportOutcome> {
        let staging = self.staging_reference();
        let mut state = PipelineState::Start;

        if let Err(e) = self.stage(&job.sql, &staging).await {
            transition(&mut state, PipelineState::Failed);
            return Err(e);
        }
        transition(&mut state, PipelineState::Staged);

        if let Err(e) = self.extract(&staging, &job.destination_uri).await {
            transition(&mut state, PipelineState::Failed);
            return Err(e);
        }
        transition(&mut state, PipelineState::Extracted);

        Ok(ExportOutcome {
            staging_table: staging,
            destination_uri: job.destination_uri.clone(),
            state,
        })
    }

    /// Warehouse type identifier for logging
    pub fn warehouse_type(&self) -> &'static str {
        self.warehouse.warehouse_type()
    }
}

fn transition(state: &mut PipelineState, next: PipelineState) {
    log::debug!("pipeline {} -> {}", state, next);
    *state = next;
}

/// Decode and render the templates of `invocation`.
///
/// Callers that connect to the warehouse themselves should resolve with this
/// first, so a template error never costs a connection.
pub fn prepare_job(invocation: &JobInvocation) -> ExportResult<ResolvedJob> {
    Ok(resolve_job(invocation)?)
}

/// Resolve the templates of `invocation` and run the result through `pipeline`.
///
/// This is the library entry point for a whole job. A template error is
/// returned before the warehouse is called.
pub async fn run_job(
    invocation: &JobInvocation,
    pipeline: &ExportPipeline<'_>,
) -> ExportResult<ExportOutcome> {
    let job = prepare_job(invocation)?;
    pipeline.run(&job).await
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
