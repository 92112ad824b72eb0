//! Runtime context for a bqx run

use anyhow::{bail, Context, Result};
use bqx_core::{parse_execution_date, ExportConfig, JobInvocation};
use bqx_db::{BigQueryBackend, Credentials, DuckDbBackend, Warehouse};
use std::path::Path;
use std::sync::Arc;

use crate::cli::{Cli, Target};

/// Configuration and warehouse connection for one invocation
pub struct RuntimeContext {
    /// Validated export configuration
    pub config: ExportConfig,

    /// Warehouse the pipeline runs against
    pub warehouse: Arc<dyn Warehouse>,
}

impl RuntimeContext {
    /// Build the configuration and connect to the selected warehouse
    pub async fn new(args: &Cli) -> Result<Self> {
        let config = export_config(args)?;

        let warehouse: Arc<dyn Warehouse> = match args.target {
            Target::Bigquery => {
                let credentials = Credentials::from_token(args.access_token.clone());
                log::debug!("authenticating with {:?}", credentials);
                Arc::new(
                    BigQueryBackend::connect(&config, &credentials)
                        .await
                        .context("Failed to connect to BigQuery")?,
                )
            }
            Target::Duckdb => Arc::new(
                DuckDbBackend::new(&args.duckdb_path).context("Failed to open DuckDB database")?,
            ),
        };

        Ok(Self { config, warehouse })
    }
}

/// Merge the optional config file with flag and environment values
pub fn export_config(args: &Cli) -> Result<ExportConfig> {
    let file = match &args.config {
        Some(path) => Some(
            ExportConfig::load(Path::new(path)).context("Failed to load configuration file")?,
        ),
        None => None,
    };

    let project = args
        .project
        .clone()
        .or_else(|| file.as_ref().map(|c| c.execution_project.clone()));
    let dataset = args
        .staging_dataset
        .clone()
        .or_else(|| file.as_ref().map(|c| c.staging_dataset.clone()));

    let (Some(project), Some(dataset)) = (project, dataset) else {
        bail!(
            "Missing execution project or staging dataset: set --project/BIGQUERY_JOB_EXECUTING_PROJECT \
             and --staging-dataset/BIGQUERY_STAGING_DATASET, or provide them in --config"
        );
    };

    let mut config = match file {
        Some(file) => ExportConfig {
            execution_project: project,
            staging_dataset: dataset,
            ..file
        },
        None => ExportConfig::new(project, dataset),
    };
    if let Some(location) = &args.location {
        config.location = Some(location.clone());
    }

    config.validate().context("Invalid export configuration")?;
    Ok(config)
}

/// Raw job inputs from the command line
pub fn job_invocation(args: &Cli) -> Result<JobInvocation> {
    let mut invocation = JobInvocation::new(args.sql.as_str(), args.destination_uri.as_str())
        .with_json_vars(args.json_vars.as_str());
    if let Some(date) = &args.date {
        invocation = invocation.with_execution_date(parse_execution_date(date)?);
    }
    Ok(invocation)
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
