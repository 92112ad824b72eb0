//! Process-wide export configuration.
//!
//! Built once at startup (from CLI flags, environment, or a YAML file) and
//! passed by reference into the export pipeline and warehouse backends.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default BigQuery REST endpoint
pub const DEFAULT_BIGQUERY_API_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Default interval between job status polls
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Configuration shared by every warehouse call in a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Project that runs (and is billed for) the query and extract jobs
    pub execution_project: String,

    /// Dataset that holds the staging tables
    pub staging_dataset: String,

    /// Optional job location (e.g. "EU", "us-central1")
    #[serde(default)]
    pub location: Option<String>,

    /// Base URL of the BigQuery REST API
    #[serde(default = "default_bigquery_api_url")]
    pub bigquery_api_url: String,

    /// Milliseconds to wait between job status polls
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_bigquery_api_url() -> String {
    DEFAULT_BIGQUERY_API_URL.to_string()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl ExportConfig {
    /// Create a configuration with default API URL and poll interval
    pub fn new(execution_project: impl Into<String>, staging_dataset: impl Into<String>) -> Self {
        Self {
            execution_project: execution_project.into(),
            staging_dataset: staging_dataset.into(),
            location: None,
            bigquery_api_url: default_bigquery_api_url(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }

    /// Set the job location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Load and validate configuration from a YAML file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: ExportConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded export config from {}", path.display());
        Ok(config)
    }

    /// Check that the staging table reference built from this config is well-formed
    pub fn validate(&self) -> CoreResult<()> {
        if self.execution_project.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "execution_project cannot be empty".to_string(),
            });
        }

        // Domain-scoped ids like "example.com:analytics" are valid projects
        if self.execution_project.chars().any(char::is_whitespace) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "execution_project '{}' must not contain whitespace",
                    self.execution_project
                ),
            });
        }

        if self.staging_dataset.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "staging_dataset cannot be empty".to_string(),
            });
        }

        // Dataset ids are restricted to letters, digits and underscores
        if !self
            .staging_dataset
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "staging_dataset '{}' may only contain letters, digits and underscores",
                    self.staging_dataset
                ),
            });
        }

        if self.poll_interval_ms == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "poll_interval_ms must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
