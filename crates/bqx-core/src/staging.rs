//! Staging table naming.
//!
//! Every pipeline run writes its query result to a brand new table named
//! `<execution_project>.<staging_dataset>.<id>`. The id comes from an
//! [`IdGenerator`] so tests can substitute deterministic values. Staging
//! tables are never dropped here; retention is left to the dataset's
//! default table expiration.

use crate::config::ExportConfig;
use std::fmt;

/// Source of unique staging table identifiers
pub trait IdGenerator: Send + Sync {
    /// Return an identifier that has never been returned before
    fn next_id(&self) -> String;
}

/// Random UUID v4 identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Fully qualified three-part staging table name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StagingTableRef {
    project: String,
    dataset: String,
    table: String,
}

impl StagingTableRef {
    /// Create a reference from its three parts
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            dataset: dataset.into(),
            table: table.into(),
        }
    }

    /// Build a fresh reference in the configured staging dataset
    pub fn generate(config: &ExportConfig, ids: &dyn IdGenerator) -> Self {
        Self::new(
            config.execution_project.as_str(),
            config.staging_dataset.as_str(),
            ids.next_id(),
        )
    }

    /// Project part
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Dataset part
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Table id part
    pub fn table(&self) -> &str {
        &self.table
    }
}

impl fmt::Display for StagingTableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project, self.dataset, self.table)
    }
}

#[cfg(test)]
#[path = "staging_test.rs"]
mod tests;
