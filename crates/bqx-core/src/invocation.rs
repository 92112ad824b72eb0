//! The unit of work for one run.

use crate::error::{CoreError, CoreResult};
use chrono::NaiveDate;

/// Format accepted for `--date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Variables payload used when the caller supplies none
pub const DEFAULT_JSON_VARS: &str = "{}";

/// Raw, undecoded inputs for a single export job.
///
/// Built once from the command line and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInvocation {
    sql: String,
    destination_uri: String,
    json_vars: String,
    execution_date: NaiveDate,
}

impl JobInvocation {
    /// Create an invocation dated today with an empty variables payload
    pub fn new(sql: impl Into<String>, destination_uri: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            destination_uri: destination_uri.into(),
            json_vars: DEFAULT_JSON_VARS.to_string(),
            execution_date: today(),
        }
    }

    /// Replace the raw variables payload
    pub fn with_json_vars(mut self, json_vars: impl Into<String>) -> Self {
        self.json_vars = json_vars.into();
        self
    }

    /// Replace the execution date
    pub fn with_execution_date(mut self, date: NaiveDate) -> Self {
        self.execution_date = date;
        self
    }

    /// Raw SQL template, possibly base64-encoded
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Raw destination URI template
    pub fn destination_uri(&self) -> &str {
        &self.destination_uri
    }

    /// Raw variables payload, expected to be a JSON object
    pub fn json_vars(&self) -> &str {
        &self.json_vars
    }

    /// Date the date-derived template globals are computed from
    pub fn execution_date(&self) -> NaiveDate {
        self.execution_date
    }
}

/// The local calendar date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` execution date
pub fn parse_execution_date(value: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| CoreError::InvalidDate {
        value: value.to_string(),
    })
}

#[cfg(test)]
#[path = "invocation_test.rs"]
mod tests;
