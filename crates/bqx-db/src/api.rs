//! BigQuery REST v2 request and response bodies (the subset bqx uses).

use crate::options::{ExtractOptions, WriteDisposition};
use bqx_core::StagingTableRef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TableReference {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

impl From<&StagingTableRef> for TableReference {
    fn from(table: &StagingTableRef) -> Self {
        Self {
            project_id: table.project().to_string(),
            dataset_id: table.dataset().to_string(),
            table_id: table.table().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobReference {
    pub project_id: String,
    pub job_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryConfig {
    pub query: String,
    pub use_legacy_sql: bool,
    pub destination_table: TableReference,
    pub write_disposition: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExtractConfig {
    pub source_table: TableReference,
    pub destination_uris: Vec<String>,
    pub compression: &'static str,
    pub destination_format: &'static str,
    pub field_delimiter: String,
    pub print_header: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum JobConfiguration {
    Query(QueryConfig),
    Extract(ExtractConfig),
}

/// Body of `jobs.insert`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobInsert {
    pub job_reference: JobReference,
    pub configuration: JobConfiguration,
}

impl JobInsert {
    pub fn query(
        job_reference: JobReference,
        sql: &str,
        destination: &StagingTableRef,
        disposition: WriteDisposition,
    ) -> Self {
        Self {
            job_reference,
            configuration: JobConfiguration::Query(QueryConfig {
                query: sql.to_string(),
                use_legacy_sql: false,
                destination_table: destination.into(),
                write_disposition: disposition.as_api_str(),
            }),
        }
    }

    pub fn extract(
        job_reference: JobReference,
        source: &StagingTableRef,
        destination_uri: &str,
        options: &ExtractOptions,
    ) -> Self {
        Self {
            job_reference,
            configuration: JobConfiguration::Extract(ExtractConfig {
                source_table: source.into(),
                destination_uris: vec![destination_uri.to_string()],
                compression: options.compression.as_api_str(),
                destination_format: options.format.as_api_str(),
                field_delimiter: options.field_delimiter.to_string(),
                print_header: options.print_header,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorProto {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorProto {
    pub fn describe(&self) -> String {
        match (&self.reason, &self.message) {
            (Some(reason), Some(message)) => format!("{}: {}", reason, message),
            (Some(reason), None) => reason.clone(),
            (None, Some(message)) => message.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobStatus {
    pub state: String,
    #[serde(default)]
    pub error_result: Option<ErrorProto>,
}

impl JobStatus {
    pub fn is_done(&self) -> bool {
        self.state == "DONE"
    }
}

/// Response of `jobs.insert` and `jobs.get`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobResponse {
    pub job_reference: JobReference,
    pub status: JobStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
