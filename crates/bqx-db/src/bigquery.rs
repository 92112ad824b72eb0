//! BigQuery backend over the REST v2 API
//!
//! Jobs are inserted with a client-generated id and then polled with
//! `jobs.get` until they reach the `DONE` state. Nothing is retried.

use crate::api::{ApiErrorBody, JobInsert, JobReference, JobResponse};
use crate::auth::Credentials;
use crate::error::{DbError, DbResult};
use crate::options::{ExtractOptions, WriteDisposition};
use crate::traits::Warehouse;
use async_trait::async_trait;
use bqx_core::{ExportConfig, StagingTableRef};
use std::time::Duration;

/// BigQuery warehouse backend
pub struct BigQueryBackend {
    http: reqwest::Client,
    token: String,
    api_url: String,
    project: String,
    location: Option<String>,
    poll_interval: Duration,
}

impl BigQueryBackend {
    /// Authenticate and create a client billed to the configured execution project
    pub async fn connect(config: &ExportConfig, credentials: &Credentials) -> DbResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("bqx/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        let token = credentials.access_token(&http).await?;
        Ok(Self::with_client(config, http, token))
    }

    /// Create a client from an existing HTTP client and bearer token
    pub fn with_client(config: &ExportConfig, http: reqwest::Client, token: String) -> Self {
        Self {
            http,
            token,
            api_url: config.bigquery_api_url.trim_end_matches('/').to_string(),
            project: config.execution_project.clone(),
            location: config.location.clone(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    fn jobs_url(&self) -> String {
        format!("{}/projects/{}/jobs", self.api_url, self.project)
    }

    fn job_url(&self, job_id: &str) -> String {
        format!("{}/{}", self.jobs_url(), job_id)
    }

    fn new_job_reference(&self) -> JobReference {
        JobReference {
            project_id: self.project.clone(),
            job_id: new_job_id(),
            location: self.location.clone(),
        }
    }

    /// Insert a job and wait for it to finish
    async fn run_job(&self, job: &JobInsert) -> DbResult<()> {
        let job_id = job.job_reference.job_id.clone();
        log::debug!("inserting BigQuery job {}", job_id);

        let response = self
            .http
            .post(self.jobs_url())
            .bearer_auth(&self.token)
            .json(job)
            .send()
            .await?;
        let mut state = parse_job_response(response).await?;

        // jobs.get needs the location BigQuery actually picked
        let location = state
            .job_reference
            .location
            .clone()
            .or_else(|| self.location.clone());

        while !state.status.is_done() {
            log::debug!("job {} is {}", job_id, state.status.state);
            tokio::time::sleep(self.poll_interval).await;

            let mut request = self.http.get(self.job_url(&job_id)).bearer_auth(&self.token);
            if let Some(location) = &location {
                request = request.query(&[("location", location)]);
            }
            state = parse_job_response(request.send().await?).await?;
        }

        check_job_result(&job_id, &state)
    }
}

#[async_trait]
impl Warehouse for BigQueryBackend {
    async fn query_to_table(
        &self,
        sql: &str,
        destination: &StagingTableRef,
        disposition: WriteDisposition,
    ) -> DbResult<()> {
        let job = JobInsert::query(self.new_job_reference(), sql, destination, disposition);
        self.run_job(&job).await
    }

    async fn extract_table(
        &self,
        source: &StagingTableRef,
        destination_uri: &str,
        options: &ExtractOptions,
    ) -> DbResult<()> {
        let job = JobInsert::extract(self.new_job_reference(), source, destination_uri, options);
        self.run_job(&job).await
    }

    fn warehouse_type(&self) -> &'static str {
        "bigquery"
    }
}

fn new_job_id() -> String {
    format!("bqx_{}", uuid::Uuid::new_v4().simple())
}

async fn parse_job_response(response: reqwest::Response) -> DbResult<JobResponse> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DbError::ApiError {
            status: status.as_u16(),
            message: api_error_message(&body),
        });
    }
    Ok(response.json::<JobResponse>().await?)
}

/// Pull the human-readable message out of a Google API error body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.to_string())
}

fn check_job_result(job_id: &str, state: &JobResponse) -> DbResult<()> {
    match &state.status.error_result {
        None => Ok(()),
        Some(error) if error.reason.as_deref() == Some("notFound") => {
            Err(DbError::TableNotFound(error.describe()))
        }
        Some(error) => Err(DbError::JobFailed {
            job_id: job_id.to_string(),
            reason: error.describe(),
        }),
    }
}

#[cfg(test)]
#[path = "bigquery_test.rs"]
mod tests;
