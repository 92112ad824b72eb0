//! OAuth access tokens for the BigQuery REST API

use crate::error::{DbError, DbResult};
use serde::Deserialize;

/// Token endpoint of the GCE/GKE/Cloud Run metadata server
pub const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Where the bearer token for API calls comes from
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A token obtained out of band (e.g. `gcloud auth print-access-token`)
    AccessToken(String),
    /// The default service account of the machine the job runs on
    MetadataServer,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
            Credentials::MetadataServer => f.write_str("MetadataServer"),
        }
    }
}

impl Credentials {
    /// Use `token` when given, the metadata server otherwise
    pub fn from_token(token: Option<String>) -> Self {
        match token {
            Some(t) if !t.trim().is_empty() => Credentials::AccessToken(t.trim().to_string()),
            _ => Credentials::MetadataServer,
        }
    }

    /// Resolve to a bearer token
    pub async fn access_token(&self, http: &reqwest::Client) -> DbResult<String> {
        match self {
            Credentials::AccessToken(token) => Ok(token.clone()),
            Credentials::MetadataServer => fetch_metadata_token(http, METADATA_TOKEN_URL).await,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
}

async fn fetch_metadata_token(http: &reqwest::Client, url: &str) -> DbResult<String> {
    log::debug!("requesting access token from metadata server");
    let response = http
        .get(url)
        .header("Metadata-Flavor", "Google")
        .send()
        .await
        .map_err(|e| DbError::AuthError(format!("metadata server unreachable: {}", e)))?;

    if !response.status().is_success() {
        return Err(DbError::AuthError(format!(
            "metadata server returned {}",
            response.status()
        )));
    }

    let token: MetadataToken = response
        .json()
        .await
        .map_err(|e| DbError::AuthError(format!("invalid metadata token response: {}", e)))?;
    Ok(token.access_token)
}
