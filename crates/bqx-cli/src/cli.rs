//! CLI argument definitions using clap derive API

use clap::{Parser, ValueEnum};

/// bqx - Run a templated BigQuery query and export its result as gzip CSV
#[derive(Parser, Debug)]
#[command(name = "bqx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQL template, plain or base64-encoded
    #[arg(long)]
    pub sql: String,

    /// Destination URI template (e.g. gs://bucket/{{ today_slash }}/out-*.csv.gz)
    #[arg(long)]
    pub destination_uri: String,

    /// Execution date the date variables derive from (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Template variables as a JSON object
    #[arg(long, default_value = "{}")]
    pub json_vars: String,

    /// Project that runs the query and extract jobs
    #[arg(long, env = "BIGQUERY_JOB_EXECUTING_PROJECT")]
    pub project: Option<String>,

    /// Dataset that holds the staging tables
    #[arg(long, env = "BIGQUERY_STAGING_DATASET")]
    pub staging_dataset: Option<String>,

    /// BigQuery job location (e.g. EU)
    #[arg(long, env = "BIGQUERY_LOCATION")]
    pub location: Option<String>,

    /// YAML config file; flags and environment override its values
    #[arg(short, long, env = "BQX_CONFIG")]
    pub config: Option<String>,

    /// Warehouse to run against
    #[arg(short, long, value_enum, env = "BQX_TARGET", default_value = "bigquery")]
    pub target: Target,

    /// DuckDB database path for the duckdb target
    #[arg(long, env = "BQX_DUCKDB_PATH", default_value = ":memory:")]
    pub duckdb_path: String,

    /// Static OAuth access token (default: metadata server)
    #[arg(long, env = "BQX_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Warehouse targets
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// BigQuery REST API
    Bigquery,
    /// Local DuckDB database, extracts to local files
    Duckdb,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
