//! bqx-db - Warehouse abstraction layer for bqx
//!
//! This crate provides the [`Warehouse`] trait used by the export pipeline,
//! the fixed write/extract policy types, and two implementations:
//! [`BigQueryBackend`] talking to the BigQuery REST API, and
//! [`DuckDbBackend`] for local runs against files on disk.

pub(crate) mod api;
pub mod auth;
pub mod bigquery;
pub mod duckdb;
pub mod error;
pub mod options;
pub mod traits;

#[cfg(test)]
mod test_server;

pub use auth::Credentials;
pub use bigquery::BigQueryBackend;
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use options::{Compression, DestinationFormat, ExtractOptions, WriteDisposition};
pub use traits::Warehouse;
