//! DuckDB warehouse backend implementation
//!
//! Stands in for BigQuery in local runs and tests. The staging dataset maps
//! to a DuckDB schema; the project part of a staging reference is ignored.
//! Extracts are written with `COPY ... TO` to local paths.

use crate::error::{DbError, DbResult};
use crate::options::{Compression, DestinationFormat, ExtractOptions, WriteDisposition};
use crate::traits::Warehouse;
use async_trait::async_trait;
use bqx_core::StagingTableRef;
use duckdb::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// File name BigQuery gives the first shard of a wildcard extract
const FIRST_SHARD: &str = "000000000000";

/// DuckDB warehouse backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute batch SQL synchronously
    #[cfg(test)]
    pub(crate) fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql).map_err(DbError::from)
    }

    /// Count the rows returned by a query
    #[cfg(test)]
    pub(crate) fn query_count(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM ({})", sql), [], |row| {
                row.get(0)
            })
            .map_err(DbError::from)?;
        Ok(count as usize)
    }

    /// Count the rows of a staging table
    #[cfg(test)]
    pub(crate) fn table_row_count(&self, table: &StagingTableRef) -> DbResult<usize> {
        self.query_count(&format!("SELECT * FROM {}", qualified_name(table)))
    }

    /// Materialize a query result synchronously
    fn query_to_table_sync(
        &self,
        sql: &str,
        destination: &StagingTableRef,
        disposition: WriteDisposition,
    ) -> DbResult<()> {
        let name = qualified_name(destination);
        let select = strip_trailing_semicolons(sql);
        let statement = match disposition {
            WriteDisposition::Truncate => {
                format!("CREATE OR REPLACE TABLE {} AS {}", name, select)
            }
        };

        let conn = self.lock()?;
        conn.execute_batch(&format!(
            "CREATE SCHEMA IF NOT EXISTS {};",
            quote_ident(destination.dataset())
        ))
        .map_err(DbError::from)?;
        conn.execute_batch(&statement)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, select)))
    }

    /// Copy a table to a local file synchronously
    fn extract_table_sync(
        &self,
        source: &StagingTableRef,
        destination_uri: &str,
        options: &ExtractOptions,
    ) -> DbResult<()> {
        let path = local_path(destination_uri);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DbError::ExtractError(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let statement = copy_statement(source, &path, options);
        let conn = self.lock()?;
        conn.execute_batch(&statement).map_err(|e| match DbError::from(e) {
            DbError::TableNotFound(msg) => DbError::TableNotFound(msg),
            other => DbError::ExtractError(other.to_string()),
        })
    }
}

#[async_trait]
impl Warehouse for DuckDbBackend {
    async fn query_to_table(
        &self,
        sql: &str,
        destination: &StagingTableRef,
        disposition: WriteDisposition,
    ) -> DbResult<()> {
        self.query_to_table_sync(sql, destination, disposition)
    }

    async fn extract_table(
        &self,
        source: &StagingTableRef,
        destination_uri: &str,
        options: &ExtractOptions,
    ) -> DbResult<()> {
        self.extract_table_sync(source, destination_uri, options)
    }

    fn warehouse_type(&self) -> &'static str {
        "duckdb"
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `"dataset"."table"`
fn qualified_name(table: &StagingTableRef) -> String {
    format!(
        "{}.{}",
        quote_ident(table.dataset()),
        quote_ident(table.table())
    )
}

fn strip_trailing_semicolons(sql: &str) -> &str {
    sql.trim().trim_end_matches(';').trim_end()
}

/// Map a destination URI onto the local filesystem
fn local_path(destination_uri: &str) -> PathBuf {
    let path = destination_uri
        .strip_prefix("file://")
        .unwrap_or(destination_uri);
    PathBuf::from(path.replacen('*', FIRST_SHARD, 1))
}

fn copy_statement(source: &StagingTableRef, path: &Path, options: &ExtractOptions) -> String {
    let format = match options.format {
        DestinationFormat::Csv => "CSV",
    };
    let compression = match options.compression {
        Compression::Gzip => "gzip",
    };
    format!(
        "COPY {} TO {} (FORMAT {}, DELIMITER {}, HEADER {}, COMPRESSION {})",
        qualified_name(source),
        quote_literal(&path.to_string_lossy()),
        format,
        quote_literal(&options.field_delimiter.to_string()),
        options.print_header,
        compression
    )
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
