//! Warehouse trait definition

use crate::error::DbResult;
use crate::options::{ExtractOptions, WriteDisposition};
use async_trait::async_trait;
use bqx_core::StagingTableRef;

/// Warehouse abstraction trait for bqx
///
/// Both operations return only once the warehouse reports the job finished.
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Run `sql` and write its result set to `destination`
    async fn query_to_table(
        &self,
        sql: &str,
        destination: &StagingTableRef,
        disposition: WriteDisposition,
    ) -> DbResult<()>;

    /// Export the contents of `source` to `destination_uri`
    async fn extract_table(
        &self,
        source: &StagingTableRef,
        destination_uri: &str,
        options: &ExtractOptions,
    ) -> DbResult<()>;

    /// Warehouse type identifier for logging
    fn warehouse_type(&self) -> &'static str;
}
