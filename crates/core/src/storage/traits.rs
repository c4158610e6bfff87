use async_trait::async_trait;

use crate::record::Record;
use crate::table::{TableDescription, TableSpec, TableStatus};

use super::{BatchGetOutcome, BatchWriteOutcome, Result};

/// Administrative and data-plane operations against a key-value table service.
///
/// Each method is a single round trip. Retrying unprocessed batch items is
/// the caller's job (see [`crate::batch`]).
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Describes a table, reporting `Missing` only when the service says the
    /// table does not exist.
    async fn describe_table(&self, table_name: &str) -> Result<TableStatus>;

    /// Creates a table from the given spec.
    async fn create_table(&self, spec: &TableSpec) -> Result<TableDescription>;

    /// Writes a record, replacing any record with the same key.
    async fn put_record(&self, table_name: &str, record: &Record) -> Result<()>;

    /// Reads a record by key.
    async fn get_record(&self, table_name: &str, id: &str) -> Result<Option<Record>>;

    /// Submits one batch of writes.
    async fn batch_write(&self, table_name: &str, records: &[Record]) -> Result<BatchWriteOutcome>;

    /// Submits one batch of reads.
    async fn batch_get(&self, table_name: &str, ids: &[String]) -> Result<BatchGetOutcome>;

    /// Deletes a table and everything in it.
    async fn delete_table(&self, table_name: &str) -> Result<TableDescription>;
}
