//! In-memory table store implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use exerciser_core::record::Record;
use exerciser_core::storage::{BatchGetOutcome, BatchWriteOutcome, Result, StoreError, TableStore};
use exerciser_core::table::{TableDescription, TableSpec, TableState, TableStatus};

#[derive(Debug, Clone)]
struct Table {
    spec: TableSpec,
    records: BTreeMap<String, Record>,
}

impl Table {
    fn describe(&self, state: TableState) -> TableDescription {
        TableDescription {
            table_name: self.spec.table_name.clone(),
            state,
            key_schema: vec![self.spec.partition_key.name.clone()],
            throughput: Some(self.spec.throughput),
            item_count: Some(self.records.len() as i64),
        }
    }
}

/// In-memory table store.
///
/// Tables become active as soon as they are created and every batch call is
/// processed in full. Data is lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(table_name: &str) -> StoreError {
    StoreError::TableNotFound {
        table_name: table_name.to_string(),
    }
}

#[async_trait]
impl TableStore for InMemoryStore {
    async fn describe_table(&self, table_name: &str) -> Result<TableStatus> {
        let tables = self.tables.read().await;
        Ok(match tables.get(table_name) {
            Some(table) => TableStatus::Exists(table.describe(TableState::Active)),
            None => TableStatus::Missing,
        })
    }

    async fn create_table(&self, spec: &TableSpec) -> Result<TableDescription> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(&spec.table_name) {
            return Err(StoreError::Service {
                operation: "CreateTable",
                code: "ResourceInUseException".to_string(),
                message: format!("Table already exists: {}", spec.table_name),
            });
        }

        let table = Table {
            spec: spec.clone(),
            records: BTreeMap::new(),
        };
        let description = table.describe(TableState::Active);
        tables.insert(spec.table_name.clone(), table);
        Ok(description)
    }

    async fn put_record(&self, table_name: &str, record: &Record) -> Result<()> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| not_found(table_name))?;
        table.records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get_record(&self, table_name: &str, id: &str) -> Result<Option<Record>> {
        let tables = self.tables.read().await;
        let table = tables.get(table_name).ok_or_else(|| not_found(table_name))?;
        Ok(table.records.get(id).cloned())
    }

    async fn batch_write(&self, table_name: &str, records: &[Record]) -> Result<BatchWriteOutcome> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| not_found(table_name))?;
        for record in records {
            table.records.insert(record.id.clone(), record.clone());
        }
        Ok(BatchWriteOutcome::default())
    }

    async fn batch_get(&self, table_name: &str, ids: &[String]) -> Result<BatchGetOutcome> {
        let tables = self.tables.read().await;
        let table = tables.get(table_name).ok_or_else(|| not_found(table_name))?;
        Ok(BatchGetOutcome {
            records: ids
                .iter()
                .filter_map(|id| table.records.get(id).cloned())
                .collect(),
            unprocessed: Vec::new(),
        })
    }

    async fn delete_table(&self, table_name: &str) -> Result<TableDescription> {
        let mut tables = self.tables.write().await;
        let table = tables
            .remove(table_name)
            .ok_or_else(|| not_found(table_name))?;
        Ok(table.describe(TableState::Deleting))
    }
}
