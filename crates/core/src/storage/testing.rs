//! Scripted `TableStore` for exercising retry and polling loops.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::record::Record;
use crate::table::{TableDescription, TableSpec, TableStatus};

use super::{BatchGetOutcome, BatchWriteOutcome, Result, StoreError, TableStore};

/// A store whose batch calls withhold a scripted number of trailing items
/// and whose describe calls replay a scripted sequence of statuses.
#[derive(Default)]
pub struct ScriptedStore {
    write_withholds: Mutex<VecDeque<usize>>,
    read_withholds: Mutex<VecDeque<usize>>,
    describe_script: Mutex<VecDeque<TableStatus>>,
    write_calls: Mutex<Vec<usize>>,
    describe_calls: Mutex<usize>,
    written: Mutex<Vec<Record>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn withhold_writes(self, counts: Vec<usize>) -> Self {
        *self.write_withholds.lock().unwrap() = counts.into();
        self
    }

    pub fn withhold_reads(self, counts: Vec<usize>) -> Self {
        *self.read_withholds.lock().unwrap() = counts.into();
        self
    }

    pub fn describe_script(self, statuses: Vec<TableStatus>) -> Self {
        *self.describe_script.lock().unwrap() = statuses.into();
        self
    }

    /// Batch sizes submitted to `batch_write`, in call order.
    pub fn write_calls(&self) -> Vec<usize> {
        self.write_calls.lock().unwrap().clone()
    }

    pub fn describe_calls(&self) -> usize {
        *self.describe_calls.lock().unwrap()
    }

    /// Records accepted by `batch_write`, in acceptance order.
    pub fn written(&self) -> Vec<Record> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl TableStore for ScriptedStore {
    async fn describe_table(&self, _table_name: &str) -> Result<TableStatus> {
        *self.describe_calls.lock().unwrap() += 1;
        Ok(self
            .describe_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(TableStatus::Missing))
    }

    async fn create_table(&self, _spec: &TableSpec) -> Result<TableDescription> {
        Err(StoreError::InvalidRequest("not scripted".to_string()))
    }

    async fn put_record(&self, _table_name: &str, _record: &Record) -> Result<()> {
        Err(StoreError::InvalidRequest("not scripted".to_string()))
    }

    async fn get_record(&self, _table_name: &str, _id: &str) -> Result<Option<Record>> {
        Err(StoreError::InvalidRequest("not scripted".to_string()))
    }

    async fn batch_write(&self, _table_name: &str, records: &[Record]) -> Result<BatchWriteOutcome> {
        self.write_calls.lock().unwrap().push(records.len());
        let withhold = self
            .write_withholds
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(0)
            .min(records.len());
        let (accepted, unprocessed) = records.split_at(records.len() - withhold);
        self.written.lock().unwrap().extend_from_slice(accepted);
        Ok(BatchWriteOutcome {
            unprocessed: unprocessed.to_vec(),
        })
    }

    async fn batch_get(&self, _table_name: &str, ids: &[String]) -> Result<BatchGetOutcome> {
        let withhold = self
            .read_withholds
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(0)
            .min(ids.len());
        let (found, unprocessed) = ids.split_at(ids.len() - withhold);
        Ok(BatchGetOutcome {
            records: found.iter().map(Record::new).collect(),
            unprocessed: unprocessed.to_vec(),
        })
    }

    async fn delete_table(&self, _table_name: &str) -> Result<TableDescription> {
        Err(StoreError::InvalidRequest("not scripted".to_string()))
    }
}
