//! DynamoDB table store implementation.
//!
//! Implements `exerciser_core::storage::TableStore` using DynamoDB. Every
//! method is one API call; raw SDK responses are logged at `debug`.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, KeysAndAttributes, ProvisionedThroughput,
    PutRequest, ScalarAttributeType, WriteRequest,
};
use aws_sdk_dynamodb::Client;

use exerciser_core::record::{Record, PARTITION_KEY};
use exerciser_core::storage::{BatchGetOutcome, BatchWriteOutcome, Result, StoreError, TableStore};
use exerciser_core::table::{AttributeType, TableDescription, TableSpec, TableState, TableStatus};

use super::conversions::{
    item_to_record, key_for, record_to_item, table_description_from_sdk, unprocessed_ids,
    unprocessed_records,
};
use super::error::{classify_describe_error, map_build_error, map_sdk_error};

/// DynamoDB-backed table store.
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableStore for DynamoDbStore {
    async fn describe_table(&self, table_name: &str) -> Result<TableStatus> {
        match self.client.describe_table().table_name(table_name).send().await {
            Ok(output) => {
                tracing::debug!(?output, "DescribeTable response");
                let table = output.table().ok_or_else(|| StoreError::Service {
                    operation: "DescribeTable",
                    code: "EmptyResponse".to_string(),
                    message: "response did not include a table description".to_string(),
                })?;
                Ok(TableStatus::Exists(table_description_from_sdk(table)))
            }
            Err(err) => classify_describe_error(err, table_name),
        }
    }

    async fn create_table(&self, spec: &TableSpec) -> Result<TableDescription> {
        let key = &spec.partition_key;

        let output = self
            .client
            .create_table()
            .table_name(&spec.table_name)
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name(&key.name)
                    .key_type(KeyType::Hash)
                    .build()
                    .map_err(map_build_error)?,
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(&key.name)
                    .attribute_type(to_scalar_type(&key.attribute_type))
                    .build()
                    .map_err(map_build_error)?,
            )
            .provisioned_throughput(
                ProvisionedThroughput::builder()
                    .read_capacity_units(spec.throughput.read_capacity_units)
                    .write_capacity_units(spec.throughput.write_capacity_units)
                    .build()
                    .map_err(map_build_error)?,
            )
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "CreateTable", &spec.table_name))?;

        tracing::debug!(?output, "CreateTable response");

        Ok(output
            .table_description()
            .map(table_description_from_sdk)
            .unwrap_or_else(|| TableDescription {
                table_name: spec.table_name.clone(),
                state: TableState::Creating,
                key_schema: vec![key.name.clone()],
                throughput: Some(spec.throughput),
                item_count: None,
            }))
    }

    async fn put_record(&self, table_name: &str, record: &Record) -> Result<()> {
        let item = record_to_item(record)?;

        let output = self
            .client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "PutItem", table_name))?;

        tracing::debug!(?output, "PutItem response");
        Ok(())
    }

    async fn get_record(&self, table_name: &str, id: &str) -> Result<Option<Record>> {
        let output = self
            .client
            .get_item()
            .table_name(table_name)
            .set_key(Some(key_for(id)))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "GetItem", table_name))?;

        tracing::debug!(?output, "GetItem response");

        match output.item {
            Some(item) => Ok(Some(item_to_record(&item)?)),
            None => Ok(None),
        }
    }

    async fn batch_write(&self, table_name: &str, records: &[Record]) -> Result<BatchWriteOutcome> {
        let write_requests = records
            .iter()
            .map(|record| {
                let put = PutRequest::builder()
                    .set_item(Some(record_to_item(record)?))
                    .build()
                    .map_err(map_build_error)?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        let output = self
            .client
            .batch_write_item()
            .request_items(table_name, write_requests)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "BatchWriteItem", table_name))?;

        tracing::debug!(?output, "BatchWriteItem response");

        let unprocessed = unprocessed_records(output, table_name)?;

        Ok(BatchWriteOutcome { unprocessed })
    }

    async fn batch_get(&self, table_name: &str, ids: &[String]) -> Result<BatchGetOutcome> {
        let keys = KeysAndAttributes::builder()
            .set_keys(Some(ids.iter().map(|id| key_for(id)).collect()))
            .build()
            .map_err(map_build_error)?;

        let output = self
            .client
            .batch_get_item()
            .request_items(table_name, keys)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "BatchGetItem", table_name))?;

        tracing::debug!(?output, "BatchGetItem response");

        let unprocessed = unprocessed_ids(&output, table_name);
        let records = output
            .responses
            .unwrap_or_default()
            .remove(table_name)
            .unwrap_or_default()
            .iter()
            .map(|item| item_to_record(item).map_err(StoreError::from))
            .collect::<Result<Vec<_>>>()?;

        Ok(BatchGetOutcome {
            records,
            unprocessed,
        })
    }

    async fn delete_table(&self, table_name: &str) -> Result<TableDescription> {
        let output = self
            .client
            .delete_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "DeleteTable", table_name))?;

        tracing::debug!(?output, "DeleteTable response");

        Ok(output
            .table_description()
            .map(table_description_from_sdk)
            .unwrap_or_else(|| TableDescription {
                table_name: table_name.to_string(),
                state: TableState::Deleting,
                key_schema: vec![PARTITION_KEY.to_string()],
                throughput: None,
                item_count: None,
            }))
    }
}

fn to_scalar_type(attr_type: &AttributeType) -> ScalarAttributeType {
    match attr_type {
        AttributeType::String => ScalarAttributeType::S,
    }
}
