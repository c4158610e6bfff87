//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.
//!
//! Records go through `serde_json::Value` on the way in and out, so any
//! `Serialize` type with an object shape can be stored.

use std::collections::HashMap;

use aws_sdk_dynamodb::operation::batch_get_item::BatchGetItemOutput;
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemOutput;
use aws_sdk_dynamodb::types::{AttributeValue, TableDescription as SdkTableDescription};
use exerciser_core::record::{Record, PARTITION_KEY};
use exerciser_core::storage::ConversionError;
use exerciser_core::table::{TableDescription, TableState, Throughput};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A DynamoDB item: attribute name to typed value.
pub type Item = HashMap<String, AttributeValue>;

// ============================================================================
// Generic conversions
// ============================================================================

/// Convert any object-shaped `Serialize` value into a DynamoDB item.
pub fn to_item<T: Serialize>(value: &T) -> Result<Item, ConversionError> {
    match serde_json::to_value(value).map_err(|e| ConversionError::Serialize(e.to_string()))? {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(name, value)| (name, value_to_attribute(value)))
            .collect()),
        other => Err(ConversionError::NotAnObject(json_kind(&other))),
    }
}

/// Convert a DynamoDB item into any `DeserializeOwned` value.
pub fn from_item<T: DeserializeOwned>(item: &Item) -> Result<T, ConversionError> {
    let mut map = serde_json::Map::with_capacity(item.len());
    for (name, attribute) in item {
        map.insert(name.clone(), attribute_to_value(name, attribute)?);
    }
    serde_json::from_value(Value::Object(map))
        .map_err(|e| ConversionError::Deserialize(e.to_string()))
}

fn value_to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(a) => AttributeValue::L(a.into_iter().map(value_to_attribute).collect()),
        Value::Object(o) => AttributeValue::M(
            o.into_iter()
                .map(|(k, v)| (k, value_to_attribute(v)))
                .collect(),
        ),
    }
}

fn attribute_to_value(name: &str, attribute: &AttributeValue) -> Result<Value, ConversionError> {
    match attribute {
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => parse_number(name, n),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(list) => list
            .iter()
            .map(|v| attribute_to_value(name, v))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(map) => map
            .iter()
            .map(|(k, v)| Ok((k.clone(), attribute_to_value(k, v)?)))
            .collect::<Result<serde_json::Map<_, _>, _>>()
            .map(Value::Object),
        AttributeValue::Ss(set) => Ok(Value::Array(
            set.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(set) => set
            .iter()
            .map(|n| parse_number(name, n))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::B(_) => Err(unsupported(name, "B")),
        AttributeValue::Bs(_) => Err(unsupported(name, "BS")),
        _ => Err(unsupported(name, "unknown")),
    }
}

/// DynamoDB numbers travel as strings; integers stay integers.
fn parse_number(name: &str, n: &str) -> Result<Value, ConversionError> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Value::from(i));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Value::from(u));
    }
    n.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| ConversionError::InvalidNumber {
            attribute: name.to_string(),
            value: n.to_string(),
        })
}

fn unsupported(name: &str, kind: &'static str) -> ConversionError {
    ConversionError::UnsupportedAttribute {
        attribute: name.to_string(),
        kind,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Record conversions
// ============================================================================

/// Convert a Record to DynamoDB item.
pub fn record_to_item(record: &Record) -> Result<Item, ConversionError> {
    to_item(record)
}

/// Convert a DynamoDB item to Record.
pub fn item_to_record(item: &Item) -> Result<Record, ConversionError> {
    from_item(item)
}

/// Primary key item for a record id.
pub fn key_for(id: &str) -> Item {
    HashMap::from([(
        PARTITION_KEY.to_string(),
        AttributeValue::S(id.to_string()),
    )])
}

/// Extract the record id from a primary key item.
pub fn id_from_key(key: &Item) -> Option<String> {
    key.get(PARTITION_KEY)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Records the service handed back unwritten for `table_name`.
///
/// Only put requests are sent, so delete requests are ignored.
pub fn unprocessed_records(
    output: BatchWriteItemOutput,
    table_name: &str,
) -> Result<Vec<Record>, ConversionError> {
    output
        .unprocessed_items
        .unwrap_or_default()
        .remove(table_name)
        .unwrap_or_default()
        .iter()
        .filter_map(|request| request.put_request())
        .map(|put| item_to_record(put.item()))
        .collect()
}

/// Ids whose keys the service left unread for `table_name`.
pub fn unprocessed_ids(output: &BatchGetItemOutput, table_name: &str) -> Vec<String> {
    output
        .unprocessed_keys()
        .and_then(|pending| pending.get(table_name))
        .map(|pending| pending.keys().iter().filter_map(id_from_key).collect())
        .unwrap_or_default()
}

// ============================================================================
// Table metadata conversions
// ============================================================================

/// Convert the SDK's table description into the domain description.
pub fn table_description_from_sdk(table: &SdkTableDescription) -> TableDescription {
    use aws_sdk_dynamodb::types::TableStatus as SdkTableStatus;

    let state = match table.table_status() {
        Some(SdkTableStatus::Active) => TableState::Active,
        Some(SdkTableStatus::Creating) => TableState::Creating,
        Some(SdkTableStatus::Updating) => TableState::Updating,
        Some(SdkTableStatus::Deleting) => TableState::Deleting,
        Some(other) => TableState::Other(other.as_str().to_string()),
        None => TableState::Other("UNKNOWN".to_string()),
    };

    let throughput = table.provisioned_throughput().and_then(|pt| {
        Some(Throughput {
            read_capacity_units: pt.read_capacity_units()?,
            write_capacity_units: pt.write_capacity_units()?,
        })
    });

    TableDescription {
        table_name: table.table_name().unwrap_or_default().to_string(),
        state,
        key_schema: table
            .key_schema()
            .iter()
            .map(|k| k.attribute_name().to_string())
            .collect(),
        throughput,
        item_count: table.item_count(),
    }
}
