use serde::{Deserialize, Serialize};

/// Name of the partition key attribute for exerciser tables.
pub const PARTITION_KEY: &str = "id";

/// A single item stored in an exerciser table.
///
/// `id` is the partition key. Optional fields that are `None` are left out of
/// the stored item entirely; `Some("")` and `Some(0)` are stored as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intfield: Option<i64>,
}

impl Record {
    /// Creates a record with only its key set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field1: None,
            intfield: None,
        }
    }

    /// Sets `field1`.
    pub fn with_field1(mut self, field1: impl Into<String>) -> Self {
        self.field1 = Some(field1.into());
        self
    }

    /// Sets `intfield`.
    pub fn with_intfield(mut self, intfield: i64) -> Self {
        self.intfield = Some(intfield);
        self
    }
}

/// The record written and read back by the single-item steps.
pub fn single_record() -> Record {
    Record::new("id1").with_field1("field1").with_intfield(1)
}

/// Generates `count` records for the batch write step.
///
/// Record `i` has id `batchwrite_id{100 + i}`, `field1` `batchwriteItem{i}`
/// and `intfield` `i`.
pub fn batch_records(count: u32) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new(batch_record_id(i))
                .with_field1(format!("batchwriteItem{}", i))
                .with_intfield(i64::from(i))
        })
        .collect()
}

/// Keys read back by the batch get step.
pub fn batch_get_ids() -> Vec<String> {
    vec![batch_record_id(0), batch_record_id(1)]
}

fn batch_record_id(i: u32) -> String {
    format!("batchwrite_id{}", 100 + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_record_values() {
        let record = single_record();
        assert_eq!(record.id, "id1");
        assert_eq!(record.field1.as_deref(), Some("field1"));
        assert_eq!(record.intfield, Some(1));
    }

    #[test]
    fn test_batch_records_follow_naming_scheme() {
        let records = batch_records(10);

        assert_eq!(records.len(), 10);
        assert_eq!(records[0].id, "batchwrite_id100");
        assert_eq!(records[0].field1.as_deref(), Some("batchwriteItem0"));
        assert_eq!(records[0].intfield, Some(0));
        assert_eq!(records[9].id, "batchwrite_id109");
        assert_eq!(records[9].field1.as_deref(), Some("batchwriteItem9"));
        assert_eq!(records[9].intfield, Some(9));
    }

    #[test]
    fn test_batch_get_ids_are_written_by_batch_step() {
        let written: Vec<String> = batch_records(10).into_iter().map(|r| r.id).collect();
        for id in batch_get_ids() {
            assert!(written.contains(&id));
        }
        assert_eq!(batch_get_ids(), vec!["batchwrite_id100", "batchwrite_id101"]);
    }

    #[test]
    fn test_none_fields_are_omitted_from_json() {
        let json = serde_json::to_value(Record::new("only-key")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "only-key" }));
    }

    #[test]
    fn test_empty_values_are_not_omitted() {
        let record = Record::new("k").with_field1("").with_intfield(0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "k", "field1": "", "intfield": 0 })
        );
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let record: Record = serde_json::from_value(serde_json::json!({ "id": "k" })).unwrap();
        assert_eq!(record, Record::new("k"));
    }
}
