use serde::Serialize;

use super::Throughput;

/// Outcome of describing a table.
///
/// Describe failures other than "resource not found" are errors, never
/// `Missing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "table")]
pub enum TableStatus {
    Missing,
    Exists(TableDescription),
}

impl TableStatus {
    /// Returns the description when the table exists.
    pub fn description(&self) -> Option<&TableDescription> {
        match self {
            TableStatus::Missing => None,
            TableStatus::Exists(description) => Some(description),
        }
    }
}

/// Table metadata as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDescription {
    pub table_name: String,
    pub state: TableState,
    /// Hash key attribute names, in key schema order.
    pub key_schema: Vec<String>,
    pub throughput: Option<Throughput>,
    pub item_count: Option<i64>,
}

/// Lifecycle state of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TableState {
    Active,
    Creating,
    Updating,
    Deleting,
    Other(String),
}

impl TableState {
    pub fn is_active(&self) -> bool {
        matches!(self, TableState::Active)
    }
}
