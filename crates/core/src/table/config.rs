//! Table schema configuration (pure data).

use serde::Serialize;

use crate::record::PARTITION_KEY;

/// Table schema and capacity used when the exerciser has to create a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSpec {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub throughput: Throughput,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// Scalar attribute types usable as keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributeType {
    String,
}

impl AttributeType {
    /// The service's short type code.
    pub fn code(&self) -> &'static str {
        match self {
            AttributeType::String => "S",
        }
    }
}

/// Provisioned read/write capacity units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Throughput {
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
}

impl Default for Throughput {
    fn default() -> Self {
        Self {
            read_capacity_units: 10,
            write_capacity_units: 10,
        }
    }
}

/// Returns the table spec for an exerciser table: a single string hash key
/// named `id` with the given provisioned throughput.
pub fn exerciser_table_spec(table_name: &str, throughput: Throughput) -> TableSpec {
    TableSpec {
        table_name: table_name.to_string(),
        partition_key: KeyAttribute {
            name: PARTITION_KEY.to_string(),
            attribute_type: AttributeType::String,
        },
        throughput,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exerciser_table_spec() {
        let spec = exerciser_table_spec("things", Throughput::default());

        assert_eq!(spec.table_name, "things");
        assert_eq!(spec.partition_key.name, "id");
        assert_eq!(spec.partition_key.attribute_type.code(), "S");
        assert_eq!(spec.throughput.read_capacity_units, 10);
        assert_eq!(spec.throughput.write_capacity_units, 10);
    }
}
