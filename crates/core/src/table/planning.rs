//! Pure functions for deciding how to prepare the target table.

use super::{TableDescription, TableSpec, TableStatus};

/// What the exerciser has to do before touching data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { spec: TableSpec },
    /// Table already exists and is used as-is.
    UseExisting { description: TableDescription },
}

/// Pure function: Calculate the setup plan from the described table status.
pub fn plan_setup(current: &TableStatus, desired: &TableSpec) -> SetupPlan {
    match current {
        TableStatus::Missing => SetupPlan::CreateTable {
            spec: desired.clone(),
        },
        TableStatus::Exists(description) => SetupPlan::UseExisting {
            description: description.clone(),
        },
    }
}

/// Pure function: Format a setup plan for display.
pub fn format_setup_plan(plan: &SetupPlan) -> Vec<String> {
    match plan {
        SetupPlan::CreateTable { spec } => vec![
            format!("+ Create table: {}", spec.table_name),
            format!(
                "  Partition key: {} ({})",
                spec.partition_key.name,
                spec.partition_key.attribute_type.code()
            ),
            format!(
                "  Provisioned throughput: {} RCU / {} WCU",
                spec.throughput.read_capacity_units, spec.throughput.write_capacity_units
            ),
        ],
        SetupPlan::UseExisting { description } => {
            vec![format!(
                "= Table '{}' already exists ({:?})",
                description.table_name, description.state
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{exerciser_table_spec, TableState, Throughput};

    fn existing(name: &str) -> TableDescription {
        TableDescription {
            table_name: name.to_string(),
            state: TableState::Active,
            key_schema: vec!["id".to_string()],
            throughput: Some(Throughput::default()),
            item_count: Some(0),
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let spec = exerciser_table_spec("t", Throughput::default());
        let plan = plan_setup(&TableStatus::Missing, &spec);
        assert_eq!(plan, SetupPlan::CreateTable { spec });
    }

    #[test]
    fn test_existing_table_is_reused() {
        let spec = exerciser_table_spec("t", Throughput::default());
        let plan = plan_setup(&TableStatus::Exists(existing("t")), &spec);
        assert_eq!(
            plan,
            SetupPlan::UseExisting {
                description: existing("t")
            }
        );
    }

    #[test]
    fn test_format_create_plan() {
        let spec = exerciser_table_spec("t", Throughput::default());
        let lines = format_setup_plan(&SetupPlan::CreateTable { spec });
        assert_eq!(
            lines,
            vec![
                "+ Create table: t".to_string(),
                "  Partition key: id (S)".to_string(),
                "  Provisioned throughput: 10 RCU / 10 WCU".to_string(),
            ]
        );
    }

    #[test]
    fn test_format_use_existing_plan() {
        let lines = format_setup_plan(&SetupPlan::UseExisting {
            description: existing("t"),
        });
        assert_eq!(lines, vec!["= Table 't' already exists (Active)".to_string()]);
    }
}
