//! Table schema, status and lifecycle helpers.

mod activation;
mod config;
mod planning;
mod status;

pub use activation::{wait_for_table_active, wait_for_table_deleted, ActivationPolicy};
pub use config::{exerciser_table_spec, AttributeType, KeyAttribute, TableSpec, Throughput};
pub use planning::{format_setup_plan, plan_setup, SetupPlan};
pub use status::{TableDescription, TableState, TableStatus};
