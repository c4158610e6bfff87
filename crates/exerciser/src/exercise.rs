//! The sequential table exercise.
//!
//! Runs describe, conditional create, put, get, batch write, batch get and
//! delete against one table, in that order. The first failing step aborts the
//! run; nothing is cleaned up on the way out, so a table created here is
//! left behind when a later step fails.

use serde::Serialize;

use exerciser_core::batch::{self, BatchGetReport, BatchWriteReport};
use exerciser_core::record::{self, Record};
use exerciser_core::storage::{Result, TableStore};
use exerciser_core::table::{
    self, exerciser_table_spec, format_setup_plan, plan_setup, SetupPlan, TableDescription,
    TableState, TableStatus,
};

use crate::config::Config;
use crate::prelude::*;

/// Number of records submitted by the batch write step.
pub const BATCH_WRITE_COUNT: u32 = 10;

/// Everything the exercise observed, step by step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseReport {
    pub initial_status: TableStatus,
    /// Set only when the table had to be created.
    pub created: Option<TableDescription>,
    pub put: Record,
    pub fetched: Option<Record>,
    pub batch_written: BatchWriteReport,
    pub batch_fetched: BatchGetReport,
    pub deleted: TableDescription,
}

/// Prints each step's response unless silenced.
struct Reporter {
    silent: bool,
    total: usize,
    current: usize,
}

impl Reporter {
    fn new(silent: bool, total: usize) -> Self {
        Self {
            silent,
            total,
            current: 0,
        }
    }

    fn step<T: Serialize + ?Sized>(&mut self, title: &str, response: &T) {
        self.current += 1;
        if self.silent {
            return;
        }

        aprintln!(
            "{}",
            p_c(&format!("[{}/{}] {}", self.current, self.total, title))
        );
        match serde_json::to_string_pretty(response) {
            Ok(json) => aprintln!("{}", json),
            Err(err) => tracing::warn!(error = %err, step = title, "could not render response"),
        }
        aprintln!();
    }

    fn plan(&self, plan: &SetupPlan) {
        if self.silent {
            return;
        }
        for line in format_setup_plan(plan) {
            if line.starts_with('+') {
                aprintln!("  {}", p_g(&line));
            } else if line.starts_with('=') {
                aprintln!("  {}", p_y(&line));
            } else {
                aprintln!("  {}", line);
            }
        }
        aprintln!();
    }
}

/// Runs the full exercise against `store`.
pub async fn run_exercise(store: &dyn TableStore, config: &Config) -> Result<ExerciseReport> {
    let table_name = config.table_name.as_str();
    let mut reporter = Reporter::new(config.silent, 7);

    // 1. Describe
    tracing::info!(table = table_name, "describing table");
    let initial_status = store.describe_table(table_name).await?;
    reporter.step("DescribeTable", &initial_status);

    // A table left over from an earlier DeleteTable is still listed until the
    // deletion finishes; it has to be gone before it can be created again.
    let mut current_status = initial_status.clone();
    if let Some(description) = initial_status.description() {
        if description.state == TableState::Deleting {
            tracing::info!(table = table_name, "waiting for previous deletion to finish");
            table::wait_for_table_deleted(store, table_name, config.activation).await?;
            current_status = TableStatus::Missing;
        }
    }

    // 2. Create when missing
    let spec = exerciser_table_spec(table_name, config.throughput);
    let plan = plan_setup(&current_status, &spec);
    reporter.plan(&plan);

    let created = match plan {
        SetupPlan::CreateTable { spec } => {
            tracing::info!(
                table = table_name,
                read_capacity_units = spec.throughput.read_capacity_units,
                write_capacity_units = spec.throughput.write_capacity_units,
                "creating table"
            );
            let description = store.create_table(&spec).await?;
            reporter.step("CreateTable", &description);

            table::wait_for_table_active(store, table_name, config.activation).await?;
            tracing::info!(table = table_name, "table is active");
            Some(description)
        }
        SetupPlan::UseExisting { description } => {
            reporter.step("CreateTable (skipped, table exists)", &());
            if !description.state.is_active() {
                tracing::info!(
                    table = table_name,
                    state = ?description.state,
                    "waiting for existing table to become active"
                );
                table::wait_for_table_active(store, table_name, config.activation).await?;
            }
            None
        }
    };

    // 3. Put a single record
    let put = record::single_record();
    tracing::info!(table = table_name, id = %put.id, "putting record");
    store.put_record(table_name, &put).await?;
    reporter.step("PutItem (request)", &put);

    // 4. Read it back
    tracing::info!(table = table_name, id = %put.id, "getting record");
    let fetched = store.get_record(table_name, &put.id).await?;
    reporter.step("GetItem", &fetched);

    // 5. Batch write
    let records = record::batch_records(BATCH_WRITE_COUNT);
    tracing::info!(table = table_name, count = records.len(), "batch writing records");
    let batch_written = batch::write_all(store, table_name, &records, config.retry).await?;
    reporter.step("BatchWriteItem", &batch_written);

    // 6. Batch get
    let ids = record::batch_get_ids();
    tracing::info!(table = table_name, count = ids.len(), "batch getting records");
    let batch_fetched = batch::get_all(store, table_name, &ids, config.retry).await?;
    reporter.step("BatchGetItem", &batch_fetched);

    // 7. Delete
    tracing::info!(table = table_name, "deleting table");
    let deleted = store.delete_table(table_name).await?;
    reporter.step("DeleteTable", &deleted);

    Ok(ExerciseReport {
        initial_status,
        created,
        put,
        fetched,
        batch_written,
        batch_fetched,
        deleted,
    })
}
