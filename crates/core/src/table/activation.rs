//! Polling a table until it accepts data-plane calls or has gone away.

use std::time::Duration;

use crate::storage::{Result, StoreError, TableStore};

use super::TableStatus;

/// How long to wait for a table to change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationPolicy {
    pub max_attempts: u32,
    pub poll_interval: Duration,
}

impl ActivationPolicy {
    /// Number of describe calls to make. Always at least one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for ActivationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            poll_interval: Duration::from_secs(2),
        }
    }
}

/// Describes `table_name` until it reports `ACTIVE`.
///
/// A table that is still missing counts as not ready yet; the service may
/// briefly not list a table right after `CreateTable` returns.
pub async fn wait_for_table_active(
    store: &dyn TableStore,
    table_name: &str,
    policy: ActivationPolicy,
) -> Result<()> {
    let attempts = policy.attempts();
    for attempt in 1..=attempts {
        if let TableStatus::Exists(description) = store.describe_table(table_name).await? {
            if description.state.is_active() {
                tracing::debug!(table = table_name, attempt, "table is active");
                return Ok(());
            }
            tracing::debug!(
                table = table_name,
                attempt,
                state = ?description.state,
                "waiting for table to become active"
            );
        }
        if attempt < attempts {
            tokio::time::sleep(policy.poll_interval).await;
        }
    }

    Err(StoreError::TableActivationTimeout {
        table_name: table_name.to_string(),
    })
}

/// Describes `table_name` until the service no longer reports it.
pub async fn wait_for_table_deleted(
    store: &dyn TableStore,
    table_name: &str,
    policy: ActivationPolicy,
) -> Result<()> {
    let attempts = policy.attempts();
    for attempt in 1..=attempts {
        match store.describe_table(table_name).await? {
            TableStatus::Missing => {
                tracing::debug!(table = table_name, attempt, "table is gone");
                return Ok(());
            }
            TableStatus::Exists(description) => tracing::debug!(
                table = table_name,
                attempt,
                state = ?description.state,
                "waiting for table deletion to finish"
            ),
        }
        if attempt < attempts {
            tokio::time::sleep(policy.poll_interval).await;
        }
    }

    Err(StoreError::TableDeletionTimeout {
        table_name: table_name.to_string(),
    })
}
