//! Batched reads and writes that resubmit unprocessed items.
//!
//! A batch round trip may succeed partially: the service hands back the items
//! (or keys) it did not get to. The helpers here split the input into
//! service-sized chunks and resubmit each chunk's leftovers with capped
//! exponential backoff until nothing is left or the attempt budget runs out.

use std::time::Duration;

use serde::Serialize;

use crate::record::Record;
use crate::storage::{Result, StoreError, TableStore};

/// Maximum number of put requests in one BatchWriteItem call.
pub const MAX_BATCH_WRITE_ITEMS: usize = 25;

/// Maximum number of keys in one BatchGetItem call.
pub const MAX_BATCH_GET_KEYS: usize = 100;

/// Retry budget and backoff for unprocessed batch items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Round trips allowed per chunk, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Delay before resubmitting after the given (1-based) failed attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Summary of a completed batch write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchWriteReport {
    pub written: usize,
    pub round_trips: u32,
}

/// Summary of a completed batch get.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchGetReport {
    pub records: Vec<Record>,
    pub round_trips: u32,
}

/// Writes every record, resubmitting unprocessed ones.
pub async fn write_all(
    store: &dyn TableStore,
    table_name: &str,
    records: &[Record],
    policy: RetryPolicy,
) -> Result<BatchWriteReport> {
    let mut report = BatchWriteReport::default();

    for chunk in records.chunks(MAX_BATCH_WRITE_ITEMS) {
        let mut pending = chunk.to_vec();
        let mut attempt = 0;

        loop {
            attempt += 1;
            report.round_trips += 1;

            let outcome = store.batch_write(table_name, &pending).await?;
            report.written += pending.len().saturating_sub(outcome.unprocessed.len());

            if outcome.unprocessed.is_empty() {
                break;
            }
            if attempt >= policy.attempts() {
                return Err(StoreError::UnprocessedAfterRetries {
                    operation: "BatchWriteItem",
                    remaining: outcome.unprocessed.len(),
                });
            }

            let delay = policy.delay_for(attempt);
            tracing::warn!(
                table = table_name,
                attempt,
                unprocessed = outcome.unprocessed.len(),
                delay_ms = delay.as_millis() as u64,
                "batch write left unprocessed items, resubmitting"
            );
            tokio::time::sleep(delay).await;
            pending = outcome.unprocessed;
        }
    }

    Ok(report)
}

/// Reads every key, resubmitting unprocessed ones.
///
/// Keys that do not exist in the table are simply absent from the result.
pub async fn get_all(
    store: &dyn TableStore,
    table_name: &str,
    ids: &[String],
    policy: RetryPolicy,
) -> Result<BatchGetReport> {
    let mut report = BatchGetReport::default();

    for chunk in ids.chunks(MAX_BATCH_GET_KEYS) {
        let mut pending = chunk.to_vec();
        let mut attempt = 0;

        loop {
            attempt += 1;
            report.round_trips += 1;

            let outcome = store.batch_get(table_name, &pending).await?;
            report.records.extend(outcome.records);

            if outcome.unprocessed.is_empty() {
                break;
            }
            if attempt >= policy.attempts() {
                return Err(StoreError::UnprocessedAfterRetries {
                    operation: "BatchGetItem",
                    remaining: outcome.unprocessed.len(),
                });
            }

            let delay = policy.delay_for(attempt);
            tracing::warn!(
                table = table_name,
                attempt,
                unprocessed = outcome.unprocessed.len(),
                delay_ms = delay.as_millis() as u64,
                "batch get left unprocessed keys, resubmitting"
            );
            tokio::time::sleep(delay).await;
            pending = outcome.unprocessed;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::batch_records;
    use crate::storage::testing::ScriptedStore;

    fn no_delay(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_millis(300),
        };

        assert_eq!(policy.delay_for(1), Duration::from_millis(50));
        assert_eq!(policy.delay_for(2), Duration::from_millis(100));
        assert_eq!(policy.delay_for(3), Duration::from_millis(200));
        assert_eq!(policy.delay_for(4), Duration::from_millis(300));
        assert_eq!(policy.delay_for(40), Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_write_all_single_round_trip() {
        let store = ScriptedStore::new();
        let records = batch_records(10);

        let report = write_all(&store, "t", &records, no_delay(3)).await.unwrap();

        assert_eq!(report.written, 10);
        assert_eq!(report.round_trips, 1);
        assert_eq!(store.written(), records);
    }

    #[tokio::test]
    async fn test_write_all_resubmits_unprocessed() {
        let store = ScriptedStore::new().withhold_writes(vec![4, 1]);
        let records = batch_records(10);

        let report = write_all(&store, "t", &records, no_delay(5)).await.unwrap();

        assert_eq!(report.written, 10);
        assert_eq!(report.round_trips, 3);
        assert_eq!(store.write_calls(), vec![10, 4, 1]);

        let mut written: Vec<String> = store.written().into_iter().map(|r| r.id).collect();
        written.sort();
        let mut expected: Vec<String> = records.into_iter().map(|r| r.id).collect();
        expected.sort();
        assert_eq!(written, expected);
    }

    #[tokio::test]
    async fn test_write_all_gives_up_after_budget() {
        let store = ScriptedStore::new().withhold_writes(vec![2, 2, 2, 2]);

        let result = write_all(&store, "t", &batch_records(10), no_delay(3)).await;

        assert_eq!(
            result,
            Err(StoreError::UnprocessedAfterRetries {
                operation: "BatchWriteItem",
                remaining: 2,
            })
        );
        assert_eq!(store.write_calls().len(), 3);
    }

    #[tokio::test]
    async fn test_write_all_chunks_large_inputs() {
        let store = ScriptedStore::new();

        let report = write_all(&store, "t", &batch_records(60), no_delay(1))
            .await
            .unwrap();

        assert_eq!(report.written, 60);
        assert_eq!(store.write_calls(), vec![25, 25, 10]);
    }

    #[tokio::test]
    async fn test_get_all_resubmits_unprocessed_keys() {
        let store = ScriptedStore::new().withhold_reads(vec![1]);
        let ids = vec!["a".to_string(), "b".to_string()];

        let report = get_all(&store, "t", &ids, no_delay(3)).await.unwrap();

        assert_eq!(report.round_trips, 2);
        let mut found: Vec<String> = report.records.into_iter().map(|r| r.id).collect();
        found.sort();
        assert_eq!(found, ids);
    }

    #[tokio::test]
    async fn test_get_all_gives_up_after_budget() {
        let store = ScriptedStore::new().withhold_reads(vec![1, 1]);
        let ids = vec!["a".to_string(), "b".to_string()];

        let result = get_all(&store, "t", &ids, no_delay(2)).await;

        assert_eq!(
            result,
            Err(StoreError::UnprocessedAfterRetries {
                operation: "BatchGetItem",
                remaining: 1,
            })
        );
    }

    #[tokio::test]
    async fn test_zero_attempt_budget_still_submits_once() {
        let store = ScriptedStore::new();

        let report = write_all(&store, "t", &batch_records(3), no_delay(0))
            .await
            .unwrap();

        assert_eq!(report.round_trips, 1);
    }
}
