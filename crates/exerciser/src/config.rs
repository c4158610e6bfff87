use std::time::Duration;

use exerciser_core::batch::RetryPolicy;
use exerciser_core::table::{ActivationPolicy, Throughput};

use crate::storage::dynamodb::AwsConfig;
use crate::Cli;

/// Which `TableStore` implementation to run against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    #[default]
    Dynamodb,
    Memory,
}

/// Exerciser configuration, built once from the command line and passed to
/// the run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Target table name.
    pub table_name: String,
    pub backend: Backend,
    /// Region and endpoint for the DynamoDB backend.
    pub aws: AwsConfig,
    /// Capacity used if the table has to be created.
    pub throughput: Throughput,
    /// Resubmission budget for unprocessed batch items.
    pub retry: RetryPolicy,
    /// Polling budget for a freshly created table.
    pub activation: ActivationPolicy,
    /// Suppress the console report.
    pub silent: bool,
}

impl Config {
    /// Build configuration from parsed command-line arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            table_name: cli.table.clone(),
            backend: cli.backend,
            aws: AwsConfig {
                endpoint_url: cli.endpoint_url.clone(),
                region: cli.region.clone(),
            },
            throughput: Throughput {
                read_capacity_units: cli.read_capacity,
                write_capacity_units: cli.write_capacity,
            },
            retry: RetryPolicy {
                max_attempts: cli.max_batch_attempts,
                ..RetryPolicy::default()
            },
            activation: ActivationPolicy {
                max_attempts: cli.activation_attempts,
                poll_interval: Duration::from_secs(cli.activation_poll_secs),
            },
            silent: cli.silent,
        }
    }
}
