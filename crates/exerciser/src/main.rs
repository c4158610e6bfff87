mod config;
mod exercise;
mod prelude;
mod storage;

use anyhow::{Context, Result};
use clap::Parser;
use exerciser_core::storage::TableStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Backend, Config};
use crate::prelude::*;
use crate::storage::{dynamodb, DynamoDbStore, InMemoryStore};

/// ddb-exerciser - Describe, create, write, read and delete a DynamoDB table
#[derive(Parser, Debug)]
#[command(name = "ddb-exerciser")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Table to exercise. It is deleted at the end of the run.
    #[arg(long, default_value = "your-table-name", env = "EXERCISER_TABLE")]
    pub table: String,

    /// AWS region
    #[arg(long, default_value = "ap-northeast-1", env = "AWS_REGION")]
    pub region: String,

    /// Custom endpoint URL, e.g. http://localhost:8000 for DynamoDB Local
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Storage backend to run against
    #[arg(long, value_enum, default_value_t = Backend::Dynamodb, env = "EXERCISER_BACKEND")]
    pub backend: Backend,

    /// Provisioned read capacity units for a newly created table
    #[arg(long, default_value = "10")]
    pub read_capacity: i64,

    /// Provisioned write capacity units for a newly created table
    #[arg(long, default_value = "10")]
    pub write_capacity: i64,

    /// Round trips allowed per batch chunk before unprocessed items are an error
    #[arg(long, default_value = "8")]
    pub max_batch_attempts: u32,

    /// Times to poll a newly created table before giving up on it becoming active
    #[arg(long, default_value = "60")]
    pub activation_attempts: u32,

    /// Seconds between activation polls
    #[arg(long, default_value = "2")]
    pub activation_poll_secs: u64,

    /// Silence the step-by-step report
    #[arg(long)]
    pub silent: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ddb_exerciser=info,exerciser_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_cli(&cli);

    if let Err(err) = run(&config).await {
        tracing::error!(table = %config.table_name, "{:#}", err);
        if !config.silent {
            aprintln!("{} {:#}", p_r("Failed:"), err);
        }
        std::process::exit(1);
    }
}

async fn run(config: &Config) -> Result<()> {
    let store: Box<dyn TableStore> = match config.backend {
        Backend::Dynamodb => {
            if !config.silent {
                aprintln!("{} {}", p_b("Target:"), config.aws.target_display());
            }
            let client = dynamodb::create_client(&config.aws).await;
            Box::new(DynamoDbStore::new(client))
        }
        Backend::Memory => {
            if !config.silent {
                aprintln!("{} in-memory tables", p_b("Target:"));
            }
            Box::new(InMemoryStore::new())
        }
    };

    if !config.silent {
        aprintln!("{} {}", p_b("Table:"), config.table_name);
        aprintln!();
    }

    let report = exercise::run_exercise(store.as_ref(), config)
        .await
        .with_context(|| format!("exercising table '{}'", config.table_name))?;

    tracing::info!(
        table = %config.table_name,
        created = report.created.is_some(),
        batch_round_trips = report.batch_written.round_trips + report.batch_fetched.round_trips,
        "exercise complete"
    );
    if !config.silent {
        aprintln!("{}", p_g("All steps completed."));
    }

    Ok(())
}
