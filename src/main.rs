use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use plateful::config::Config;
use plateful::pipeline::{DailyRecsJob, SmsRecJob, TrainJob};
use plateful::store::{create_pool, setup, WarehouseStore};

#[derive(Parser)]
#[command(name = "plateful", about = "Daily restaurant recommendation jobs", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Produce today's stratified recommendation lists
    DailyRecs,
    /// Pick one unseen restaurant per user for the SMS channel
    SmsRec,
    /// Fit a ranking model over a labeled impression window
    Train {
        /// First day of the training window (YYYY-MM-DD)
        #[arg(long)]
        start_ds: NaiveDate,
        /// Last day of the training window (YYYY-MM-DD)
        #[arg(long)]
        end_ds: NaiveDate,
        /// Model architecture; defaults to the configured one
        #[arg(long)]
        arch: Option<String>,
    },
    /// Create the output tables if they do not exist
    SetupTables,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let pool = create_pool(&config.database_url).await?;
    let store = Arc::new(WarehouseStore::new(pool.clone(), config.zone_scheme));

    match cli.command {
        Command::DailyRecs => {
            let job = DailyRecsJob::new(
                store.clone(),
                store.clone(),
                store.clone(),
                config.quota()?,
                config.zone_scheme.model_type().to_string(),
                config.model_id,
            );
            let summary = job.run().await?;
            tracing::info!(?summary, "daily-recs finished");
        }
        Command::SmsRec => {
            let job = SmsRecJob::new(store.clone(), store.clone(), store.clone());
            let summary = job.run().await?;
            tracing::info!(?summary, "sms-rec finished");
        }
        Command::Train {
            start_ds,
            end_ds,
            arch,
        } => {
            let arch = arch.unwrap_or_else(|| config.model_arch.clone());
            let job = TrainJob::new(store.clone(), store.clone());
            let summary = job.run(&arch, start_ds, end_ds).await?;
            tracing::info!(?summary, "train finished");
        }
        Command::SetupTables => {
            setup::ensure_tables(&pool).await?;
        }
    }

    Ok(())
}
