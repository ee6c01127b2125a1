//! meme-bot
//!
//! Runs one intake or publication invocation per call (for an external
//! timer), or both on cron schedules in a single long-lived process.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use bot_core::config::Config;
use bot_core::domains::publication::PublicationOutcome;
use bot_core::domains::queue::QueueEntry;
use bot_core::kernel::{connect_pool, run_intake, run_migrations, run_publication, start_scheduler};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "meme-bot")]
#[command(about = "Queue top Reddit memes and publish them to X")]
struct Cli {
    /// Apply pending schema migrations before running the command
    #[arg(long, global = true)]
    migrate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch top posts and queue the valid new ones
    Fetch,

    /// Publish the oldest queued meme
    Publish,

    /// Apply schema migrations and exit
    Migrate,

    /// Run fetch and publish on their cron schedules until interrupted
    Schedule,

    /// Report how many memes are waiting to be published
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bot_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    if cli.migrate || matches!(cli.command, Commands::Migrate) {
        migrate(&config).await?;
    }

    match cli.command {
        Commands::Migrate => Ok(()),
        Commands::Fetch => {
            let report = run_intake(&config).await?;
            tracing::info!(
                inserted = report.inserted,
                duplicates = report.duplicates,
                rejected = report.rejected,
                "Fetch finished"
            );
            Ok(())
        }
        Commands::Publish => {
            match run_publication(&config).await? {
                PublicationOutcome::QueueEmpty => tracing::info!("Nothing to publish"),
                PublicationOutcome::Published {
                    post_id,
                    primary_post_id,
                    ..
                } => tracing::info!(%post_id, %primary_post_id, "Publish finished"),
            }
            Ok(())
        }
        Commands::Schedule => schedule(config).await,
        Commands::Status => status(&config).await,
    }
}

async fn migrate(config: &Config) -> Result<()> {
    let pool = connect_pool(config).await?;
    let result = run_migrations(&pool).await;
    pool.close().await;
    result
}

async fn status(config: &Config) -> Result<()> {
    let pool = connect_pool(config).await?;
    let result = QueueEntry::count_unpublished(&pool).await;
    pool.close().await;

    let pending = result.context("Failed to count queued memes")?;
    tracing::info!(pending, "Queue status");
    println!("{} meme(s) waiting to be published", pending);
    Ok(())
}

async fn schedule(config: Config) -> Result<()> {
    config.require_x_access_token()?;

    let mut scheduler = start_scheduler(Arc::new(config)).await?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    tracing::info!("Shutting down scheduler");
    scheduler.shutdown().await?;
    Ok(())
}
