//! Per-invocation dependencies for the pipelines (using traits for testability)
//!
//! Every invocation opens its own connection pool and closes it when the
//! pipeline returns, whether it succeeded or not.

use anyhow::{Context, Result};
use reddit_client::RedditClient;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use x_client::{XClient, XOptions};

use crate::common::PipelineError;
use crate::config::Config;
use crate::domains::intake::{fetch_posts, IntakeReport};
use crate::domains::publication::{publish_next, PublicationOutcome};
use crate::kernel::{
    BaseContentSource, BaseMediaFetcher, BasePublisher, BaseQueueStore, HttpMediaFetcher,
    PostgresQueueStore, RedditContentSource, XPublisher,
};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Connection
// =============================================================================

/// Open the queue store pool. Failing to connect is a `Connection` error.
pub async fn connect_pool(config: &Config) -> Result<PgPool, PipelineError> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(config.database.clone())
        .await
        .map_err(|e| PipelineError::Connection {
            target: "queue store",
            source: e.into(),
        })
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    info!("Migrations applied");
    Ok(())
}

fn reddit_client(config: &Config) -> RedditClient {
    let client = RedditClient::new(config.reddit_user_agent.clone());
    match &config.reddit_credentials {
        Some(credentials) => client.with_credentials(credentials.clone()),
        None => client,
    }
}

// =============================================================================
// IntakeDeps
// =============================================================================

#[derive(Clone)]
pub struct IntakeDeps {
    pub queue: Arc<dyn BaseQueueStore>,
    pub content_source: Arc<dyn BaseContentSource>,
}

impl IntakeDeps {
    pub fn new(
        queue: Arc<dyn BaseQueueStore>,
        content_source: Arc<dyn BaseContentSource>,
    ) -> Self {
        Self {
            queue,
            content_source,
        }
    }

    /// Production wiring: Postgres queue + Reddit listing.
    pub fn from_config(config: &Config, pool: PgPool) -> Self {
        Self::new(
            Arc::new(PostgresQueueStore::new(pool)),
            Arc::new(RedditContentSource::new(reddit_client(config))),
        )
    }
}

// =============================================================================
// PublicationDeps
// =============================================================================

#[derive(Clone)]
pub struct PublicationDeps {
    pub queue: Arc<dyn BaseQueueStore>,
    pub media: Arc<dyn BaseMediaFetcher>,
    pub publisher: Arc<dyn BasePublisher>,
}

impl PublicationDeps {
    pub fn new(
        queue: Arc<dyn BaseQueueStore>,
        media: Arc<dyn BaseMediaFetcher>,
        publisher: Arc<dyn BasePublisher>,
    ) -> Self {
        Self {
            queue,
            media,
            publisher,
        }
    }

    /// Production wiring: Postgres queue + HTTP media + X publisher.
    pub fn from_config(config: &Config, pool: PgPool) -> Result<Self> {
        let token = config.require_x_access_token()?;
        let publisher = XPublisher::new(XClient::new(XOptions::new(token)));

        Ok(Self::new(
            Arc::new(PostgresQueueStore::new(pool)),
            Arc::new(HttpMediaFetcher::new()?),
            Arc::new(publisher),
        ))
    }
}

// =============================================================================
// Invocations
// =============================================================================

/// One intake invocation with its own pool.
pub async fn run_intake(config: &Config) -> Result<IntakeReport> {
    let pool = connect_pool(config).await?;
    let deps = IntakeDeps::from_config(config, pool.clone());

    let result = fetch_posts(&config.intake_settings(), &deps).await;
    pool.close().await;

    Ok(result?)
}

/// One publication invocation with its own pool.
pub async fn run_publication(config: &Config) -> Result<PublicationOutcome> {
    config.require_x_access_token()?;

    let pool = connect_pool(config).await?;
    let result = match PublicationDeps::from_config(config, pool.clone()) {
        Ok(deps) => publish_next(&deps).await.map_err(anyhow::Error::from),
        Err(e) => Err(e),
    };
    pool.close().await;

    result
}
