//! Scheduled pipeline runs using tokio-cron-scheduler.
//!
//! Both pipelines run in one process on their configured crons:
//! - Intake (default hourly)
//! - Publication (default every two hours at :30)
//!
//! Each job holds its own guard. A tick that fires while the previous run
//! of the same job is still in flight is skipped.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::config::Config;
use crate::kernel::deps::{run_intake, run_publication};

/// Start the intake and publication jobs
pub async fn start_scheduler(config: Arc<Config>) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let intake_config = config.clone();
    let intake_guard = Arc::new(Mutex::new(()));
    let intake_job = Job::new_async(config.fetch_schedule.as_str(), move |_uuid, _lock| {
        let config = intake_config.clone();
        let guard = intake_guard.clone();
        Box::pin(async move {
            let Ok(_running) = guard.try_lock() else {
                tracing::warn!("Previous intake run still in progress, skipping");
                return;
            };
            if let Err(e) = run_intake(&config).await {
                tracing::error!("Scheduled intake failed: {:#}", e);
            }
        })
    })?;

    scheduler.add(intake_job).await?;

    let publish_config = config.clone();
    let publish_guard = Arc::new(Mutex::new(()));
    let publish_job = Job::new_async(config.publish_schedule.as_str(), move |_uuid, _lock| {
        let config = publish_config.clone();
        let guard = publish_guard.clone();
        Box::pin(async move {
            let Ok(_running) = guard.try_lock() else {
                tracing::warn!("Previous publication run still in progress, skipping");
                return;
            };
            if let Err(e) = run_publication(&config).await {
                tracing::error!("Scheduled publication failed: {:#}", e);
            }
        })
    })?;

    scheduler.add(publish_job).await?;
    scheduler.start().await?;

    tracing::info!(
        fetch_schedule = %config.fetch_schedule,
        publish_schedule = %config.publish_schedule,
        "Scheduled tasks started"
    );
    Ok(scheduler)
}
