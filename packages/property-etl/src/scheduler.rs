//! Daily trigger for the ETL workflow using tokio-cron-scheduler.
//!
//! ```text
//! Scheduler (08:00 UTC daily)
//!     │
//!     └─► EtlPipeline::run()
//!             └─► extract → sense → transform → sense → load
//! ```
//!
//! Missed ticks are not backfilled, and a tick that fires while the previous
//! run is still going is skipped.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::pipeline::EtlPipeline;

/// Start the daily ETL job on `cron` (six fields, seconds first).
pub async fn start_scheduler(pipeline: Arc<EtlPipeline>, cron: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;
    let running = Arc::new(Mutex::new(()));

    let etl_job = Job::new_async(cron, move |_uuid, _lock| {
        let pipeline = pipeline.clone();
        let running = running.clone();
        Box::pin(async move {
            let Ok(_guard) = running.try_lock() else {
                tracing::warn!("Previous ETL run still in progress, skipping this tick");
                return;
            };
            match pipeline.run().await {
                Ok(summary) => {
                    tracing::info!(raw_key = %summary.raw_key, "Scheduled ETL run succeeded")
                }
                Err(e) => tracing::error!("Scheduled ETL run failed: {}", e),
            }
        })
    })?;

    scheduler.add(etl_job).await?;
    scheduler.start().await?;

    tracing::info!(cron, "ETL scheduler started");
    Ok(scheduler)
}
