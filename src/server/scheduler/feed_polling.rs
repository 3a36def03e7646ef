use std::{sync::Arc, time::Duration};

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::{
        feed::engine::{FeedEngine, PollOutcome},
        status::{StatusMonitor, StatusOutcome},
    },
};

/// A feed engine and how often it polls.
pub struct ScheduledFeed {
    pub engine: Arc<FeedEngine>,
    pub interval: Duration,
}

/// Starts the polling scheduler.
///
/// Every feed is polled once immediately, then on its own interval. The status monitor,
/// when configured, runs as a separate job.
///
/// # Arguments
/// - `feeds` - Feed engines with their intervals
/// - `status` - Status monitor and its interval, if enabled
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; keep it to shut it down
/// - `Err(AppError::SchedulerErr)` - A job could not be created or the scheduler not started
pub async fn start_scheduler(
    feeds: Vec<ScheduledFeed>,
    status: Option<(Arc<StatusMonitor>, Duration)>,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    for feed in feeds {
        let initial = feed.engine.clone();
        tokio::spawn(async move {
            tracing::info!("Performing initial {} check", initial.name());
            run_feed_poll(&initial).await;
        });

        let job_engine = feed.engine.clone();
        let job = Job::new_repeated_async(feed.interval, move |_uuid, _lock| {
            let engine = job_engine.clone();

            Box::pin(async move {
                run_feed_poll(&engine).await;
            })
        })?;

        scheduler.add(job).await?;
        tracing::info!(
            "Scheduled {} every {}s",
            feed.engine.name(),
            feed.interval.as_secs()
        );
    }

    if let Some((monitor, interval)) = status {
        let initial = monitor.clone();
        tokio::spawn(async move {
            run_status_poll(&initial).await;
        });

        let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
            let monitor = monitor.clone();

            Box::pin(async move {
                run_status_poll(&monitor).await;
            })
        })?;

        scheduler.add(job).await?;
        tracing::info!("Scheduled server status every {}s", interval.as_secs());
    }

    scheduler.start().await?;

    tracing::info!("Feed polling scheduler started");

    Ok(scheduler)
}

async fn run_feed_poll(engine: &FeedEngine) {
    match engine.poll().await {
        PollOutcome::Skipped => {
            tracing::debug!("Skipped {} tick", engine.name())
        }
        PollOutcome::Completed(report) => tracing::debug!(
            "{} poll finished: {} fetched, {} new, {} sent, {} failed",
            engine.name(),
            report.fetched,
            report.new,
            report.sent,
            report.failed
        ),
    }
}

async fn run_status_poll(monitor: &StatusMonitor) {
    if let StatusOutcome::Changed { from, to, announced } = monitor.poll().await {
        if !announced {
            tracing::warn!("Server status change {} → {} was not announced", from, to);
        }
    }
}
