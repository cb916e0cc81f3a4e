//! Cron scheduler driving contest processing
//!
//! Every tick enumerates all contests and processes each one on its own
//! task. A contest that fails, panics or exceeds its deadline is logged and
//! never affects the others. A tick that fires while the previous one is
//! still running is skipped.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures::future::join_all;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::config::SchedulerConfig;
use crate::error::{AppError, AppResult};
use crate::models::Contest;
use crate::services::{ContestProcessor, ProcessStats};
use crate::state::AppState;

/// Summary of one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub contests: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub orders_created: usize,
}

/// Process every contest once
pub async fn run_tick(state: &AppState, contest_timeout: Option<Duration>) -> TickReport {
    let contests = match state.store().list_contests().await {
        Ok(contests) => contests,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list contests");
            return TickReport::default();
        }
    };

    let processor = ContestProcessor::new(state.clone());
    let handles: Vec<_> = contests
        .into_iter()
        .map(|contest| {
            let processor = processor.clone();
            tokio::spawn(async move {
                let outcome = process_isolated(&processor, &contest, contest_timeout).await;
                (contest, outcome)
            })
        })
        .collect();

    let mut report = TickReport {
        contests: handles.len(),
        ..TickReport::default()
    };

    for joined in join_all(handles).await {
        match joined {
            Ok((_, Ok(stats))) => {
                report.succeeded += 1;
                report.orders_created += stats.orders_created;
            }
            Ok((contest, Err(e))) => {
                report.failed += 1;
                tracing::error!(
                    contest = %contest.id,
                    label = %contest.label(),
                    code = e.error_code(),
                    error = %e,
                    "Contest processing failed"
                );
            }
            Err(e) => {
                report.failed += 1;
                tracing::error!(error = %e, "Contest processing task aborted");
            }
        }
    }

    report
}

async fn process_isolated(
    processor: &ContestProcessor,
    contest: &Contest,
    contest_timeout: Option<Duration>,
) -> AppResult<ProcessStats> {
    let work = processor.process(contest);
    match contest_timeout {
        Some(limit) => tokio::time::timeout(limit, work).await.map_err(|_| {
            AppError::Timeout(format!(
                "processing {} exceeded {}s",
                contest.label(),
                limit.as_secs()
            ))
        })?,
        None => work.await,
    }
}

/// One guarded processing pass; overlapping passes are skipped
#[derive(Clone)]
pub struct ProcessingTick {
    state: AppState,
    contest_timeout: Option<Duration>,
    running: Arc<Mutex<()>>,
}

impl ProcessingTick {
    pub fn new(state: AppState, contest_timeout: Option<Duration>) -> Self {
        Self {
            state,
            contest_timeout,
            running: Arc::new(Mutex::new(())),
        }
    }

    /// Run a tick unless the previous one is still in progress
    pub async fn run(&self) -> Option<TickReport> {
        let Ok(_running) = self.running.try_lock() else {
            tracing::warn!("Previous processing tick still running, skipping");
            return None;
        };

        let report = run_tick(&self.state, self.contest_timeout).await;
        tracing::info!(
            contests = report.contests,
            succeeded = report.succeeded,
            failed = report.failed,
            orders_created = report.orders_created,
            "Processing tick finished"
        );
        Some(report)
    }
}

/// Scheduler that runs contest processing on a cron schedule
pub struct ContestScheduler {
    tick: ProcessingTick,
    cron: String,
    scheduler: JobScheduler,
}

impl ContestScheduler {
    /// Create a new contest scheduler
    pub async fn new(state: AppState, config: SchedulerConfig) -> Result<Self> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            tick: ProcessingTick::new(state, config.contest_timeout),
            cron: config.cron,
            scheduler,
        })
    }

    /// Add the processing job to the scheduler
    pub async fn setup_jobs(&mut self) -> Result<()> {
        let tick = self.tick.clone();

        tracing::info!("Adding contest processing job: {}", self.cron);

        let job = Job::new_async(self.cron.as_str(), move |_uuid, _lock| {
            let tick = tick.clone();
            Box::pin(async move {
                tick.run().await;
            })
        })?;

        self.scheduler.add(job).await?;
        Ok(())
    }

    /// Run one processing pass outside the cron schedule
    pub async fn tick(&self) -> Option<TickReport> {
        self.tick.run().await
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<()> {
        self.scheduler.start().await?;
        Ok(())
    }

    /// Shutdown the scheduler gracefully
    pub async fn shutdown(&mut self) -> Result<()> {
        self.scheduler.shutdown().await?;
        Ok(())
    }
}
