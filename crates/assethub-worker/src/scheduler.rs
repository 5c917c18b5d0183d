//! Cron scheduler for reminder cycles.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use assethub_core::config::SchedulerConfig;
use assethub_core::error::AppError;

use crate::runner::CycleRunner;

/// Cron-based scheduler that fires the cycle runner.
pub struct NotificationScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Runner invoked on every tick
    runner: Arc<CycleRunner>,
    /// Schedule settings
    config: SchedulerConfig,
}

impl std::fmt::Debug for NotificationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationScheduler")
            .field("cron", &self.config.cron)
            .finish()
    }
}

impl NotificationScheduler {
    /// Create a new scheduler
    pub async fn new(runner: Arc<CycleRunner>, config: SchedulerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            runner,
            config,
        })
    }

    /// Register the reminder cycle on the configured cron expression
    pub async fn register(&self) -> Result<(), AppError> {
        let runner = Arc::clone(&self.runner);
        let job = CronJob::new_async(self.config.cron.as_str(), move |_uuid, _lock| {
            let runner = Arc::clone(&runner);
            Box::pin(async move {
                runner.tick().await;
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid scheduler cron expression '{}': {}",
                self.config.cron, e
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add notification schedule: {}", e))
        })?;

        tracing::info!(cron = %self.config.cron, "Registered: notification cycle");
        Ok(())
    }

    /// Start the scheduler, running one cycle right away if configured
    pub async fn start(&mut self) -> Result<(), AppError> {
        if self.config.run_on_start {
            let runner = Arc::clone(&self.runner);
            tokio::spawn(async move {
                runner.tick().await;
            });
        }

        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Notification scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Notification scheduler shut down");
        Ok(())
    }
}
