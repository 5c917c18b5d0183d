//! Cycle runner: one guarded evaluation per tick.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing;

use assethub_service::{CheckOptions, CycleOutcome, NotificationService};

/// Runs scheduled reminder cycles.
///
/// A tick that arrives while a cycle is still running is dropped, not
/// queued. Errors are logged and never propagate to the scheduler.
#[derive(Debug, Clone)]
pub struct CycleRunner {
    /// Notification service holding the shared guard.
    service: Arc<NotificationService>,
}

impl CycleRunner {
    /// Create a new cycle runner
    pub fn new(service: Arc<NotificationService>) -> Self {
        Self { service }
    }

    /// Run one cycle at the current time.
    pub async fn tick(&self) -> Option<CycleOutcome> {
        self.tick_at(Utc::now()).await
    }

    /// Run one cycle as if it were `now`. Returns `None` when the cycle failed.
    pub async fn tick_at(&self, now: DateTime<Utc>) -> Option<CycleOutcome> {
        match self.service.run_guarded(now, CheckOptions::default()).await {
            Ok(outcome) => {
                match &outcome {
                    CycleOutcome::Skipped => {
                        tracing::debug!("Previous notification cycle still running, tick skipped")
                    }
                    CycleOutcome::Completed { notifications, .. } if !notifications.is_empty() => {
                        tracing::info!(sent = notifications.len(), "Scheduled notification cycle sent reminders")
                    }
                    other => tracing::trace!(outcome = %other.message(), "Scheduled notification cycle"),
                }
                Some(outcome)
            }
            Err(e) => {
                tracing::error!(error = %e, "Scheduled notification cycle failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use assethub_core::config::NotificationConfig;
    use assethub_notify::ChannelFactory;
    use assethub_service::Services;
    use assethub_store::JsonStore;

    use super::*;

    async fn runner(dir: &tempfile::TempDir) -> (CycleRunner, Services) {
        let store = Arc::new(JsonStore::at(dir.path().join("db.json")).await.unwrap());
        let config = NotificationConfig::default();
        let services = Services::with_channels(
            store,
            &config,
            Arc::new(ChannelFactory::new(&config).unwrap()),
        )
        .unwrap();
        (CycleRunner::new(Arc::clone(&services.notifications)), services)
    }

    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 1, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_disabled_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let (runner, _) = runner(&dir).await;
        assert_eq!(runner.tick_at(nine_am()).await, Some(CycleOutcome::Disabled));
    }

    #[tokio::test]
    async fn test_busy_guard_skips() {
        let dir = tempfile::tempdir().unwrap();
        let (runner, services) = runner(&dir).await;
        let _held = services.notifications.guard().try_acquire().unwrap();
        assert_eq!(runner.tick_at(nine_am()).await, Some(CycleOutcome::Skipped));
    }

    #[tokio::test]
    async fn test_failure_is_absorbed_and_guard_released() {
        let dir = tempfile::tempdir().unwrap();
        let (runner, services) = runner(&dir).await;
        std::fs::write(dir.path().join("db.json"), "not json").unwrap();

        assert_eq!(runner.tick_at(nine_am()).await, None);
        assert!(!services.notifications.guard().is_running());
    }
}
