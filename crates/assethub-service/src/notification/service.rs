//! Expiry reminder cycles and channel tests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use assethub_core::error::AppError;
use assethub_entity::ChannelKind;
use assethub_notify::evaluator::{self, Evaluator, NotificationResult, WindowStatus};
use assethub_notify::{ChannelBuilder, NotificationMessage};
use assethub_store::repositories::{AssetRepository, SettingsRepository};

use super::guard::CycleGuard;

/// Flags for a manually triggered cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Ignore the trigger window.
    pub force: bool,
    /// Clear the ledger before evaluating.
    pub reset: bool,
}

/// Diagnostic snapshot reported with every evaluated cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleDebug {
    /// Trigger window position.
    #[serde(flatten)]
    pub window: WindowStatus,
    /// Notify-enabled assets with at least one due date.
    pub assets_with_expiry: usize,
}

/// What a cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Another cycle held the guard.
    Skipped,
    /// Reminders are switched off.
    Disabled,
    /// Outside the trigger window.
    NotDue(CycleDebug),
    /// Evaluated; `notifications` lists what was sent.
    Completed {
        /// Diagnostics.
        debug: CycleDebug,
        /// Per-reminder delivery results.
        notifications: Vec<NotificationResult>,
    },
}

impl CycleOutcome {
    /// Whether the cycle evaluated the assets.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// One-line summary.
    pub fn message(&self) -> String {
        match self {
            Self::Skipped => "a notification cycle is already running".to_string(),
            Self::Disabled => "notifications are disabled".to_string(),
            Self::NotDue(_) => "outside the notification window".to_string(),
            Self::Completed { notifications, .. } => {
                format!("sent {} notifications", notifications.len())
            }
        }
    }

    /// Diagnostics, when the window was evaluated.
    pub fn debug(&self) -> Option<&CycleDebug> {
        match self {
            Self::NotDue(debug) | Self::Completed { debug, .. } => Some(debug),
            Self::Skipped | Self::Disabled => None,
        }
    }

    /// Delivery results; empty unless completed.
    pub fn notifications(&self) -> &[NotificationResult] {
        match self {
            Self::Completed { notifications, .. } => notifications,
            _ => &[],
        }
    }
}

/// Outcome of sending the test message to one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelTestResult {
    /// The channel is switched on.
    pub enabled: bool,
    /// The push service accepted the message.
    pub success: bool,
}

/// Test results per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelTestReport {
    /// Bark.
    pub bark: ChannelTestResult,
    /// Telegram.
    pub telegram: ChannelTestResult,
}

/// Outcome of a channel test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    /// Reminders are switched off.
    Disabled,
    /// The test message was sent to every enabled channel.
    Sent(ChannelTestReport),
}

/// Runs reminder cycles against the stored assets and settings.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Asset repository.
    asset_repo: Arc<AssetRepository>,
    /// Settings repository (ledger included).
    settings_repo: Arc<SettingsRepository>,
    /// Due-date evaluator.
    evaluator: Evaluator,
    /// Builds the push channels for a cycle.
    channels: Arc<dyn ChannelBuilder>,
    /// Shared re-entrancy guard.
    guard: CycleGuard,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        asset_repo: Arc<AssetRepository>,
        settings_repo: Arc<SettingsRepository>,
        evaluator: Evaluator,
        channels: Arc<dyn ChannelBuilder>,
    ) -> Self {
        Self {
            asset_repo,
            settings_repo,
            evaluator,
            channels,
            guard: CycleGuard::new(),
        }
    }

    /// The guard shared by every caller of this service.
    pub fn guard(&self) -> &CycleGuard {
        &self.guard
    }

    /// Runs one cycle unless another is in progress.
    pub async fn run_guarded(
        &self,
        now: DateTime<Utc>,
        options: CheckOptions,
    ) -> Result<CycleOutcome, AppError> {
        let Some(_handle) = self.guard.try_acquire() else {
            debug!("Notification cycle already running, skipping");
            return Ok(CycleOutcome::Skipped);
        };
        self.run_cycle(now, options).await
    }

    /// Runs one cycle without consulting the guard.
    ///
    /// The ledger is persisted whenever it changed, even if every delivery
    /// failed; only the notification bookkeeping is written back.
    pub async fn run_cycle(
        &self,
        now: DateTime<Utc>,
        options: CheckOptions,
    ) -> Result<CycleOutcome, AppError> {
        let mut settings = self.settings_repo.get().await?;

        if options.reset {
            let removed = self.settings_repo.clear_ledger().await?;
            info!(removed, "Notification ledger reset before check");
            settings.notified_assets.clear();
        }

        if !settings.enabled {
            debug!("Notifications disabled, nothing to do");
            return Ok(CycleOutcome::Disabled);
        }

        let assets = self.asset_repo.find_notify_enabled().await?;
        let cycle_debug = CycleDebug {
            window: self.evaluator.window_status(now, &settings)?,
            assets_with_expiry: evaluator::assets_with_expiry(&assets),
        };

        if !options.force && !cycle_debug.window.in_window {
            debug!(
                business_time = %cycle_debug.window.business_time,
                target_time = %cycle_debug.window.target_time,
                time_diff = cycle_debug.window.time_diff,
                "Outside notification window"
            );
            return Ok(CycleOutcome::NotDue(cycle_debug));
        }

        let plan = self.evaluator.plan(now, &assets, &settings);
        let channels = self.channels.build(&settings.channels);
        if channels.is_empty() && !plan.notifications.is_empty() {
            warn!(
                pending = plan.notifications.len(),
                "No notification channel enabled; reminders are recorded but not delivered"
            );
        }

        let notifications = evaluator::deliver(&plan, &channels).await;
        let last_check = plan.last_check(now);
        if plan.ledger_changed() || last_check.is_some() {
            self.settings_repo
                .record_cycle(&plan.delta, last_check)
                .await?;
        }

        info!(
            today = %plan.today,
            sent = notifications.len(),
            forced = options.force,
            "Notification cycle completed"
        );
        Ok(CycleOutcome::Completed {
            debug: cycle_debug,
            notifications,
        })
    }

    /// Sends a fixed message to every enabled channel.
    pub async fn send_test(&self) -> Result<TestOutcome, AppError> {
        let settings = self.settings_repo.get().await?;
        if !settings.enabled {
            return Ok(TestOutcome::Disabled);
        }

        let channels = self.channels.build(&settings.channels);
        let results = channels.send_all(&NotificationMessage::test()).await;

        let result_for = |kind: ChannelKind| {
            let enabled = settings.channels.is_enabled(kind);
            ChannelTestResult {
                enabled,
                success: enabled && results.get(kind),
            }
        };
        let report = ChannelTestReport {
            bark: result_for(ChannelKind::Bark),
            telegram: result_for(ChannelKind::Telegram),
        };

        info!(
            bark = ?report.bark,
            telegram = ?report.telegram,
            "Test notification sent"
        );
        Ok(TestOutcome::Sent(report))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate, TimeZone};

    use super::*;
    use crate::asset::CreateAssetRequest;
    use crate::testing::Fixture;

    /// 09:00 in UTC+8 on 2025-03-01.
    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 1, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    async fn enable(fx: &Fixture, bark: bool) {
        let mut settings = fx.settings.get_settings().await.unwrap();
        settings.enabled = true;
        settings.channels.bark.enabled = bark;
        fx.settings.update_settings(settings).await.unwrap();
    }

    async fn add_asset(fx: &Fixture, expiry: NaiveDate) {
        fx.assets
            .create_asset(CreateAssetRequest {
                name: "db-01".into(),
                main_group_id: fx.main_id,
                sub_group_id: fx.sub_id,
                values: "{}".into(),
                expiry_date: Some(expiry.format("%Y-%m-%d").to_string()),
                expiry_notify: true,
                notes: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_disabled_settings() {
        let fx = Fixture::new().await;
        let outcome = fx
            .notifications
            .run_cycle(nine_am(), CheckOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome, CycleOutcome::Disabled);
        assert_eq!(outcome.message(), "notifications are disabled");
    }

    #[tokio::test]
    async fn test_sends_once_per_day() {
        let fx = Fixture::new().await;
        enable(&fx, true).await;
        add_asset(&fx, today().checked_add_days(Days::new(3)).unwrap()).await;

        let first = fx
            .notifications
            .run_cycle(nine_am(), CheckOptions::default())
            .await
            .unwrap();
        let sent = first.notifications();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].days_remaining, 3);
        assert!(sent[0].results.bark);
        assert_eq!(fx.channels.sent(), vec!["Asset 'db-01' 3 days remaining\nExpiry date: 2025-03-04"]);

        let stored = fx.settings.get_settings().await.unwrap();
        assert_eq!(stored.notified_assets["1"].last_notified_date, today());
        assert_eq!(stored.last_notification_check, nine_am().timestamp_millis());

        let second = fx
            .notifications
            .run_cycle(nine_am() + chrono::TimeDelta::minutes(2), CheckOptions::default())
            .await
            .unwrap();
        assert!(second.is_completed());
        assert!(second.notifications().is_empty());
        assert_eq!(fx.channels.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_outside_window_is_noop() {
        let fx = Fixture::new().await;
        enable(&fx, true).await;
        add_asset(&fx, today()).await;

        let early = nine_am() - chrono::TimeDelta::minutes(20);
        let outcome = fx
            .notifications
            .run_cycle(early, CheckOptions::default())
            .await
            .unwrap();
        let CycleOutcome::NotDue(debug) = outcome else {
            panic!("expected NotDue, got {outcome:?}");
        };
        assert_eq!(debug.window.time_diff, -20);
        assert_eq!(debug.assets_with_expiry, 1);
        assert!(fx.channels.sent().is_empty());

        let forced = fx
            .notifications
            .run_cycle(
                early,
                CheckOptions {
                    force: true,
                    reset: false,
                },
            )
            .await
            .unwrap();
        assert_eq!(forced.notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_allows_resend() {
        let fx = Fixture::new().await;
        enable(&fx, true).await;
        add_asset(&fx, today()).await;

        fx.notifications
            .run_cycle(nine_am(), CheckOptions::default())
            .await
            .unwrap();
        let again = fx
            .notifications
            .run_cycle(
                nine_am(),
                CheckOptions {
                    force: false,
                    reset: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(again.notifications().len(), 1);
        assert_eq!(fx.channels.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_delivery_still_recorded() {
        let fx = Fixture::with_channel_result(false).await;
        enable(&fx, true).await;
        add_asset(&fx, today()).await;

        let outcome = fx
            .notifications
            .run_cycle(nine_am(), CheckOptions::default())
            .await
            .unwrap();
        assert!(!outcome.notifications()[0].results.bark);
        let stored = fx.settings.get_settings().await.unwrap();
        assert!(stored.notified_assets.contains_key("1"));
    }

    #[tokio::test]
    async fn test_guard_skips_overlap() {
        let fx = Fixture::new().await;
        let _held = fx.notifications.guard().try_acquire().unwrap();
        let outcome = fx
            .notifications
            .run_guarded(nine_am(), CheckOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome, CycleOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_send_test_reports_per_channel() {
        let fx = Fixture::new().await;
        assert_eq!(fx.notifications.send_test().await.unwrap(), TestOutcome::Disabled);

        enable(&fx, true).await;
        let TestOutcome::Sent(report) = fx.notifications.send_test().await.unwrap() else {
            panic!("expected a report");
        };
        assert_eq!(
            report.bark,
            ChannelTestResult {
                enabled: true,
                success: true
            }
        );
        assert_eq!(report.telegram, ChannelTestResult::default());
    }
}
