//! Notification settings management.

use std::sync::Arc;

use tracing::info;

use assethub_core::error::AppError;
use assethub_entity::NotificationSettings;
use assethub_notify::TriggerTime;
use assethub_store::repositories::SettingsRepository;

/// Reads and edits the notification settings singleton.
#[derive(Debug, Clone)]
pub struct SettingsService {
    /// Settings repository.
    settings_repo: Arc<SettingsRepository>,
}

impl SettingsService {
    /// Creates a new settings service.
    pub fn new(settings_repo: Arc<SettingsRepository>) -> Self {
        Self { settings_repo }
    }

    /// Current settings.
    pub async fn get_settings(&self) -> Result<NotificationSettings, AppError> {
        self.settings_repo.get().await
    }

    /// Validates and stores new preferences. The ledger is kept.
    pub async fn update_settings(
        &self,
        mut settings: NotificationSettings,
    ) -> Result<NotificationSettings, AppError> {
        let time: TriggerTime = settings.notification_time.parse()?;
        if settings.days_before_expiry < 0 {
            return Err(AppError::validation("daysBeforeExpiry must not be negative"));
        }
        settings.notification_time = time.to_string();

        let saved = self.settings_repo.update_preferences(settings).await?;
        info!(
            enabled = saved.enabled,
            days_before_expiry = saved.days_before_expiry,
            notification_time = %saved.notification_time,
            channels = ?saved.channels.enabled_kinds(),
            "Notification settings updated"
        );
        Ok(saved)
    }

    /// Forgets every ledger entry, so due items are reminded again today.
    pub async fn clear_ledger(&self) -> Result<usize, AppError> {
        let removed = self.settings_repo.clear_ledger().await?;
        info!(removed, "Notification ledger cleared");
        Ok(removed)
    }
}
