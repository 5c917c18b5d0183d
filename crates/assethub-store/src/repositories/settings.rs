//! Notification settings repository implementation.

use std::sync::Arc;

use assethub_core::result::AppResult;
use assethub_entity::{LedgerDelta, NotificationSettings};

use crate::document::JsonStore;

/// Repository for the notification settings singleton and its ledger.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    store: Arc<JsonStore>,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Current settings, ledger included.
    pub async fn get(&self) -> AppResult<NotificationSettings> {
        Ok(self.store.load().await?.notification_settings)
    }

    /// Replace the user-editable preferences.
    ///
    /// The ledger and the last-check timestamp are owned by the evaluator and
    /// survive whatever the caller sent.
    pub async fn update_preferences(
        &self,
        settings: NotificationSettings,
    ) -> AppResult<NotificationSettings> {
        self.store
            .update(|doc| {
                let current = &mut doc.notification_settings;
                let merged = NotificationSettings {
                    last_notification_check: current.last_notification_check,
                    notified_assets: std::mem::take(&mut current.notified_assets),
                    ..settings
                };
                *current = merged.clone();
                Ok(merged)
            })
            .await
    }

    /// Store the outcome of an evaluation cycle.
    ///
    /// The cycle's ledger changes are applied to the stored ledger and the
    /// last-check timestamp is set when given. Everything else is re-read,
    /// so edits made while the cycle ran are kept.
    pub async fn record_cycle(
        &self,
        delta: &LedgerDelta,
        last_check: Option<i64>,
    ) -> AppResult<()> {
        self.store
            .update(|doc| {
                let settings = &mut doc.notification_settings;
                delta.apply_to(&mut settings.notified_assets);
                if let Some(ts) = last_check {
                    settings.last_notification_check = ts;
                }
                Ok(())
            })
            .await
    }

    /// Forget every ledger entry. Returns how many were removed.
    pub async fn clear_ledger(&self) -> AppResult<usize> {
        self.store
            .update(|doc| {
                let ledger = std::mem::take(&mut doc.notification_settings.notified_assets);
                Ok(ledger.len())
            })
            .await
    }
}
