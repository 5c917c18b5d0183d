//! Notification settings singleton and the daily de-duplication ledger.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::channel::ChannelSettings;

/// Default lead time in days.
pub const DEFAULT_DAYS_BEFORE_EXPIRY: i64 = 7;

/// Default daily trigger time (`HH:MM`, business calendar).
pub const DEFAULT_NOTIFICATION_TIME: &str = "09:00";

/// Record of the last reminder sent for one notification key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifiedRecord {
    /// Business-calendar date of the last reminder.
    pub last_notified_date: NaiveDate,
    /// Days remaining computed when the reminder was sent.
    pub days_remaining: i64,
}

/// Ledger changes made by one evaluation cycle.
///
/// Applied on top of the stored ledger so entries written or cleared by
/// others while the cycle ran are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerDelta {
    /// Keys whose item left the reminder range.
    pub removed: Vec<String>,
    /// Keys reminded in this cycle.
    pub recorded: BTreeMap<String, NotifiedRecord>,
}

impl LedgerDelta {
    /// Whether the cycle left the ledger untouched.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.recorded.is_empty()
    }

    /// Drop `key` and forget any reminder recorded for it earlier in the cycle.
    pub fn remove(&mut self, key: &str) {
        self.recorded.remove(key);
        if !self.removed.iter().any(|k| k == key) {
            self.removed.push(key.to_string());
        }
    }

    /// Record a reminder for `key`.
    pub fn record(&mut self, key: &str, record: NotifiedRecord) {
        self.removed.retain(|k| k != key);
        self.recorded.insert(key.to_string(), record);
    }

    /// Apply the changes to a ledger.
    pub fn apply_to(&self, ledger: &mut BTreeMap<String, NotifiedRecord>) {
        for key in &self.removed {
            ledger.remove(key);
        }
        ledger.extend(self.recorded.iter().map(|(k, r)| (k.clone(), r.clone())));
    }
}

/// User-editable notification settings, persisted in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    /// Master switch.
    #[serde(default)]
    pub enabled: bool,
    /// Start reminding this many days before expiry.
    #[serde(default = "default_days_before_expiry")]
    pub days_before_expiry: i64,
    /// Daily trigger time, `HH:MM`.
    #[serde(default = "default_notification_time")]
    pub notification_time: String,
    /// Push channel settings.
    #[serde(default)]
    pub channels: ChannelSettings,
    /// Epoch millis of the last cycle that sent at least one reminder.
    #[serde(default)]
    pub last_notification_check: i64,
    /// De-duplication ledger keyed by notification key.
    #[serde(default)]
    pub notified_assets: BTreeMap<String, NotifiedRecord>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            days_before_expiry: DEFAULT_DAYS_BEFORE_EXPIRY,
            notification_time: DEFAULT_NOTIFICATION_TIME.to_string(),
            channels: ChannelSettings::default(),
            last_notification_check: 0,
            notified_assets: BTreeMap::new(),
        }
    }
}

fn default_days_before_expiry() -> i64 {
    DEFAULT_DAYS_BEFORE_EXPIRY
}

fn default_notification_time() -> String {
    DEFAULT_NOTIFICATION_TIME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_original_layout() {
        let json = r#"{
            "enabled": true,
            "daysBeforeExpiry": 10,
            "notificationTime": "08:30",
            "channels": {
                "bark": {"enabled": true, "serverUrl": "https://api.day.app", "deviceKey": "k"},
                "telegram": {"enabled": false, "botToken": "", "chatId": ""}
            },
            "lastNotificationCheck": 1700000000000,
            "notifiedAssets": {
                "3_example.com": {"lastNotifiedDate": "2025-01-02", "daysRemaining": 4}
            }
        }"#;
        let settings: NotificationSettings = serde_json::from_str(json).expect("deserialize");
        assert!(settings.enabled);
        assert_eq!(settings.days_before_expiry, 10);
        assert!(settings.channels.bark.is_configured());
        assert!(!settings.channels.telegram.is_configured());
        let record = &settings.notified_assets["3_example.com"];
        assert_eq!(
            record.last_notified_date,
            NaiveDate::from_ymd_opt(2025, 1, 2).expect("valid date")
        );
        assert_eq!(record.days_remaining, 4);
    }

    #[test]
    fn test_ledger_delta_apply() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
        let record = |days_remaining| NotifiedRecord {
            last_notified_date: day,
            days_remaining,
        };

        let mut delta = LedgerDelta::default();
        assert!(delta.is_empty());
        delta.record("1", record(3));
        delta.remove("2");
        delta.record("4", record(1));
        delta.remove("4");

        let mut ledger = BTreeMap::new();
        ledger.insert("2".to_string(), record(5));
        ledger.insert("4".to_string(), record(6));
        ledger.insert("9".to_string(), record(0));
        delta.apply_to(&mut ledger);

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger["1"], record(3));
        assert_eq!(ledger["9"], record(0));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: NotificationSettings = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(settings, NotificationSettings::default());
        assert_eq!(settings.notification_time, "09:00");
        assert!(settings.channels.enabled_kinds().is_empty());
    }
}
