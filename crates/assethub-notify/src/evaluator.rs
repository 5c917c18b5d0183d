//! Notification evaluation.
//!
//! [`Evaluator::plan`] is pure: given the time, the assets and the settings
//! it decides what to send and how the de-duplication ledger changes.
//! [`deliver`] performs the sends. Callers persist [`Plan::delta`]
//! afterwards.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};

use assethub_core::config::NotificationConfig;
use assethub_core::result::AppResult;
use assethub_core::types::AssetId;
use assethub_entity::{Asset, LedgerDelta, NotificationSettings, NotifiedRecord};

use crate::calendar::{BusinessCalendar, TriggerTime, TriggerWindow};
use crate::channel::{ChannelSet, DeliveryResults};
use crate::extractor::{self, NotificationItem};
use crate::message::NotificationMessage;

/// Where `now` sits relative to the daily trigger time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStatus {
    /// Business-calendar wall clock, `YYYY-MM-DD HH:MM`.
    pub business_time: String,
    /// Configured trigger time, `HH:MM`.
    pub target_time: String,
    /// Minutes from the trigger time (positive = after).
    pub time_diff: i64,
    /// Whether a cycle may send now.
    pub in_window: bool,
}

/// A reminder the evaluator decided to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedNotification {
    /// Asset the item belongs to.
    pub asset_id: AssetId,
    /// Asset display name.
    pub asset_name: String,
    /// The due item.
    pub item: NotificationItem,
    /// Ledger key.
    pub key: String,
    /// Days until expiry, negative when overdue.
    pub days_remaining: i64,
    /// Message to push.
    pub message: NotificationMessage,
}

/// Outcome of [`Evaluator::plan`].
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Business-calendar date the plan was made for.
    pub today: NaiveDate,
    /// Reminders to send, in asset order.
    pub notifications: Vec<PlannedNotification>,
    /// Ledger after this cycle.
    pub ledger: BTreeMap<String, NotifiedRecord>,
    /// Changes between the input ledger and `ledger`.
    pub delta: LedgerDelta,
}

impl Plan {
    /// Whether the cycle changed the ledger.
    pub fn ledger_changed(&self) -> bool {
        !self.delta.is_empty()
    }

    /// Value for `lastNotificationCheck`: set only when something is sent.
    pub fn last_check(&self, now: DateTime<Utc>) -> Option<i64> {
        (!self.notifications.is_empty()).then(|| now.timestamp_millis())
    }
}

/// Result of one delivered reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResult {
    /// Asset the reminder was about.
    pub asset_id: AssetId,
    /// Asset display name.
    pub asset_name: String,
    /// Segment label, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Days until expiry.
    pub days_remaining: i64,
    /// Per-channel outcome.
    pub results: DeliveryResults,
}

/// Decides which reminders are due.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    calendar: BusinessCalendar,
    tolerance_minutes: u32,
}

impl Evaluator {
    /// Create an evaluator.
    pub fn new(calendar: BusinessCalendar, tolerance_minutes: u32) -> Self {
        Self {
            calendar,
            tolerance_minutes,
        }
    }

    /// Build from the deployment configuration.
    pub fn from_config(config: &NotificationConfig) -> AppResult<Self> {
        Ok(Self::new(
            BusinessCalendar::new(config.utc_offset_hours)?,
            config.tolerance_minutes,
        ))
    }

    /// The business calendar in use.
    pub fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    /// Compare `now` with the configured trigger time.
    pub fn window_status(
        &self,
        now: DateTime<Utc>,
        settings: &NotificationSettings,
    ) -> AppResult<WindowStatus> {
        let target: TriggerTime = settings.notification_time.parse()?;
        let window = TriggerWindow::new(target, self.tolerance_minutes);
        let minute = self.calendar.minute_of_day(now);

        Ok(WindowStatus {
            business_time: self.calendar.local(now).format("%Y-%m-%d %H:%M").to_string(),
            target_time: target.to_string(),
            time_diff: window.diff(minute),
            in_window: window.contains(minute),
        })
    }

    /// Days from `now` until `item` expires.
    pub fn days_remaining(&self, item: &NotificationItem, now: DateTime<Utc>) -> i64 {
        self.calendar.days_remaining(item.date, now)
    }

    /// Decide what to send now and how the ledger changes.
    ///
    /// Assets with reminders switched off are ignored. Items beyond the lead
    /// time lose their ledger entry; items already reminded today are
    /// skipped; everything else is planned and recorded as reminded today,
    /// whatever the delivery outcome turns out to be.
    pub fn plan(
        &self,
        now: DateTime<Utc>,
        assets: &[Asset],
        settings: &NotificationSettings,
    ) -> Plan {
        let today = self.calendar.today(now);
        let mut ledger = settings.notified_assets.clone();
        let mut delta = LedgerDelta::default();
        let mut notifications = Vec::new();

        for asset in assets.iter().filter(|a| a.expiry_notify) {
            for item in extractor::extract_items(asset) {
                let key = item.dedup_key(asset.id);
                let days_remaining = self.days_remaining(&item, now);

                if days_remaining > settings.days_before_expiry {
                    if ledger.remove(&key).is_some() {
                        debug!(key = %key, days_remaining, "Item left the reminder range");
                        delta.remove(&key);
                    }
                    continue;
                }

                if ledger
                    .get(&key)
                    .is_some_and(|r| r.last_notified_date == today)
                {
                    debug!(key = %key, "Already reminded today");
                    continue;
                }

                let record = NotifiedRecord {
                    last_notified_date: today,
                    days_remaining,
                };
                ledger.insert(key.clone(), record.clone());
                delta.record(&key, record);

                let message = NotificationMessage::expiry_reminder(
                    &item.display_name(&asset.name),
                    item.date,
                    days_remaining,
                );
                notifications.push(PlannedNotification {
                    asset_id: asset.id,
                    asset_name: asset.name.clone(),
                    item,
                    key,
                    days_remaining,
                    message,
                });
            }
        }

        Plan {
            today,
            notifications,
            ledger,
            delta,
        }
    }
}

/// Number of notify-enabled assets that carry at least one due date.
pub fn assets_with_expiry(assets: &[Asset]) -> usize {
    assets
        .iter()
        .filter(|a| a.expiry_notify && !extractor::extract_items(a).is_empty())
        .count()
}

/// Push every planned reminder through `channels`.
///
/// Reminders go out one after another; channels for a single reminder are
/// contacted concurrently.
pub async fn deliver(plan: &Plan, channels: &ChannelSet) -> Vec<NotificationResult> {
    let mut results = Vec::with_capacity(plan.notifications.len());
    for planned in &plan.notifications {
        let outcome = channels.send_all(&planned.message).await;
        info!(
            asset_id = %planned.asset_id,
            key = %planned.key,
            days_remaining = planned.days_remaining,
            bark = outcome.bark,
            telegram = outcome.telegram,
            "Expiry reminder sent"
        );
        results.push(NotificationResult {
            asset_id: planned.asset_id,
            asset_name: planned.asset_name.clone(),
            label: planned.item.label.clone(),
            days_remaining: planned.days_remaining,
            results: outcome,
        });
    }
    results
}
