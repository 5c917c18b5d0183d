//! Expiry extraction from asset values.
//!
//! An asset's `values` blob is a JSON object of field index to raw string.
//! A raw string may carry one or more `label@YYYY-MM-DD` segments separated
//! by `|`, e.g. `example.com@2025-06-01|example.org@2025-09-30`.
//!
//! Segment rules:
//! - `|` always separates segments; there is no escaping.
//! - The label is everything before the `@`, trimmed. It may span lines. Empty labels and
//!   labels containing `@` are rejected.
//! - Whitespace between `@` and the date is tolerated.
//! - Dates that are not real calendar dates are skipped.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use assethub_core::types::AssetId;
use assethub_entity::Asset;

/// `label@date` within a single `|`-separated segment.
static SEGMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(.+?)@\s*(\d{4}-\d{2}-\d{2})").expect("Invalid segment regex")
});

/// One due date discovered on an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    /// Segment label, `None` for the asset-level expiry date.
    pub label: Option<String>,
    /// Expiry date.
    pub date: NaiveDate,
}

impl NotificationItem {
    /// Ledger key: the asset id, suffixed with `_label` for labeled items.
    pub fn dedup_key(&self, asset_id: AssetId) -> String {
        match &self.label {
            Some(label) => format!("{asset_id}_{label}"),
            None => asset_id.to_string(),
        }
    }

    /// Name shown in reminders: `asset (label)` or just `asset`.
    pub fn display_name(&self, asset_name: &str) -> String {
        match &self.label {
            Some(label) => format!("{asset_name} ({label})"),
            None => asset_name.to_string(),
        }
    }
}

/// Due items of an asset.
///
/// A usable asset-level expiry date wins and yields a single unlabeled item;
/// embedded segments are only consulted when there is none.
pub fn extract_items(asset: &Asset) -> Vec<NotificationItem> {
    if let Some(raw) = asset.direct_expiry() {
        return match parse_date(raw) {
            Some(date) => vec![NotificationItem { label: None, date }],
            None => {
                debug!(asset_id = %asset.id, expiry_date = raw, "Ignoring unparseable expiry date");
                Vec::new()
            }
        };
    }
    extract_segments(&asset.values)
}

/// Every valid `label@date` segment inside a `values` blob.
///
/// Non-JSON input is scanned as one raw string.
pub fn extract_segments(values: &str) -> Vec<NotificationItem> {
    match serde_json::from_str::<serde_json::Value>(values) {
        Ok(serde_json::Value::Object(fields)) => fields
            .values()
            .filter_map(serde_json::Value::as_str)
            .flat_map(scan_field)
            .collect(),
        Ok(serde_json::Value::String(raw)) => scan_field(&raw),
        Ok(_) => Vec::new(),
        Err(_) => scan_field(values),
    }
}

/// Bare dates of every embedded segment.
pub fn extract_dates(values: &str) -> Vec<NaiveDate> {
    extract_segments(values).into_iter().map(|i| i.date).collect()
}

/// The asset-level expiry date, or else the earliest embedded date.
pub fn earliest_expiry(asset: &Asset) -> Option<NaiveDate> {
    extract_items(asset).into_iter().map(|i| i.date).min()
}

fn scan_field(raw: &str) -> Vec<NotificationItem> {
    raw.split('|').filter_map(parse_segment).collect()
}

fn parse_segment(segment: &str) -> Option<NotificationItem> {
    let caps = SEGMENT_PATTERN.captures(segment.trim())?;
    let label = caps.get(1)?.as_str().trim();
    if label.is_empty() || label.contains('@') {
        return None;
    }
    let date = parse_date(caps.get(2)?.as_str())?;
    Some(NotificationItem {
        label: Some(label.to_string()),
        date,
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
