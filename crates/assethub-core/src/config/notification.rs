//! Operator-level notification configuration.
//!
//! User-editable notification settings (lead time, trigger time, channel
//! credentials) live in the JSON document. This section holds the knobs an
//! operator sets once per deployment.

use serde::{Deserialize, Serialize};

/// Deployment settings for the expiry notification pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Offset of the business calendar from UTC, in hours.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i32,
    /// Allowed distance in minutes between now and the daily trigger time.
    #[serde(default = "default_tolerance")]
    pub tolerance_minutes: u32,
    /// Timeout for push service requests, in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Base URL of the Telegram Bot API.
    #[serde(default = "default_telegram_api_base")]
    pub telegram_api_base: String,
    /// Group name attached to Bark pushes.
    #[serde(default = "default_bark_group")]
    pub bark_group: String,
    /// Bearer secret required by the external cron endpoint, if set.
    #[serde(default)]
    pub cron_secret: Option<String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset(),
            tolerance_minutes: default_tolerance(),
            http_timeout_seconds: default_http_timeout(),
            telegram_api_base: default_telegram_api_base(),
            bark_group: default_bark_group(),
            cron_secret: None,
        }
    }
}

fn default_utc_offset() -> i32 {
    8
}

fn default_tolerance() -> u32 {
    5
}

fn default_http_timeout() -> u64 {
    10
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_bark_group() -> String {
    "Asset expiry".to_string()
}
