//! Background scheduler configuration.

use serde::{Deserialize, Serialize};

/// Scheduled expiry check configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Whether the in-process scheduler is started with the server.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression (with seconds) for the check tick.
    #[serde(default = "default_cron")]
    pub cron: String,
    /// Run one check immediately when the scheduler starts.
    #[serde(default = "default_true")]
    pub run_on_start: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cron: default_cron(),
            run_on_start: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cron() -> String {
    "0 * * * * *".to_string()
}
