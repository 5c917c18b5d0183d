//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use assethub_notify::NotificationResult;
use assethub_service::CycleOutcome;
use assethub_service::notification::{ChannelTestReport, CycleDebug, TestOutcome};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Whether the data file could be read.
    pub storage: String,
}

/// Number of records removed by a cascading delete.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    /// Assets removed along with the record.
    pub deleted_assets: usize,
}

/// Number of ledger entries removed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LedgerClearedResponse {
    /// Entries removed.
    pub removed: usize,
}

/// Result of one reminder cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResponse {
    /// The cycle ran, or was skipped because another one is running.
    pub success: bool,
    /// `completed`, `not_due`, `disabled` or `skipped`.
    pub status: &'static str,
    /// One-line summary.
    pub message: String,
    /// Window diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<CycleDebug>,
    /// Reminders delivered in this cycle.
    pub notifications: Vec<NotificationResult>,
}

impl From<CycleOutcome> for CheckResponse {
    fn from(outcome: CycleOutcome) -> Self {
        let message = outcome.message();
        let (success, status) = match &outcome {
            CycleOutcome::Completed { .. } => (true, "completed"),
            CycleOutcome::NotDue(_) => (false, "not_due"),
            CycleOutcome::Disabled => (false, "disabled"),
            CycleOutcome::Skipped => (true, "skipped"),
        };
        let debug = outcome.debug().cloned();
        let notifications = match outcome {
            CycleOutcome::Completed { notifications, .. } => notifications,
            _ => Vec::new(),
        };

        Self {
            success,
            status,
            message,
            debug,
            notifications,
        }
    }
}

/// Result of sending the test message.
#[derive(Debug, Clone, Serialize)]
pub struct TestResponse {
    /// The test was sent.
    pub success: bool,
    /// One-line summary.
    pub message: String,
    /// Per-channel results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ChannelTestReport>,
}

impl From<TestOutcome> for TestResponse {
    fn from(outcome: TestOutcome) -> Self {
        match outcome {
            TestOutcome::Disabled => Self {
                success: false,
                message: "notifications are disabled".to_string(),
                results: None,
            },
            TestOutcome::Sent(report) => Self {
                success: true,
                message: "test notification sent".to_string(),
                results: Some(report),
            },
        }
    }
}

/// Result of the cron trigger.
#[derive(Debug, Clone, Serialize)]
pub struct CronResponse {
    /// The trigger was accepted.
    pub success: bool,
    /// When the trigger ran.
    pub timestamp: DateTime<Utc>,
    /// Cycle result.
    pub result: CheckResponse,
}
