//! Reminder message formatting.

use chrono::NaiveDate;
use serde::Serialize;

/// Title of every expiry reminder.
pub const REMINDER_TITLE: &str = "Asset expiry reminder";

/// Title of the channel test message.
pub const TEST_TITLE: &str = "Test notification";

/// A push message, independent of channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    /// Short title.
    pub title: String,
    /// Body text.
    pub body: String,
}

impl NotificationMessage {
    /// Create a message.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Reminder for one due item.
    pub fn expiry_reminder(display_name: &str, date: NaiveDate, days_remaining: i64) -> Self {
        Self::new(
            REMINDER_TITLE,
            format!(
                "Asset '{display_name}' {}\nExpiry date: {}",
                status_text(days_remaining),
                date.format("%Y-%m-%d")
            ),
        )
    }

    /// Fixed message used to verify channel credentials.
    pub fn test() -> Self {
        Self::new(
            TEST_TITLE,
            "This is a test notification from AssetHub. Your channel is configured correctly.",
        )
    }
}

/// Human-readable status for a remaining-days count.
pub fn status_text(days_remaining: i64) -> String {
    match days_remaining {
        0 => "due today".to_string(),
        1 => "1 day remaining".to_string(),
        n if n > 0 => format!("{n} days remaining"),
        -1 => "overdue by 1 day".to_string(),
        n => format!("overdue by {} days", n.unsigned_abs()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(3), "3 days remaining");
        assert_eq!(status_text(1), "1 day remaining");
        assert_eq!(status_text(0), "due today");
        assert_eq!(status_text(-1), "overdue by 1 day");
        assert_eq!(status_text(-12), "overdue by 12 days");
    }

    #[test]
    fn test_expiry_reminder_body() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let msg = NotificationMessage::expiry_reminder("web (example.com)", date, 3);
        assert_eq!(msg.title, REMINDER_TITLE);
        assert_eq!(
            msg.body,
            "Asset 'web (example.com)' 3 days remaining\nExpiry date: 2025-03-04"
        );
    }
}
