//! Business calendar and daily trigger window.
//!
//! Date keys, minute-of-day and expiry instants are all read in a
//! fixed-offset civil calendar (UTC+8 unless configured otherwise).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeDelta, Timelike, Utc};

use assethub_core::error::AppError;
use assethub_core::result::AppResult;

/// Milliseconds in one calendar day.
const DAY_MS: i64 = 86_400_000;

/// Default business calendar offset, in hours east of UTC.
pub const DEFAULT_OFFSET_HOURS: i32 = 8;

/// Fixed-offset civil calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCalendar {
    offset: FixedOffset,
}

impl BusinessCalendar {
    /// Calendar `hours` east of UTC.
    pub fn new(hours: i32) -> AppResult<Self> {
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
            .ok_or_else(|| AppError::configuration(format!("Invalid UTC offset: {hours} hours")))
    }

    /// The underlying offset.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// `now` as a wall-clock time in this calendar.
    pub fn local(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset)
    }

    /// Calendar date of `now`; the de-duplication date key.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.local(now).date_naive()
    }

    /// Minutes since local midnight.
    pub fn minute_of_day(&self, now: DateTime<Utc>) -> u32 {
        let local = self.local(now);
        local.hour() * 60 + local.minute()
    }

    /// The instant an expiry date starts: local midnight of that date.
    pub fn expiry_instant(&self, date: NaiveDate) -> DateTime<Utc> {
        let local_midnight = date.and_time(NaiveTime::MIN).and_utc();
        local_midnight - TimeDelta::seconds(i64::from(self.offset.local_minus_utc()))
    }

    /// Whole days from `now` until `date` expires, rounded up.
    ///
    /// Zero means the date is today (or expired less than a day ago);
    /// negative values count days overdue.
    pub fn days_remaining(&self, date: NaiveDate, now: DateTime<Utc>) -> i64 {
        let diff = (self.expiry_instant(date) - now).num_milliseconds();
        -(-diff).div_euclid(DAY_MS)
    }
}

impl Default for BusinessCalendar {
    /// UTC+8. Falls back to UTC only if the constant were out of range.
    fn default() -> Self {
        Self::new(DEFAULT_OFFSET_HOURS).unwrap_or(Self { offset: Utc.fix() })
    }
}

/// Daily trigger time, `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerTime {
    hour: u32,
    minute: u32,
}

impl TriggerTime {
    /// Build from hour and minute.
    pub fn new(hour: u32, minute: u32) -> AppResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(AppError::validation(format!(
                "Invalid notification time {hour}:{minute:02}"
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Minutes since midnight.
    pub fn minute_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

impl FromStr for TriggerTime {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::validation(format!("Invalid notification time '{s}', expected HH:MM"));
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str, max_len: usize| {
            !part.is_empty() && part.len() <= max_len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(h, 2) || m.len() != 2 || !digits(m, 2) {
            return Err(invalid());
        }
        let hour = h.parse().map_err(|_| invalid())?;
        let minute = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for TriggerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// The minutes around the trigger time during which a cycle may send.
///
/// The window does not wrap across midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerWindow {
    /// Daily trigger time.
    pub target: TriggerTime,
    /// Allowed distance, in minutes, on either side.
    pub tolerance: u32,
}

impl TriggerWindow {
    /// Create a window.
    pub fn new(target: TriggerTime, tolerance: u32) -> Self {
        Self { target, tolerance }
    }

    /// Signed distance from the trigger time in minutes (positive = after).
    pub fn diff(&self, minute_of_day: u32) -> i64 {
        i64::from(minute_of_day) - i64::from(self.target.minute_of_day())
    }

    /// Whether a minute of day falls inside the window.
    pub fn contains(&self, minute_of_day: u32) -> bool {
        self.diff(minute_of_day).abs() <= i64::from(self.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_crosses_utc_midnight() {
        let cal = BusinessCalendar::default();
        // 17:30 UTC is 01:30 the next day in UTC+8.
        let now = utc(2025, 3, 1, 17, 30);
        assert_eq!(cal.today(now), date(2025, 3, 2));
        assert_eq!(cal.minute_of_day(now), 90);
    }

    #[test]
    fn test_expiry_instant_is_local_midnight() {
        let cal = BusinessCalendar::default();
        assert_eq!(cal.expiry_instant(date(2025, 3, 2)), utc(2025, 3, 1, 16, 0));
    }

    #[test]
    fn test_days_remaining_rounds_up() {
        let cal = BusinessCalendar::default();
        // 09:00 local on 2025-03-01.
        let now = utc(2025, 3, 1, 1, 0);
        assert_eq!(cal.days_remaining(date(2025, 3, 4), now), 3);
        assert_eq!(cal.days_remaining(date(2025, 3, 2), now), 1);
        assert_eq!(cal.days_remaining(date(2025, 3, 1), now), 0);
        assert_eq!(cal.days_remaining(date(2025, 2, 28), now), -1);
        assert_eq!(cal.days_remaining(date(2025, 2, 20), now), -9);
    }

    #[test]
    fn test_days_remaining_at_exact_midnight() {
        let cal = BusinessCalendar::default();
        let now = cal.expiry_instant(date(2025, 3, 1));
        assert_eq!(cal.days_remaining(date(2025, 3, 4), now), 3);
        assert_eq!(cal.days_remaining(date(2025, 3, 1), now), 0);
    }

    #[test]
    fn test_default_is_utc_plus_eight() {
        assert_eq!(BusinessCalendar::default().offset().local_minus_utc(), 8 * 3600);
        let late_utc = Utc.with_ymd_and_hms(2025, 2, 28, 16, 30, 0).unwrap();
        assert_eq!(BusinessCalendar::default().today(late_utc), date(2025, 3, 1));
    }

    #[test]
    fn test_invalid_offset_rejected() {
        assert!(BusinessCalendar::new(30).is_err());
        assert_eq!(
            BusinessCalendar::new(-5).unwrap().offset().local_minus_utc(),
            -5 * 3600
        );
    }

    #[test]
    fn test_trigger_time_parse() {
        let t: TriggerTime = "09:00".parse().unwrap();
        assert_eq!(t.minute_of_day(), 540);
        assert_eq!("9:05".parse::<TriggerTime>().unwrap().to_string(), "09:05");
        assert_eq!("23:59".parse::<TriggerTime>().unwrap().minute_of_day(), 1439);

        for bad in ["", "24:00", "12:60", "12", "12:5", "ab:cd", "-1:00", "12:00:00"] {
            assert!(bad.parse::<TriggerTime>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_window_contains() {
        let window = TriggerWindow::new("09:00".parse().unwrap(), 5);
        assert!(window.contains(540));
        assert!(window.contains(535));
        assert!(window.contains(545));
        assert!(!window.contains(546));
        assert!(!window.contains(560));
        assert_eq!(window.diff(520), -20);
    }

    #[test]
    fn test_window_does_not_wrap_midnight() {
        let window = TriggerWindow::new("23:58".parse().unwrap(), 5);
        assert!(window.contains(1439));
        assert!(!window.contains(1));
    }
}
