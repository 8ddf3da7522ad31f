//! Fixed-timezone day keys.
//!
//! The daily quarantine window is scoped to one timezone's notion of "day",
//! independent of where the process runs. `Calendar` holds the configured
//! timezone and turns instants into `DayKey` strings; the key changes
//! exactly at that timezone's midnight.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use readsync_types::ConfigError;

/// One calendar day in the configured timezone, e.g. `"2024-03-01"`.
///
/// Lexicographic order equals chronological order (the format is
/// zero-padded), which the ledger's retention pruning relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayKey(String);

impl DayKey {
    /// Borrow the underlying `YYYY-MM-DD` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The day immediately before this one, or None if the key does not
    /// parse as a date (keys produced by `Calendar` always parse).
    pub fn previous(&self) -> Option<DayKey> {
        let date = chrono::NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()?;
        let prev = date.pred_opt()?;
        Some(DayKey(prev.format("%Y-%m-%d").to_string()))
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Produces day keys for a single fixed timezone.
#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    tz: Tz,
}

impl Calendar {
    /// Create a calendar for the given timezone.
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Create a calendar from a tz database identifier such as
    /// `"Asia/Shanghai"`.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        let tz: Tz = name
            .parse()
            .map_err(|_| ConfigError::UnknownTimezone { name: name.to_string() })?;
        Ok(Self { tz })
    }

    /// The day key for "now".
    pub fn today(&self) -> DayKey {
        self.day_key(Utc::now())
    }

    /// The day key a given instant falls on. Pure; used by tests to pin
    /// day boundaries.
    pub fn day_key(&self, instant: DateTime<Utc>) -> DayKey {
        DayKey(instant.with_timezone(&self.tz).format("%Y-%m-%d").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn shanghai() -> Calendar {
        Calendar::from_name("Asia/Shanghai").expect("known timezone")
    }

    #[test]
    fn test_day_key_rolls_at_local_midnight() {
        let calendar = shanghai();

        // 23:59 local on 2024-03-01 (UTC+8)
        let before = Utc.with_ymd_and_hms(2024, 3, 1, 15, 59, 0).unwrap();
        // 00:00 local on 2024-03-02
        let after = Utc.with_ymd_and_hms(2024, 3, 1, 16, 0, 0).unwrap();

        assert_eq!(calendar.day_key(before).as_str(), "2024-03-01");
        assert_eq!(calendar.day_key(after).as_str(), "2024-03-02");
    }

    #[test]
    fn test_day_key_ignores_host_locale() {
        // Same instant, two calendars: the key depends only on the
        // configured timezone.
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();

        let shanghai = shanghai().day_key(instant);
        let utc = Calendar::from_name("UTC").expect("known timezone").day_key(instant);

        assert_eq!(shanghai.as_str(), "2024-03-02");
        assert_eq!(utc.as_str(), "2024-03-01");
    }

    #[test]
    fn test_previous_handles_month_and_leap_boundaries() {
        let calendar = shanghai();
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 1, 0, 0).unwrap();
        let day = calendar.day_key(instant);

        assert_eq!(day.previous().expect("parses").as_str(), "2024-02-29");
    }

    #[test]
    fn test_lexicographic_order_is_chronological() {
        let calendar = shanghai();
        let d1 = calendar.day_key(Utc.with_ymd_and_hms(2024, 3, 1, 1, 0, 0).unwrap());
        let d2 = calendar.day_key(Utc.with_ymd_and_hms(2024, 12, 31, 1, 0, 0).unwrap());
        assert!(d1 < d2);
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let err = Calendar::from_name("Mars/Olympus").unwrap_err();
        assert_eq!(err, ConfigError::UnknownTimezone { name: "Mars/Olympus".to_string() });
    }
}
