//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an RFC 3339 string such as `2025-05-01T00:00:00Z`.
    pub fn parse_rfc3339(value: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Whole days from `from` until this timestamp, rounded up.
    ///
    /// A deadline later today counts as one day away; a deadline that
    /// passed earlier today counts as zero.
    pub fn days_until_ceil(&self, from: &Timestamp) -> i64 {
        let millis = self.duration_since(from).num_milliseconds();
        let day = Duration::days(1).num_milliseconds();
        // ceiling division that also rounds negative values toward +inf
        let q = millis / day;
        if millis % day > 0 {
            q + 1
        } else {
            q
        }
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + Duration::seconds(secs as i64))
    }

    /// Formats the date portion as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::thread::sleep;

    fn at(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_is_before_works_correctly() {
        let ts1 = Timestamp::now();
        sleep(std::time::Duration::from_millis(10));
        let ts2 = Timestamp::now();

        assert!(ts1.is_before(&ts2));
        assert!(!ts2.is_before(&ts1));
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let json = "\"2024-01-15T10:30:00Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();

        assert_eq!(ts.as_datetime().year(), 2024);
    }

    #[test]
    fn parse_rfc3339_rejects_garbage() {
        assert!(Timestamp::parse_rfc3339("next tuesday").is_none());
    }

    #[test]
    fn days_until_rounds_partial_days_up() {
        let now = at("2025-03-01T12:00:00Z");
        assert_eq!(at("2025-03-01T18:00:00Z").days_until_ceil(&now), 1);
        assert_eq!(at("2025-03-03T12:00:00Z").days_until_ceil(&now), 2);
        assert_eq!(at("2025-03-03T13:00:00Z").days_until_ceil(&now), 3);
    }

    #[test]
    fn days_until_is_zero_or_negative_for_past() {
        let now = at("2025-03-01T12:00:00Z");
        assert_eq!(at("2025-03-01T06:00:00Z").days_until_ceil(&now), 0);
        assert_eq!(at("2025-02-27T12:00:00Z").days_until_ceil(&now), -2);
    }

    #[test]
    fn add_days_and_plus_secs_shift_forward() {
        let ts = at("2025-03-01T00:00:00Z");
        assert_eq!(ts.add_days(2).date_string(), "2025-03-03");
        assert_eq!(ts.plus_secs(60).duration_since(&ts).num_seconds(), 60);
    }
}
