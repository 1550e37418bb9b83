use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wall-clock timestamp in milliseconds since the UNIX epoch.
///
/// Used for commit dates, file edit times, and timeline events. Ordering is
/// plain numeric ordering of the millisecond value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from explicit milliseconds.
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(millis)
    }

    /// The epoch itself.
    pub const fn zero() -> Self {
        Self(0)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Convert to a UTC date-time. Out-of-range values clamp to the epoch.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        i64::try_from(self.0)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or_default()
    }

    /// Date in `git log` style, e.g. `Fri Oct 16 14:03:11 2026 +0000`.
    pub fn format_log(&self) -> String {
        self.to_datetime()
            .format("%a %b %-d %H:%M:%S %Y +0000")
            .to_string()
    }

    /// Time of day, e.g. `14:03:11`.
    pub fn format_clock(&self) -> String {
        self.to_datetime().format("%H:%M:%S").to_string()
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ms)", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_produces_reasonable_timestamp() {
        // After 2020-01-01 (1577836800000 ms).
        assert!(Timestamp::now().as_millis() > 1_577_836_800_000);
    }

    #[test]
    fn zero_is_smallest() {
        assert!(Timestamp::zero() < Timestamp::from_millis(1));
    }

    #[test]
    fn log_format_matches_git_style() {
        // 2021-01-01T00:00:00Z
        let ts = Timestamp::from_millis(1_609_459_200_000);
        assert_eq!(ts.format_log(), "Fri Jan 1 00:00:00 2021 +0000");
        assert_eq!(ts.format_clock(), "00:00:00");
    }

    #[test]
    fn out_of_range_clamps_to_epoch() {
        let ts = Timestamp::from_millis(u64::MAX);
        assert_eq!(ts.to_datetime(), DateTime::<Utc>::default());
    }

    #[test]
    fn serde_roundtrip() {
        let ts = Timestamp::from_millis(1234567890);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "1234567890");
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }
}
