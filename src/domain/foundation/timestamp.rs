//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Local, Utc};
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

    /// Wall-clock label shown next to chat bubbles, in local time ("14:05").
    pub fn clock_label(&self) -> String {
        self.0.with_timezone(&Local).format("%H:%M").to_string()
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
    use chrono::TimeZone;

    #[test]
    fn timestamp_now_is_monotonic_enough() {
        let first = Timestamp::now();
        let second = Timestamp::now();
        assert!(first <= second);
    }

    #[test]
    fn clock_label_is_hours_and_minutes() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 1, 9, 7, 0).unwrap());
        let label = ts.clock_label();
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
        assert!(label.chars().filter(|c| c.is_ascii_digit()).count() == 4);
    }

    #[test]
    fn timestamp_serializes_transparently() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 1, 9, 7, 0).unwrap());
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-03-01T09:07:00Z\"");
    }
}
