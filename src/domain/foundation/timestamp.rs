//! UTC timestamps for session bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point in time at which a session changed or a dispatch finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Rendering used in API responses.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_timestamps_order_after_earlier_ones() {
        let first = Timestamp::now();
        let second = Timestamp::now();
        assert!(first <= second);
    }

    #[test]
    fn round_trips_through_rfc3339_json() {
        let ts: Timestamp = serde_json::from_str("\"2025-03-01T08:15:00Z\"").unwrap();
        assert!(ts.to_rfc3339().starts_with("2025-03-01T08:15:00"));
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2025-03-01T08:15:00Z\"");
    }
}
