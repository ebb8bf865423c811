//! Persisted image map with its write time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ImageMap;

/// Image map as stored by the cache store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// The cached mapping.
    pub data: ImageMap,
    /// When the mapping was written, stored as Unix milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl CacheRecord {
    /// Creates a new record.
    #[must_use]
    pub const fn new(data: ImageMap, timestamp: DateTime<Utc>) -> Self {
        Self { data, timestamp }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_is_millis() {
        let ts = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let record = CacheRecord::new(ImageMap::new(), ts);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["timestamp"], 1_700_000_000_123_i64);

        let back: CacheRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back.timestamp, ts);
    }
}
