// One time bucket of chart data: epoch-ms name + series map

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SeriesMetric;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("snapshot name {0:?} is not an integer epoch timestamp")]
    NotInteger(String),
    #[error("snapshot name {0:?} is not a positive epoch timestamp")]
    NotPositive(String),
    #[error("snapshot timestamp {0} ms is out of range")]
    OutOfRange(u64),
}

/// Metrics for every tracked series at one bucket start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesSnapshot {
    /// Bucket start as a decimal epoch-millisecond string, e.g. `"1759774200000"`.
    pub name: String,
    pub data: BTreeMap<String, SeriesMetric>,
}

impl TimeSeriesSnapshot {
    /// Parses `name` as plain decimal digits; a sign or leading zero is rejected.
    pub fn timestamp_ms(&self) -> Result<u64, TimestampError> {
        let name = self.name.as_str();
        if name == "0" {
            return Err(TimestampError::NotPositive(self.name.clone()));
        }
        if name.is_empty() || name.starts_with('0') || !name.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(TimestampError::NotInteger(self.name.clone()));
        }
        // Only overflow can fail past the digit check.
        name.parse()
            .map_err(|_| TimestampError::NotInteger(self.name.clone()))
    }

    pub fn datetime(&self) -> Result<DateTime<Utc>, TimestampError> {
        let ts = self.timestamp_ms()?;
        i64::try_from(ts)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .ok_or(TimestampError::OutOfRange(ts))
    }

    pub fn series(&self, key: &str) -> Option<&SeriesMetric> {
        self.data.get(key)
    }

    pub fn series_keys(&self) -> BTreeSet<&str> {
        self.data.keys().map(String::as_str).collect()
    }
}
