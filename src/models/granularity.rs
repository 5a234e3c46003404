// Bucket width of a fixture array

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Spacing between consecutive snapshots; serializes as "5m", "15m", "30m", "1h", "1d".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Granularity {
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    Hourly,
    Daily,
}

impl Granularity {
    pub const ALL: [Granularity; 5] = [
        Granularity::FiveMinutes,
        Granularity::FifteenMinutes,
        Granularity::ThirtyMinutes,
        Granularity::Hourly,
        Granularity::Daily,
    ];

    pub fn interval_ms(self) -> u64 {
        match self {
            Granularity::FiveMinutes => 5 * 60 * 1000,
            Granularity::FifteenMinutes => 15 * 60 * 1000,
            Granularity::ThirtyMinutes => 30 * 60 * 1000,
            Granularity::Hourly => 60 * 60 * 1000,
            Granularity::Daily => 24 * 60 * 60 * 1000,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::FiveMinutes => "5m",
            Granularity::FifteenMinutes => "15m",
            Granularity::ThirtyMinutes => "30m",
            Granularity::Hourly => "1h",
            Granularity::Daily => "1d",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    /// Accepts the short form ("5m") and the dashboard's labels ("5 mins", "hourly").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5m" | "5 mins" | "5min" | "5mins" => Ok(Granularity::FiveMinutes),
            "15m" | "15 mins" | "15min" | "15mins" => Ok(Granularity::FifteenMinutes),
            "30m" | "30 mins" | "30min" | "30mins" => Ok(Granularity::ThirtyMinutes),
            "1h" | "hourly" | "1 hour" => Ok(Granularity::Hourly),
            "1d" | "daily" | "1 day" => Ok(Granularity::Daily),
            other => Err(format!("unknown granularity: {:?}", other)),
        }
    }
}

impl TryFrom<String> for Granularity {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Granularity> for String {
    fn from(g: Granularity) -> Self {
        g.as_str().to_string()
    }
}
