// Metric points and per-series values

use serde::{Deserialize, Serialize, Serializer};

/// Largest integer an f64 represents exactly; integral values up to this serialize as JSON integers.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

const RATE_WORDS: &[&str] = &["rate", "rates", "percent", "percentage"];
const COUNT_WORDS: &[&str] = &[
    "txn",
    "txns",
    "count",
    "counts",
    "volume",
    "transaction",
    "transactions",
];

/// One labelled value, e.g. `{ "label": "Success Rate", "val": 28.16 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub label: String,
    #[serde(serialize_with = "serialize_val")]
    pub val: f64,
}

/// What a point measures, judged from its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Percentage in [0, 100].
    Rate,
    /// Non-negative integer count.
    Count,
    Other,
}

impl MetricPoint {
    pub fn new(label: impl Into<String>, val: f64) -> Self {
        Self {
            label: label.into(),
            val,
        }
    }

    /// Judged on whole words, so "Generated Txns" is a count, not a rate.
    pub fn kind(&self) -> MetricKind {
        let label = self.label.to_lowercase();
        let words: Vec<&str> = label
            .split(|c: char| !c.is_alphanumeric() && c != '%')
            .filter(|w| !w.is_empty())
            .collect();
        if words
            .iter()
            .any(|w| RATE_WORDS.contains(w) || w.contains('%'))
        {
            MetricKind::Rate
        } else if words.iter().any(|w| COUNT_WORDS.contains(w)) {
            MetricKind::Count
        } else {
            MetricKind::Other
        }
    }
}

/// Headline value for a series plus optional supporting points (e.g. transaction volume).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMetric {
    pub primary: MetricPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux: Option<Vec<MetricPoint>>,
}

impl SeriesMetric {
    /// Primary point followed by every aux point.
    pub fn points(&self) -> impl Iterator<Item = &MetricPoint> {
        std::iter::once(&self.primary).chain(self.aux.iter().flatten())
    }
}

// Counts in the fixtures are written as `103`, not `103.0`.
fn serialize_val<S: Serializer>(val: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if val.is_finite() && val.fract() == 0.0 && val.abs() <= MAX_EXACT_INT {
        serializer.serialize_i64(*val as i64)
    } else {
        serializer.serialize_f64(*val)
    }
}
