// Shared test helpers

#![allow(dead_code)]

use std::collections::BTreeMap;

use gateway_charts::fixtures::FixtureSet;
use gateway_charts::models::*;

/// Series with a success-rate primary and a transaction-count aux point.
pub fn series(rate: f64, total: f64) -> SeriesMetric {
    SeriesMetric {
        primary: MetricPoint::new("Success Rate", rate),
        aux: Some(vec![MetricPoint::new("Total Txns", total)]),
    }
}

pub fn snapshot(name: &str, entries: &[(&str, SeriesMetric)]) -> TimeSeriesSnapshot {
    TimeSeriesSnapshot {
        name: name.to_string(),
        data: entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// `count` well-formed snapshots spaced at `granularity`, series Overall and RAZORPAY.
pub fn fixture_set(id: &str, granularity: Granularity, count: usize) -> FixtureSet {
    let start: u64 = 1_759_774_200_000;
    let snapshots = (0..count)
        .map(|i| {
            let ts = start + i as u64 * granularity.interval_ms();
            snapshot(
                &ts.to_string(),
                &[
                    ("Overall", series(50.0 + i as f64, 100.0)),
                    ("RAZORPAY", series(40.0, 60.0)),
                ],
            )
        })
        .collect();
    FixtureSet {
        id: id.to_string(),
        granularity,
        description: String::new(),
        snapshots,
    }
}
