// Integrity checks for fixture arrays: timestamps, spacing, value ranges, series key sets.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::fixtures::{Catalog, FixtureSet};
use crate::models::MetricKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("fixture has no snapshots")]
    Empty,

    #[error("snapshot {index}: name {name:?} is not a positive epoch-ms timestamp")]
    InvalidTimestamp { index: usize, name: String },

    #[error("snapshot {index}: timestamp {current} does not follow {previous}")]
    NotIncreasing {
        index: usize,
        previous: u64,
        current: u64,
    },

    #[error("snapshot {index}: interval {actual_ms} ms, expected {expected_ms} ms")]
    IntervalMismatch {
        index: usize,
        expected_ms: u64,
        actual_ms: u64,
    },

    #[error("snapshot {index}: series {series} rate {val} outside [0, 100]")]
    RateOutOfRange {
        index: usize,
        series: String,
        val: f64,
    },

    #[error("snapshot {index}: series {series} {label} = {val} is not a non-negative integer")]
    InvalidCount {
        index: usize,
        series: String,
        label: String,
        val: f64,
    },

    #[error("snapshot {index}: series keys differ from first snapshot (missing {missing:?}, unexpected {unexpected:?})")]
    SeriesKeyMismatch {
        index: usize,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub fixture: String,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Checks every snapshot of `set` and collects all violations.
pub fn validate(set: &FixtureSet) -> ValidationReport {
    let mut violations = Vec::new();
    let Some(first) = set.snapshots.first() else {
        return ValidationReport {
            fixture: set.id.clone(),
            violations: vec![Violation::Empty],
        };
    };
    let expected_keys = first.series_keys();
    let expected_ms = set.granularity.interval_ms();
    let mut previous: Option<u64> = None;

    for (index, snapshot) in set.snapshots.iter().enumerate() {
        match snapshot.timestamp_ms() {
            Ok(current) => {
                if let Some(previous) = previous {
                    if current <= previous {
                        violations.push(Violation::NotIncreasing {
                            index,
                            previous,
                            current,
                        });
                    } else if current - previous != expected_ms {
                        violations.push(Violation::IntervalMismatch {
                            index,
                            expected_ms,
                            actual_ms: current - previous,
                        });
                    }
                }
                previous = Some(current);
            }
            Err(_) => {
                violations.push(Violation::InvalidTimestamp {
                    index,
                    name: snapshot.name.clone(),
                });
                // Spacing of the next snapshot cannot be judged against an invalid one.
                previous = None;
            }
        }

        let keys = snapshot.series_keys();
        if keys != expected_keys {
            violations.push(Violation::SeriesKeyMismatch {
                index,
                missing: difference(&expected_keys, &keys),
                unexpected: difference(&keys, &expected_keys),
            });
        }

        for (series, metric) in &snapshot.data {
            for point in metric.points() {
                match point.kind() {
                    MetricKind::Rate if !is_rate(point.val) => {
                        violations.push(Violation::RateOutOfRange {
                            index,
                            series: series.clone(),
                            val: point.val,
                        });
                    }
                    MetricKind::Count if !is_count(point.val) => {
                        violations.push(Violation::InvalidCount {
                            index,
                            series: series.clone(),
                            label: point.label.clone(),
                            val: point.val,
                        });
                    }
                    _ => {}
                }
            }
        }
    }

    ValidationReport {
        fixture: set.id.clone(),
        violations,
    }
}

/// Validates every fixture in catalog order.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationReport> {
    catalog.iter().map(validate).collect()
}

/// Logs each violation at WARN; errors out when `fail_on_invalid` is set and any fixture is invalid.
pub fn check_catalog(catalog: &Catalog, fail_on_invalid: bool) -> anyhow::Result<()> {
    let mut invalid = 0usize;
    for report in validate_catalog(catalog) {
        if report.is_ok() {
            tracing::debug!(fixture = %report.fixture, "Fixture valid");
            continue;
        }
        invalid += 1;
        for violation in &report.violations {
            tracing::warn!(
                operation = "validate_fixture",
                fixture = %report.fixture,
                "{}",
                violation
            );
        }
    }
    anyhow::ensure!(
        invalid == 0 || !fail_on_invalid,
        "{} fixture(s) failed validation",
        invalid
    );
    Ok(())
}

fn is_rate(val: f64) -> bool {
    val.is_finite() && (0.0..=100.0).contains(&val)
}

fn is_count(val: f64) -> bool {
    val.is_finite() && val >= 0.0 && val.fract() == 0.0
}

fn difference(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> Vec<String> {
    a.difference(b).map(|k| k.to_string()).collect()
}
