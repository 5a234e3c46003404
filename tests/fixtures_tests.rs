// Built-in fixture integrity, accessors, and external fixture directories

mod common;

use gateway_charts::config::{AppConfig, FixturesConfig};
use gateway_charts::error::FixtureError;
use gateway_charts::fixtures::{self, Catalog};
use gateway_charts::models::{Granularity, MetricKind, TimeSeriesSnapshot};
use gateway_charts::validate::validate_catalog;

fn accessors() -> Vec<(&'static str, &'static [TimeSeriesSnapshot])> {
    vec![
        ("last1hour5mins", fixtures::last1hour5mins_data()),
        ("last3hours15mins", fixtures::last3hours15mins_data()),
        ("last6hours30mins", fixtures::last6hours30mins_data()),
        ("last24hoursHourly", fixtures::last24hours_hourly_data()),
        ("last7daysDaily", fixtures::last7days_daily_data()),
        (
            "last24hoursMerchantsHourly",
            fixtures::last24hours_merchants_hourly_data(),
        ),
    ]
}

#[test]
fn builtin_catalog_lists_every_fixture_in_manifest_order() {
    let ids: Vec<&str> = fixtures::catalog().ids().collect();
    let expected: Vec<&str> = accessors().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn every_accessor_is_non_empty() {
    for (id, data) in accessors() {
        assert!(!data.is_empty(), "{id} is empty");
    }
}

#[test]
fn every_name_is_a_positive_epoch_timestamp() {
    for (id, data) in accessors() {
        for s in data {
            let ts = s
                .timestamp_ms()
                .unwrap_or_else(|e| panic!("{id}: {e}"));
            assert!(ts > 0);
        }
    }
}

#[test]
fn timestamps_strictly_increase_at_declared_interval() {
    for set in fixtures::catalog().iter() {
        let expected = set.granularity.interval_ms();
        for pair in set.snapshots.windows(2) {
            let a = pair[0].timestamp_ms().unwrap();
            let b = pair[1].timestamp_ms().unwrap();
            assert!(b > a, "{}: {} then {}", set.id, a, b);
            assert_eq!(b - a, expected, "{}: spacing", set.id);
        }
    }
}

#[test]
fn five_minute_fixture_is_spaced_300000_ms() {
    let set = fixtures::catalog().get("last1hour5mins").unwrap();
    assert_eq!(set.granularity, Granularity::FiveMinutes);
    let data = fixtures::last1hour5mins_data();
    for pair in data.windows(2) {
        assert_eq!(
            pair[1].timestamp_ms().unwrap() - pair[0].timestamp_ms().unwrap(),
            300_000
        );
    }
}

#[test]
fn rates_lie_within_0_and_100_and_counts_are_whole() {
    for (id, data) in accessors() {
        for s in data {
            for (key, metric) in &s.data {
                for point in metric.points() {
                    match point.kind() {
                        MetricKind::Rate => assert!(
                            (0.0..=100.0).contains(&point.val),
                            "{id} {} {key}: {}",
                            s.name,
                            point.val
                        ),
                        MetricKind::Count => assert!(
                            point.val >= 0.0 && point.val.fract() == 0.0,
                            "{id} {} {key}: {}",
                            s.name,
                            point.val
                        ),
                        MetricKind::Other => {}
                    }
                }
            }
        }
    }
}

#[test]
fn series_keys_identical_across_snapshots() {
    for (id, data) in accessors() {
        let first = data[0].series_keys();
        assert!(first.contains("Overall"), "{id} lacks Overall");
        for s in data {
            assert_eq!(s.series_keys(), first, "{id} at {}", s.name);
        }
    }
}

#[test]
fn builtin_catalog_passes_validation() {
    for report in validate_catalog(fixtures::catalog()) {
        assert!(report.is_ok(), "{}: {:?}", report.fixture, report.violations);
    }
}

#[test]
fn first_five_minute_snapshot_has_known_overall_values() {
    for _ in 0..3 {
        let first = &fixtures::last1hour5mins_data()[0];
        assert_eq!(first.name, "1759774200000");
        let overall = first.series("Overall").unwrap();
        assert_eq!(overall.primary.val, 28.16);
        assert_eq!(overall.aux.as_ref().unwrap()[0].val, 103.0);
    }
}

#[test]
fn accessors_return_the_same_slice_every_time() {
    let a = fixtures::last1hour5mins_data();
    let b = fixtures::last1hour5mins_data();
    assert!(std::ptr::eq(a, b));
    assert!(std::ptr::eq(fixtures::catalog(), fixtures::catalog()));
}

#[test]
fn merchant_fixture_uses_merchant_series() {
    let keys = fixtures::last24hours_merchants_hourly_data()[0].series_keys();
    assert!(keys.contains("ACME_RETAIL"));
    assert!(!keys.contains("RAZORPAY"));
}

#[test]
fn unknown_fixture_lookup_fails() {
    let err = fixtures::catalog().get("last10years").unwrap_err();
    assert!(matches!(err, FixtureError::UnknownFixture(ref id) if id == "last10years"));
}

#[test]
fn series_projection_follows_snapshot_order() {
    let set = fixtures::catalog().get("last1hour5mins").unwrap();
    let points = set.series("RAZORPAY").unwrap();
    assert_eq!(points.len(), set.snapshots.len());
    assert_eq!(points[0].name, "1759774200000");
    assert!(matches!(
        set.series("STRIPE"),
        Err(FixtureError::UnknownSeries { .. })
    ));
}

#[test]
fn summary_reports_range_and_series() {
    let summary = fixtures::catalog().get("last1hour5mins").unwrap().summary();
    assert_eq!(summary.interval_ms, 300_000);
    assert_eq!(summary.snapshot_count, 12);
    assert_eq!(summary.start.as_deref(), Some("2025-10-06T18:10:00.000Z"));
    assert_eq!(summary.end.as_deref(), Some("2025-10-06T19:05:00.000Z"));
    assert!(summary.series_keys.contains(&"Overall".to_string()));
}

#[test]
fn from_sets_rejects_duplicates_and_empty_sets() {
    let a = common::fixture_set("a", Granularity::Hourly, 3);
    let err = Catalog::from_sets(vec![a.clone(), a.clone()]).unwrap_err();
    assert!(matches!(err, FixtureError::DuplicateFixture(_)));

    let empty = common::fixture_set("empty", Granularity::Hourly, 0);
    let err = Catalog::from_sets(vec![empty]).unwrap_err();
    assert!(matches!(err, FixtureError::EmptyFixture(_)));
}

const MANIFEST: &str = r#"
[[fixture]]
id = "custom"
file = "custom.json"
granularity = "1h"
description = "custom hourly"

[[fixture]]
id = "last1hour5mins"
file = "override.json"
granularity = "5 mins"
"#;

fn write_fixture_dir(dir: &std::path::Path) {
    let custom = common::fixture_set("custom", Granularity::Hourly, 4);
    let override_set = common::fixture_set("last1hour5mins", Granularity::FiveMinutes, 2);
    std::fs::write(dir.join("fixtures.toml"), MANIFEST).unwrap();
    std::fs::write(
        dir.join("custom.json"),
        serde_json::to_string(&custom.snapshots).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.join("override.json"),
        serde_json::to_string(&override_set.snapshots).unwrap(),
    )
    .unwrap();
}

#[test]
fn load_dir_reads_manifest_and_arrays() {
    let dir = tempfile::TempDir::new().unwrap();
    write_fixture_dir(dir.path());
    let catalog = Catalog::load_dir(dir.path()).unwrap();
    assert_eq!(catalog.len(), 2);
    let custom = catalog.get("custom").unwrap();
    assert_eq!(custom.granularity, Granularity::Hourly);
    assert_eq!(custom.description, "custom hourly");
    assert_eq!(custom.snapshots.len(), 4);
}

#[test]
fn merge_adds_new_ids_and_replaces_existing_ones() {
    let dir = tempfile::TempDir::new().unwrap();
    write_fixture_dir(dir.path());
    let mut catalog = fixtures::catalog().clone();
    let builtin_count = catalog.len();
    catalog.merge(Catalog::load_dir(dir.path()).unwrap());
    assert_eq!(catalog.len(), builtin_count + 1);
    assert_eq!(catalog.get("last1hour5mins").unwrap().snapshots.len(), 2);
    assert!(catalog.get("custom").is_ok());
    // The shared built-in catalog is untouched.
    assert_eq!(fixtures::last1hour5mins_data().len(), 12);
}

#[test]
fn load_dir_without_manifest_is_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = Catalog::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, FixtureError::Io { .. }));
}

#[test]
fn load_dir_reports_bad_manifest_json_and_empty_arrays() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("fixtures.toml"), "[[fixture]]\nid = 1").unwrap();
    assert!(matches!(
        Catalog::load_dir(dir.path()).unwrap_err(),
        FixtureError::Manifest { .. }
    ));

    let manifest = "[[fixture]]\nid = \"x\"\nfile = \"x.json\"\ngranularity = \"1d\"\n";
    std::fs::write(dir.path().join("fixtures.toml"), manifest).unwrap();
    std::fs::write(dir.path().join("x.json"), "{ not json").unwrap();
    assert!(matches!(
        Catalog::load_dir(dir.path()).unwrap_err(),
        FixtureError::Json { .. }
    ));

    std::fs::write(dir.path().join("x.json"), "[]").unwrap();
    assert!(matches!(
        Catalog::load_dir(dir.path()).unwrap_err(),
        FixtureError::EmptyFixture(_)
    ));
}

#[test]
fn load_dir_rejects_unknown_granularity() {
    let dir = tempfile::TempDir::new().unwrap();
    let manifest = "[[fixture]]\nid = \"x\"\nfile = \"x.json\"\ngranularity = \"weekly\"\n";
    std::fs::write(dir.path().join("fixtures.toml"), manifest).unwrap();
    assert!(matches!(
        Catalog::load_dir(dir.path()).unwrap_err(),
        FixtureError::Manifest { .. }
    ));
}

#[test]
fn load_dir_rejects_duplicate_ids() {
    let dir = tempfile::TempDir::new().unwrap();
    let set = common::fixture_set("twice", Granularity::Hourly, 2);
    let manifest = "[[fixture]]\nid = \"twice\"\nfile = \"a.json\"\ngranularity = \"1h\"\n\n\
                    [[fixture]]\nid = \"twice\"\nfile = \"a.json\"\ngranularity = \"1h\"\n";
    std::fs::write(dir.path().join("fixtures.toml"), manifest).unwrap();
    std::fs::write(
        dir.path().join("a.json"),
        serde_json::to_string(&set.snapshots).unwrap(),
    )
    .unwrap();
    let err = Catalog::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, FixtureError::DuplicateFixture(ref id) if id == "twice"));
}

#[test]
fn get_hands_out_shared_fixture() {
    let catalog = fixtures::catalog().clone();
    let a = catalog.get("last1hour5mins").unwrap().clone();
    let b = catalog.get("last1hour5mins").unwrap().clone();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert!(std::sync::Arc::ptr_eq(
        &a,
        fixtures::catalog().get("last1hour5mins").unwrap()
    ));
}

#[test]
fn load_catalog_without_dir_is_builtin() {
    let catalog = fixtures::load_catalog(&FixturesConfig::default()).unwrap();
    assert!(catalog.ids().eq(fixtures::catalog().ids()));
}

#[test]
fn load_catalog_overlays_configured_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    write_fixture_dir(dir.path());
    let config = FixturesConfig {
        dir: Some(dir.path().display().to_string()),
        ..FixturesConfig::default()
    };
    let catalog = fixtures::load_catalog(&config).unwrap();
    assert_eq!(catalog.len(), fixtures::catalog().len() + 1);
    assert_eq!(catalog.get("last1hour5mins").unwrap().snapshots.len(), 2);
    assert!(catalog.get("custom").is_ok());
}

#[test]
fn load_catalog_fails_on_missing_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = FixturesConfig {
        dir: Some(dir.path().join("absent").display().to_string()),
        ..FixturesConfig::default()
    };
    assert!(matches!(
        fixtures::load_catalog(&config),
        Err(FixtureError::Io { .. })
    ));
}

#[test]
fn unknown_replay_fixture_is_rejected_after_loading() {
    let config = AppConfig::load_from_str(
        "[server]\nhost = \"127.0.0.1\"\nport = 8090\n\n\
         [replay]\nfixture = \"last10years\"\ninterval_ms = 1000\nbroadcast_capacity = 8\n\n\
         [monitoring]\nstats_log_interval_secs = 60\n",
    )
    .unwrap();
    let catalog = fixtures::load_catalog(&config.fixtures).unwrap();
    assert!(matches!(
        catalog.get(&config.replay.fixture),
        Err(FixtureError::UnknownFixture(_))
    ));
}
