// Chart fixture catalog: embedded arrays, stable accessors, external fixture directories.

mod embedded;
mod manifest;

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use serde::Serialize;

use crate::config::FixturesConfig;
use crate::error::FixtureError;
use crate::models::{Granularity, MetricPoint, TimeSeriesSnapshot};

/// One named fixture array and the bucket width its snapshots are spaced at.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureSet {
    pub id: String,
    pub granularity: Granularity,
    pub description: String,
    pub snapshots: Vec<TimeSeriesSnapshot>,
}

/// Listing entry for GET /api/fixtures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSummary {
    pub id: String,
    pub granularity: Granularity,
    pub interval_ms: u64,
    pub description: String,
    pub snapshot_count: usize,
    pub series_keys: Vec<String>,
    /// RFC 3339 (UTC) of the first bucket; absent if the name is not a valid timestamp.
    pub start: Option<String>,
    pub end: Option<String>,
}

/// One series at one bucket, as returned by GET /api/fixtures/{id}/series/{key}.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint<'a> {
    pub name: &'a str,
    pub primary: &'a MetricPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aux: Option<&'a [MetricPoint]>,
}

impl FixtureSet {
    /// Series keys of the first snapshot.
    pub fn series_keys(&self) -> BTreeSet<&str> {
        self.snapshots
            .first()
            .map(TimeSeriesSnapshot::series_keys)
            .unwrap_or_default()
    }

    /// One series across every snapshot, in order. Snapshots lacking the key are skipped.
    pub fn series(&self, key: &str) -> Result<Vec<SeriesPoint<'_>>, FixtureError> {
        let points: Vec<SeriesPoint<'_>> = self
            .snapshots
            .iter()
            .filter_map(|s| {
                s.series(key).map(|m| SeriesPoint {
                    name: &s.name,
                    primary: &m.primary,
                    aux: m.aux.as_deref(),
                })
            })
            .collect();
        if points.is_empty() {
            return Err(FixtureError::UnknownSeries {
                fixture: self.id.clone(),
                series: key.to_string(),
            });
        }
        Ok(points)
    }

    pub fn summary(&self) -> FixtureSummary {
        let rfc3339 = |s: Option<&TimeSeriesSnapshot>| {
            s.and_then(|s| s.datetime().ok())
                .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        };
        FixtureSummary {
            id: self.id.clone(),
            granularity: self.granularity,
            interval_ms: self.granularity.interval_ms(),
            description: self.description.clone(),
            snapshot_count: self.snapshots.len(),
            series_keys: self.series_keys().into_iter().map(String::from).collect(),
            start: rfc3339(self.snapshots.first()),
            end: rfc3339(self.snapshots.last()),
        }
    }
}

/// Fixtures available to the server, in manifest order, ids unique.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    fixtures: Vec<Arc<FixtureSet>>,
}

impl Catalog {
    /// Builds a catalog from sets; rejects duplicate ids and empty sets.
    pub fn from_sets(sets: Vec<FixtureSet>) -> Result<Self, FixtureError> {
        let mut seen = BTreeSet::new();
        for set in &sets {
            if set.snapshots.is_empty() {
                return Err(FixtureError::EmptyFixture(set.id.clone()));
            }
            if !seen.insert(set.id.as_str()) {
                return Err(FixtureError::DuplicateFixture(set.id.clone()));
            }
        }
        Ok(Self {
            fixtures: sets.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parses the fixtures compiled into the binary.
    pub fn embedded() -> Result<Self, FixtureError> {
        let sets = manifest::load(embedded::MANIFEST, "embedded", |file| {
            embedded::file(file)
                .map(Cow::Borrowed)
                .ok_or_else(|| FixtureError::MissingFile(file.to_string()))
        })?;
        Self::from_sets(sets)
    }

    /// Loads `fixtures.toml` from `dir` and the JSON files it names (paths relative to `dir`).
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let dir = dir.as_ref();
        let manifest_path = dir.join(manifest::MANIFEST_FILE);
        let manifest = std::fs::read_to_string(&manifest_path).map_err(|source| {
            FixtureError::Io {
                path: manifest_path.clone(),
                source,
            }
        })?;
        let sets = manifest::load(&manifest, &manifest_path.display().to_string(), |file| {
            let path = dir.join(file);
            std::fs::read_to_string(&path)
                .map(Cow::Owned)
                .map_err(|source| FixtureError::Io { path, source })
        })?;
        let catalog = Self::from_sets(sets)?;
        tracing::info!(
            operation = "load_fixture_dir",
            dir = %dir.display(),
            fixtures_count = catalog.len(),
            "External fixtures loaded"
        );
        Ok(catalog)
    }

    /// Adds `other`'s fixtures; an id already present is replaced in place.
    pub fn merge(&mut self, other: Catalog) {
        for set in other.fixtures {
            match self.fixtures.iter_mut().find(|f| f.id == set.id) {
                Some(existing) => {
                    tracing::info!(fixture = %set.id, "External fixture replaces built-in one");
                    *existing = set;
                }
                None => self.fixtures.push(set),
            }
        }
    }

    /// Shared handle to one fixture; cloning it copies a pointer, not the snapshots.
    pub fn get(&self, id: &str) -> Result<&Arc<FixtureSet>, FixtureError> {
        self.fixtures
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| FixtureError::UnknownFixture(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FixtureSet> {
        self.fixtures.iter().map(Arc::as_ref)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.fixtures.iter().map(|f| f.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::embedded().unwrap_or_else(|e| panic!("embedded fixtures failed to parse: {}", e))
});

/// The built-in catalog, parsed on first access and shared for the life of the process.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Built-in fixtures with the configured external directory, if any, merged over them.
pub fn load_catalog(config: &FixturesConfig) -> Result<Catalog, FixtureError> {
    let mut catalog = catalog().clone();
    if let Some(dir) = &config.dir {
        catalog.merge(Catalog::load_dir(dir)?);
    }
    Ok(catalog)
}

fn builtin(id: &str) -> &'static [TimeSeriesSnapshot] {
    match catalog().get(id) {
        Ok(set) => &set.snapshots,
        Err(e) => panic!("built-in fixture missing: {}", e),
    }
}

/// Gateway success rate, last hour in 5 minute buckets.
pub fn last1hour5mins_data() -> &'static [TimeSeriesSnapshot] {
    builtin("last1hour5mins")
}

/// Gateway success rate, last 3 hours in 15 minute buckets.
pub fn last3hours15mins_data() -> &'static [TimeSeriesSnapshot] {
    builtin("last3hours15mins")
}

/// Gateway success rate, last 6 hours in 30 minute buckets.
pub fn last6hours30mins_data() -> &'static [TimeSeriesSnapshot] {
    builtin("last6hours30mins")
}

/// Gateway success rate, last 24 hours in hourly buckets.
pub fn last24hours_hourly_data() -> &'static [TimeSeriesSnapshot] {
    builtin("last24hoursHourly")
}

/// Gateway success rate, last 7 days in daily buckets.
pub fn last7days_daily_data() -> &'static [TimeSeriesSnapshot] {
    builtin("last7daysDaily")
}

/// Merchant success rate, last 24 hours in hourly buckets.
pub fn last24hours_merchants_hourly_data() -> &'static [TimeSeriesSnapshot] {
    builtin("last24hoursMerchantsHourly")
}
