// fixtures.toml: which JSON arrays make up a catalog and at what granularity

use std::borrow::Cow;

use serde::Deserialize;

use super::FixtureSet;
use crate::error::FixtureError;
use crate::models::{Granularity, TimeSeriesSnapshot};

pub(super) const MANIFEST_FILE: &str = "fixtures.toml";

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default, rename = "fixture")]
    fixtures: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    id: String,
    file: String,
    granularity: Granularity,
    #[serde(default)]
    description: String,
}

/// Parses the manifest and every JSON array it names, in manifest order.
/// `read` resolves a manifest `file` entry to its contents.
pub(super) fn load<F>(
    manifest: &str,
    origin: &str,
    mut read: F,
) -> Result<Vec<FixtureSet>, FixtureError>
where
    F: FnMut(&str) -> Result<Cow<'static, str>, FixtureError>,
{
    let manifest: Manifest =
        toml::from_str(manifest).map_err(|source| FixtureError::Manifest {
            origin: origin.to_string(),
            source,
        })?;

    let mut sets = Vec::with_capacity(manifest.fixtures.len());
    for entry in manifest.fixtures {
        let json = read(&entry.file)?;
        let snapshots: Vec<TimeSeriesSnapshot> =
            serde_json::from_str(&json).map_err(|source| FixtureError::Json {
                file: entry.file.clone(),
                source,
            })?;
        if snapshots.is_empty() {
            return Err(FixtureError::EmptyFixture(entry.id));
        }
        tracing::debug!(
            fixture = %entry.id,
            granularity = %entry.granularity,
            snapshots_count = snapshots.len(),
            "Fixture parsed"
        );
        sets.push(FixtureSet {
            id: entry.id,
            granularity: entry.granularity,
            description: entry.description,
            snapshots,
        });
    }
    Ok(sets)
}
