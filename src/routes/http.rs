// GET handlers: version, fixture listing, fixture data, series, validation

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::error::FixtureError;
use crate::fixtures::FixtureSummary;
use crate::validate::validate;

/// GET /version — service name and version from Cargo.toml at build time.
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/fixtures
pub(super) async fn list_fixtures_handler(State(state): State<AppState>) -> impl IntoResponse {
    let summaries: Vec<FixtureSummary> = state.catalog.iter().map(|f| f.summary()).collect();
    Json(summaries)
}

/// GET /api/fixtures/{id} — the snapshot array exactly as the charts consume it.
pub(super) async fn fixture_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, FixtureError> {
    let set = state.catalog.get(&id)?;
    Ok(Json(&set.snapshots).into_response())
}

/// GET /api/fixtures/{id}/series/{key}
pub(super) async fn series_handler(
    State(state): State<AppState>,
    Path((id, key)): Path<(String, String)>,
) -> Result<Response, FixtureError> {
    let set = state.catalog.get(&id)?;
    let points = set.series(&key)?;
    Ok(Json(points).into_response())
}

/// GET /api/fixtures/{id}/validation
pub(super) async fn validation_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, FixtureError> {
    let report = validate(state.catalog.get(&id)?);
    let violations: Vec<String> = report.violations.iter().map(ToString::to_string).collect();
    Ok(Json(serde_json::json!({
        "id": report.fixture,
        "ok": report.is_ok(),
        "violations": violations,
    }))
    .into_response())
}
