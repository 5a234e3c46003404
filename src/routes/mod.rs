// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{Router, routing::get};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::fixtures::Catalog;
use crate::models::TimeSeriesSnapshot;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) live_tx: broadcast::Sender<TimeSeriesSnapshot>,
    pub(crate) ws_live_connections: Arc<AtomicUsize>,
    pub(crate) config: AppConfig,
}

pub fn app(
    catalog: Arc<Catalog>,
    live_tx: broadcast::Sender<TimeSeriesSnapshot>,
    ws_live_connections: Arc<AtomicUsize>,
    config: AppConfig,
) -> Router {
    let state = AppState {
        catalog,
        live_tx,
        ws_live_connections,
        config,
    };
    Router::new()
        .route("/", get(|| async { "gateway-charts: chart fixtures are up" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/fixtures", get(http::list_fixtures_handler)) // GET /api/fixtures
        .route("/api/fixtures/{id}", get(http::fixture_handler)) // GET /api/fixtures/{id}
        .route(
            "/api/fixtures/{id}/series/{key}",
            get(http::series_handler),
        ) // GET /api/fixtures/{id}/series/{key}
        .route(
            "/api/fixtures/{id}/validation",
            get(http::validation_handler),
        ) // GET /api/fixtures/{id}/validation
        .route("/ws/replay/{id}", get(ws::ws_replay)) // WS /ws/replay/{id}
        .route("/ws/live", get(ws::ws_live)) // WS /ws/live
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
