// Fixture loading and lookup errors

use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid fixture manifest {origin}: {source}")]
    Manifest {
        origin: String,
        source: toml::de::Error,
    },

    #[error("invalid fixture JSON in {file}: {source}")]
    Json {
        file: String,
        source: serde_json::Error,
    },

    #[error("fixture file {0} is not embedded")]
    MissingFile(String),

    #[error("duplicate fixture id: {0}")]
    DuplicateFixture(String),

    #[error("fixture {0} has no snapshots")]
    EmptyFixture(String),

    #[error("unknown fixture: {0}")]
    UnknownFixture(String),

    #[error("fixture {fixture} has no series {series}")]
    UnknownSeries { fixture: String, series: String },
}

impl IntoResponse for FixtureError {
    fn into_response(self) -> Response {
        let status = match self {
            FixtureError::UnknownFixture(_) | FixtureError::UnknownSeries { .. } => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
