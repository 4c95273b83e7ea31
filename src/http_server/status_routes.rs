//! Status HTTP Routes
//!
//! The HTML status page, its JSON twin and a liveness check. Every handler
//! answers 200 no matter how many dependencies are down.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;

use crate::report::{ReportSnapshot, StatusReporter};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// JSON view of a snapshot
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub snapshot: ReportSnapshot,
    pub status: BTreeMap<&'static str, bool>,
}

impl From<ReportSnapshot> for StatusResponse {
    fn from(snapshot: ReportSnapshot) -> Self {
        Self {
            status: snapshot.status_map(),
            snapshot,
        }
    }
}

/// Status page routes with shared reporter
pub fn status_routes(reporter: Arc<StatusReporter>) -> Router {
    Router::new()
        .route("/", any(page_handler))
        .route("/status.json", get(json_handler))
        .with_state(reporter)
}

/// Liveness route, independent of dependency state
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn page_handler(State(reporter): State<Arc<StatusReporter>>) -> impl IntoResponse {
    let document = reporter.probe_and_render().await;
    (StatusCode::OK, Html(document.into_string()))
}

async fn json_handler(State(reporter): State<Arc<StatusReporter>>) -> impl IntoResponse {
    let snapshot = reporter.snapshot().await;
    (StatusCode::OK, Json(StatusResponse::from(snapshot)))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
