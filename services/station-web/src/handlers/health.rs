//! Health and metrics handlers.

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub source: String,
    pub source_status: String,
    pub stations: usize,
}

/// GET /health - Basic health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /ready - Readiness check (verifies reading source connectivity)
pub async fn ready_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let source_status = match state.source.ping().await {
        Ok(()) => "ok".to_string(),
        Err(e) => format!("error: {}", e),
    };

    let ready = source_status == "ok";
    let response = ReadyResponse {
        ready,
        source: state.source.name().to_string(),
        source_status,
        stations: state.stations.len(),
    };

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response)).into_response()
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let body = state
        .prometheus
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response()
}
