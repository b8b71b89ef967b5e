//! Station Web Service Library
//!
//! Serves the latest readings of each configured monitoring station as an
//! HTML page (reading table, GPS track map, archive calendar), plus the raw
//! reading payload, a JSON summary and archive lookups.

pub mod archive;
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod presenter;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use state::AppState;

/// Build the service router over `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let images = ServeDir::new(&state.image_root);

    Router::new()
        // Stations
        .route("/stations", get(handlers::station::list_stations_handler))
        .route(
            "/stations/:id",
            get(handlers::station::station_page_handler),
        )
        .route(
            "/stations/:id/summary",
            get(handlers::station::summary_handler),
        )
        .route(
            "/stations/:id/readings",
            get(handlers::readings::readings_handler),
        )
        // Archive
        .route(
            "/stations/:id/archive",
            get(handlers::archive::archive_handler),
        )
        .route(
            "/stations/:id/gallery",
            get(handlers::archive::gallery_handler),
        )
        .nest_service("/images", images)
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
