//! Raw reading payload handler.

use axum::{
    extract::{Extension, Path},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use reading_protocol::media_types;
use station_common::StationError;
use storage::encode_station;

use super::{error_response, find_station};
use crate::state::AppState;

/// GET /stations/:id/readings
///
/// The wire payload as the encoder produced it, before decoding.
pub async fn readings_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let station = match find_station(&state, &id) {
        Ok(station) => station,
        Err(e) => return error_response(&e),
    };

    let payload = encode_station(state.source.as_ref(), station).await;
    match payload.to_json() {
        Ok(json) => ([(header::CONTENT_TYPE, media_types::READINGS_JSON)], json).into_response(),
        Err(e) => error_response(&StationError::InternalError(e.to_string())),
    }
}
