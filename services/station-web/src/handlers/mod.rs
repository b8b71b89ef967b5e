//! HTTP request handlers for the station web service.

pub mod archive;
pub mod health;
pub mod readings;
pub mod station;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Serialize;

use reading_protocol::{decode, Decoded};
use station_common::{StationConfig, StationError, StationResult};
use storage::encode_station;

use crate::metrics::record_missing_elements;
use crate::presenter::{present, StationView};
use crate::state::AppState;

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ErrorResponse {
    pub fn from_error(err: &StationError) -> Self {
        let status = err.http_status_code();
        let (type_, title) = match status {
            400 => ("invalid-parameter", "Bad Request"),
            404 => ("not-found", "Not Found"),
            503 => ("service-unavailable", "Service Unavailable"),
            _ => ("internal-error", "Internal Server Error"),
        };
        Self {
            type_: type_.to_string(),
            title: title.to_string(),
            status,
            detail: err.to_string(),
        }
    }
}

/// Map a station error to a JSON response with its HTTP status.
pub fn error_response(err: &StationError) -> Response {
    let body = ErrorResponse::from_error(err);
    let status =
        StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let json = serde_json::to_string(&body).unwrap_or_default();

    (status, [(header::CONTENT_TYPE, "application/json")], json).into_response()
}

/// Look up a configured station.
pub(crate) fn find_station<'a>(state: &'a AppState, id: &str) -> StationResult<&'a StationConfig> {
    state
        .stations
        .find(id)
        .ok_or_else(|| StationError::StationNotFound(id.to_string()))
}

/// Run one encode and decode pass for `station`.
pub(crate) async fn load_readings(state: &AppState, station: &StationConfig) -> Decoded {
    let payload = encode_station(state.source.as_ref(), station).await;
    let decoded = decode(&payload, station.kinds());
    record_missing_elements(&station.id, &decoded.report.missing);
    decoded
}

/// Encode, decode and present `station`.
pub(crate) async fn load_view(state: &AppState, station: &StationConfig) -> StationView {
    let decoded = load_readings(state, station).await;
    present(station, &decoded)
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
