//! Station list, page and summary handlers.

use axum::{
    extract::{Extension, Path, Query},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use reading_protocol::{media_types, InstrumentKind};
use station_common::{format_idate, resolve_idate, StationError, StationVariant};

use super::{error_response, find_station, load_view, today};
use crate::archive::check_image;
use crate::metrics::record_page_load;
use crate::presenter::{render_page, Calendar, StationView};
use crate::state::AppState;

/// Entry in the station list.
#[derive(Debug, Serialize)]
pub struct StationSummary {
    pub id: String,
    pub title: String,
    pub variant: StationVariant,
    pub kinds: Vec<InstrumentKind>,
}

/// Query parameters for the station page.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    /// `html` (default) or `text`.
    pub f: Option<String>,

    /// Archive date, `YYYYMMDD`.
    pub idate: Option<String>,
}

/// GET /stations
pub async fn list_stations_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<StationSummary>> {
    let stations = state
        .stations
        .all()
        .iter()
        .map(|s| StationSummary {
            id: s.id.clone(),
            title: s.display_title().to_string(),
            variant: s.variant,
            kinds: s.kinds().to_vec(),
        })
        .collect();

    Json(stations)
}

/// GET /stations/:id
pub async fn station_page_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    let station = match find_station(&state, &id) {
        Ok(station) => station,
        Err(e) => return error_response(&e),
    };

    let format = params.f.as_deref().unwrap_or("html");
    if format != "html" && format != "text" {
        return error_response(&StationError::InvalidParameter {
            param: "f".to_string(),
            message: format!("unsupported format '{}'", format),
        });
    }

    // An out-of-window date selects the nearest day in the window
    let today = today();
    let selected = match resolve_idate(params.idate.as_deref(), today) {
        Ok(date) => station.archive.window().clamp(date, today),
        Err(e) => return error_response(&StationError::from(e)),
    };

    record_page_load(&station.id);
    let view = load_view(&state, station).await;
    debug!(station = %station.id, rows = view.table.rows().len(), format, "Rendering station page");

    if format == "text" {
        return (
            [(header::CONTENT_TYPE, media_types::TEXT)],
            render_text(&view),
        )
            .into_response();
    }

    let window = station.archive.window();
    let calendar = Calendar {
        min: format_idate(window.first),
        max: format_idate(window.last_or(today)),
        image: check_image(&state.image_root, station, selected).await,
    };

    (
        [(header::CONTENT_TYPE, media_types::HTML)],
        render_page(&view, &calendar).into_string(),
    )
        .into_response()
}

/// GET /stations/:id/summary
pub async fn summary_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match find_station(&state, &id) {
        Ok(station) => Json(load_view(&state, station).await).into_response(),
        Err(e) => error_response(&e),
    }
}

fn render_text(view: &StationView) -> String {
    let mut text = String::new();
    for alert in &view.alerts {
        text.push_str(&format!("ALERT: {}\n", alert));
    }
    if !view.alerts.is_empty() {
        text.push('\n');
    }
    text.push_str(&view.table.to_text());
    text
}
