//! Archive image and gallery handlers.

use axum::{
    extract::{Extension, Path, Query},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use station_common::{resolve_idate, StationConfig, StationResult};

use super::{error_response, find_station, today};
use crate::archive::{check_image, check_window, list_gallery};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ArchiveParams {
    /// Archive date, `YYYYMMDD`. Absent or empty selects today.
    pub idate: Option<String>,
}

fn select_date<'a>(
    state: &'a AppState,
    id: &str,
    params: &ArchiveParams,
) -> StationResult<(&'a StationConfig, NaiveDate)> {
    let station = find_station(state, id)?;
    let today = today();
    let date = resolve_idate(params.idate.as_deref(), today)?;
    check_window(station, date, today)?;
    Ok((station, date))
}

/// GET /stations/:id/archive
pub async fn archive_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ArchiveParams>,
) -> Response {
    match select_date(&state, &id, &params) {
        Ok((station, date)) => Json(check_image(&state.image_root, station, date).await).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /stations/:id/gallery
pub async fn gallery_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ArchiveParams>,
) -> Response {
    let (station, date) = match select_date(&state, &id, &params) {
        Ok(selected) => selected,
        Err(e) => return error_response(&e),
    };

    match list_gallery(&state.image_root, station, date).await {
        Ok(gallery) => Json(gallery).into_response(),
        Err(e) => {
            tracing::error!(station = %station.id, error = %e, "Failed to list gallery");
            error_response(&e)
        }
    }
}
