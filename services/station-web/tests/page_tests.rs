//! End-to-end tests for the station routes over an in-memory source.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

use reading_protocol::{InstrumentKind, Payload};
use station_web::build_router;
use station_web::config::StationsConfig;
use station_web::state::AppState;
use storage::MemorySource;
use test_utils::{
    ferry_scenario_payload, ferry_station, ferry_track_payload, profiler_payload,
    profiler_station, stations, touch,
};

async fn ferry_source(payload: &Payload) -> MemorySource {
    let source = MemorySource::new();
    source
        .load_payload(stations::FERRY_ID, payload)
        .await
        .unwrap();
    source
        .load_payload(stations::PROFILER_ID, &profiler_payload())
        .await
        .unwrap();
    source
}

fn app(source: MemorySource, image_root: &Path) -> Router {
    let stations = StationsConfig::new(vec![ferry_station(), profiler_station()]).unwrap();
    let state = AppState::new(Arc::new(source), stations, image_root);
    build_router(Arc::new(state))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

// ============================================================================
// Station page
// ============================================================================

#[tokio::test]
async fn test_ferry_scenario_text_table() {
    let images = tempfile::tempdir().unwrap();
    let app = app(ferry_source(&ferry_scenario_payload()).await, images.path());

    let (status, content_type, body) = get(app, "/stations/cherrybranch?f=text").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/plain"));

    assert!(body.contains("Wind Speed: 9.7 kts"), "{}", body);
    assert!(body.contains("Wind Direction (from): 354 (N)"));
    assert!(body.contains("Lat: 34 30.000 N"));
    assert!(body.contains("Lon: 77 30.000 W"));
    assert!(body.contains("Flow rate too slow: Water Quality Data may be unreliable"));
    assert!(body.contains("Water Temperature: 68.0 deg F (20 deg C)"));
    assert!(!body.contains("ALERT"));
}

#[tokio::test]
async fn test_ferry_scenario_html_page() {
    let images = tempfile::tempdir().unwrap();
    let app = app(ferry_source(&ferry_scenario_payload()).await, images.path());

    let (status, content_type, body) = get(app, "/stations/cherrybranch").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));

    assert!(body.contains("<td>Wind Speed</td><td>9.7 kts (11.2 mph)</td>"));
    assert!(body.contains("class=\"warning\""));
    assert!(body.contains("id=\"map_data\""));
    assert!(body.contains("Speed: 10.1 kts<br>Course: 181"));
    assert!(body.contains("data-min=\"20190601\""));
    assert!(!body.contains("role=\"alert\""));
}

#[tokio::test]
async fn test_profiler_page_shows_depth_block() {
    let images = tempfile::tempdir().unwrap();
    let app = app(ferry_source(&ferry_scenario_payload()).await, images.path());

    let (status, _, body) = get(app, "/stations/jlhaw?f=text").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Water Depth: 20.0 ft"));
    assert!(body.contains("Surface Temp: 76 Deg. F"));
    assert!(body.contains("Wind Speed: 4.9 kts\n"));
    assert!(!body.contains("Flow Rate"));
}

#[tokio::test]
async fn test_missing_kind_raises_visible_alert() {
    let images = tempfile::tempdir().unwrap();
    let source = ferry_source(&ferry_scenario_payload()).await;
    source
        .fail_kind(stations::FERRY_ID, InstrumentKind::Flow)
        .await;
    let app = app(source, images.path());

    let (status, _, body) = get(app.clone(), "/stations/cherrybranch").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("role=\"alert\">Failed to locate flow element</div>"));
    // The rest of the page still renders
    assert!(body.contains("<td>Water Temperature</td>"));
    assert!(!body.contains("Flow rate too slow"));

    let (_, _, text) = get(app, "/stations/cherrybranch?f=text").await;
    assert!(text.starts_with("ALERT: Failed to locate flow element\n"));
}

#[tokio::test]
async fn test_empty_source_alerts_every_kind() {
    let images = tempfile::tempdir().unwrap();
    let app = app(MemorySource::new(), images.path());

    let (status, _, body) = get(app, "/stations/cherrybranch?f=text").await;
    assert_eq!(status, StatusCode::OK);
    for kind in ["wind", "gps", "flow", "sonde"] {
        assert!(body.contains(&format!("ALERT: Failed to locate {} element", kind)));
    }
}

#[tokio::test]
async fn test_unknown_station_is_404_json() {
    let images = tempfile::tempdir().unwrap();
    let app = app(MemorySource::new(), images.path());

    let (status, content_type, body) = get(app, "/stations/atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type, "application/json");

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["type"], "not-found");
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_bad_format_and_idate_rejected() {
    let images = tempfile::tempdir().unwrap();
    let app = app(MemorySource::new(), images.path());

    let (status, _, _) = get(app.clone(), "/stations/cherrybranch?f=pdf").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = get(app, "/stations/cherrybranch?idate=2021-03-05").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_idate_selects_archive_image() {
    let images = tempfile::tempdir().unwrap();
    touch(images.path(), "jlhaw/AVP3_20170704.png");
    let app = app(ferry_source(&ferry_scenario_payload()).await, images.path());

    let (_, _, body) = get(app.clone(), "/stations/jlhaw?idate=20170704").await;
    assert!(body.contains("src=\"/images/jlhaw/AVP3_20170704.png\""));
    assert!(body.contains("<div id=\"img_status\"></div>"));

    // Past the deployment window: the last day is selected
    let (status, _, body) = get(app, "/stations/jlhaw?idate=20200101").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("value=\"20170726\""));
    assert!(body.contains("Profile image does not exist for Wed Jul 26 2017"));
}

// ============================================================================
// JSON routes
// ============================================================================

#[tokio::test]
async fn test_readings_payload() {
    let images = tempfile::tempdir().unwrap();
    let app = app(ferry_source(&ferry_track_payload(12)).await, images.path());

    let (status, content_type, body) = get(app, "/stations/cherrybranch/readings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");

    let payload = Payload::from_json(&body).unwrap();
    assert_eq!(payload.station, "cherrybranch");
    assert_eq!(payload.count(InstrumentKind::Gps), 12);
    assert_eq!(payload.elements[0].tag, "wind");
}

#[tokio::test]
async fn test_summary_map_markers() {
    let images = tempfile::tempdir().unwrap();
    let app = app(ferry_source(&ferry_track_payload(5)).await, images.path());

    let (status, _, body) = get(app, "/stations/cherrybranch/summary").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["missing"], serde_json::json!([]));

    let markers = json["map"]["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 6);
    assert_eq!(markers[5]["style"], "current");
    assert!(markers[..5].iter().all(|m| m["style"] == "history"));
    assert_eq!(json["map"]["zoom"], 12.0);

    let rows = json["table"]["rows"].as_array().unwrap();
    assert_eq!(rows[0]["type"], "value");
    assert_eq!(rows[0]["label"], "Wind Observation Time");
}

#[tokio::test]
async fn test_station_list() {
    let images = tempfile::tempdir().unwrap();
    let app = app(MemorySource::new(), images.path());

    let (status, _, body) = get(app, "/stations").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], "cherrybranch");
    assert_eq!(list[0]["variant"], "water_quality");
    assert_eq!(
        list[1]["kinds"],
        serde_json::json!(["wind", "gps", "depth"])
    );
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_ready_metrics() {
    let images = tempfile::tempdir().unwrap();
    let app = app(MemorySource::new(), images.path());

    let (status, _, body) = get(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"ok\""));

    let (status, _, body) = get(app.clone(), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["ready"], true);
    assert_eq!(json["source"], "memory");
    assert_eq!(json["stations"], 2);

    let (status, content_type, _) = get(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/plain"));
}
