//! Archive image and gallery route tests against a scratch image root.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

use station_web::build_router;
use station_web::config::StationsConfig;
use station_web::state::AppState;
use storage::MemorySource;
use test_utils::{ferry_station, profiler_station, scratch_dir, touch};

fn app(image_root: &Path) -> Router {
    let stations = StationsConfig::new(vec![ferry_station(), profiler_station()]).unwrap();
    let state = AppState::new(Arc::new(MemorySource::new()), stations, image_root);
    build_router(Arc::new(state))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

// ============================================================================
// Profile images
// ============================================================================

#[tokio::test]
async fn test_archive_image_exists() {
    let root = scratch_dir();
    touch(root.path(), "cherrybranch/_20210305.png");

    let (status, json) = get_json(app(root.path()), "/stations/cherrybranch/archive?idate=20210305").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["exists"], true);
    assert_eq!(json["file"], "cherrybranch/_20210305.png");
    assert_eq!(json["idate"], "20210305");
    assert_eq!(json["status"], "");
}

#[tokio::test]
async fn test_archive_image_missing_is_status_not_error() {
    let root = scratch_dir();
    touch(root.path(), "cherrybranch/_20210305.png");

    let (status, json) = get_json(app(root.path()), "/stations/cherrybranch/archive?idate=20210306").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["exists"], false);
    assert_eq!(
        json["status"],
        "Profile image does not exist for Sat Mar 06 2021"
    );
}

#[tokio::test]
async fn test_archive_directory_is_not_an_image() {
    let root = scratch_dir();
    std::fs::create_dir_all(root.path().join("cherrybranch/_20210305.png")).unwrap();

    let (_, json) = get_json(app(root.path()), "/stations/cherrybranch/archive?idate=20210305").await;
    assert_eq!(json["exists"], false);
}

#[tokio::test]
async fn test_archive_outside_window_rejected() {
    let root = scratch_dir();

    let (status, json) = get_json(app(root.path()), "/stations/jlhaw/archive?idate=20180101").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"]
        .as_str()
        .unwrap()
        .contains("outside the archive window 20160501 to 20170726"));

    let (status, _) = get_json(app(root.path()), "/stations/cherrybranch/archive?idate=20190531").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_archive_malformed_idate_rejected() {
    let root = scratch_dir();
    for idate in ["2021-03-05", "20210230", "abc"] {
        let uri = format!("/stations/cherrybranch/archive?idate={}", idate);
        let (status, _) = get_json(app(root.path()), &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", idate);
    }
}

#[tokio::test]
async fn test_archive_unknown_station() {
    let root = scratch_dir();
    let (status, _) = get_json(app(root.path()), "/stations/nowhere/archive").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_archive_image_served() {
    let root = scratch_dir();
    let path = touch(root.path(), "cherrybranch/_20210305.png");
    std::fs::write(path, b"\x89PNG").unwrap();

    let response = app(root.path())
        .oneshot(
            Request::builder()
                .uri("/images/cherrybranch/_20210305.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Galleries
// ============================================================================

#[tokio::test]
async fn test_gallery_lists_images_sorted() {
    let root = scratch_dir();
    touch(root.path(), "cams/jlhaw/20170704/b.jpg");
    touch(root.path(), "cams/jlhaw/20170704/a.PNG");
    touch(root.path(), "cams/jlhaw/20170704/notes.txt");
    touch(root.path(), "cams/jlhaw/20170705/c.jpg");

    let (status, json) = get_json(app(root.path()), "/stations/jlhaw/gallery?idate=20170704").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["images"],
        serde_json::json!(["cams/jlhaw/20170704/a.PNG", "cams/jlhaw/20170704/b.jpg"])
    );
}

#[tokio::test]
async fn test_gallery_missing_day_is_empty() {
    let root = scratch_dir();

    let (status, json) = get_json(app(root.path()), "/stations/jlhaw/gallery?idate=20170101").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["images"], serde_json::json!([]));
}

#[tokio::test]
async fn test_station_without_gallery_is_empty() {
    let root = scratch_dir();

    let (status, json) = get_json(app(root.path()), "/stations/cherrybranch/gallery?idate=20210305").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["images"], serde_json::json!([]));
}
