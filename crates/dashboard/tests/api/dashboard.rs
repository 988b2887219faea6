use crate::helpers::{mock_snapshot, spawn_app, MockSnapshotSource};
use amedas_fetcher::Error;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use std::sync::Arc;
use time::OffsetDateTime;
use tower::ServiceExt;

async fn get_dashboard(snapshots: MockSnapshotSource) -> (StatusCode, String) {
    let test_app = spawn_app(Arc::new(snapshots)).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();

    let response: Response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// The dashboard draws only stations with a 24-hour reading, colored from the ramp
#[tokio::test]
async fn dashboard_renders_stations_with_rainfall() {
    let mut snapshots = MockSnapshotSource::new();
    snapshots
        .expect_latest()
        .times(1)
        .returning(|_| Ok(mock_snapshot()));

    let (status, html) = get_dashboard(snapshots).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>10分間雨量</title>"));
    assert!(html.contains("2024-07-01 12:30 JST"));
    assert!(html.contains("1 / 2"));
    assert!(html.contains(r#""kjName":"宗谷岬""#));
    assert!(html.contains(r#""precipitation24h":50.0"#));
    // ramp index floor(256 * 50 / 200) = 64
    assert!(html.contains(r#""fillColor":[93,200,99]"#));
    assert!(!html.contains("トウキョウ"));
    assert!(html.contains("deck.ColumnLayer"));
}

/// Each page load asks for the snapshot current at request time
#[tokio::test]
async fn dashboard_requests_snapshot_for_now() {
    let mut snapshots = MockSnapshotSource::new();
    snapshots
        .expect_latest()
        .withf(|now| (OffsetDateTime::now_utc() - *now).whole_seconds().abs() < 60)
        .times(1)
        .returning(|_| Ok(mock_snapshot()));

    let (status, _) = get_dashboard(snapshots).await;

    assert_eq!(status, StatusCode::OK);
}

/// An unpublished snapshot aborts the pass with 503 and no map
#[tokio::test]
async fn unpublished_snapshot_shows_error_page() {
    let mut snapshots = MockSnapshotSource::new();
    snapshots.expect_latest().times(1).returning(|_| {
        Err(Error::SnapshotUnavailable {
            stamp: "20240701124000".to_string(),
        })
    });

    let (status, html) = get_dashboard(snapshots).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(html.contains("snapshot 20240701124000 has not been published yet"));
    assert!(!html.contains("column-map"));
}

/// Upstream failures abort the pass with 502
#[tokio::test]
async fn upstream_failure_shows_bad_gateway() {
    let mut snapshots = MockSnapshotSource::new();
    snapshots.expect_latest().times(1).returning(|_| {
        Err(Error::Status {
            url: "https://www.jma.go.jp/bosai/amedas/const/amedastable.json".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        })
    });

    let (status, html) = get_dashboard(snapshots).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains("amedastable.json"));
}

/// A body that is not JSON is a parse failure, also 502
#[tokio::test]
async fn malformed_feed_shows_bad_gateway() {
    let mut snapshots = MockSnapshotSource::new();
    snapshots.expect_latest().times(1).returning(|_| {
        Err(Error::Parse {
            url: "https://www.jma.go.jp/bosai/amedas/data/map/20240701123000.json".to_string(),
            source: serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
        })
    });

    let (status, html) = get_dashboard(snapshots).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains("failed to decode body"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let snapshots = MockSnapshotSource::new();
    let test_app = spawn_app(Arc::new(snapshots)).await;

    let request = Request::builder()
        .uri("/stations")
        .body(Body::empty())
        .unwrap();

    let response = test_app.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
