use std::sync::Arc;

use amedas_fetcher::{merge, ErrorKind};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use log::{error, info};
use time::OffsetDateTime;

use crate::{
    templates::{dashboard_page, error_page, DashboardData},
    AppState,
};

/// Handler for the dashboard page (GET /)
///
/// Every load is a full pass: fetch the latest snapshot, join, color, render.
/// A failed fetch aborts the pass and shows an error page instead of a map.
pub async fn dashboard_handler(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = match state.snapshots.latest(OffsetDateTime::now_utc()).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            error!("error fetching snapshot: {}", err);
            let status = match err.kind() {
                ErrorKind::DataGap => StatusCode::SERVICE_UNAVAILABLE,
                ErrorKind::Fetch | ErrorKind::Parse => StatusCode::BAD_GATEWAY,
            };
            let page = error_page(&state.display, status, &err.to_string());
            return (status, Html(page.into_string())).into_response();
        }
    };

    let rows = merge(&snapshot.stations, &snapshot.observations, &state.ramp);
    info!(
        "rendering {} of {} stations for {}",
        rows.len(),
        snapshot.stations.len(),
        snapshot.time
    );

    let data = DashboardData {
        time: snapshot.time,
        station_count: snapshot.stations.len(),
        rows,
        ramp: state.ramp,
    };
    match dashboard_page(&state.display, &data) {
        Ok(page) => Html(page.into_string()).into_response(),
        Err(err) => {
            error!("error encoding map data: {}", err);
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            let page = error_page(&state.display, status, "failed to encode map data");
            (status, Html(page.into_string())).into_response()
        }
    }
}
