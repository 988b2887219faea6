use std::sync::Arc;

use amedas_fetcher::{ColorRamp, SnapshotFetcher, SnapshotSource};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use log::info;

use crate::{dashboard_handler, display::DisplayConfig, Cli};

#[derive(Clone)]
pub struct AppState {
    pub display: DisplayConfig,
    pub snapshots: Arc<dyn SnapshotSource>,
    pub ramp: ColorRamp,
}

pub fn build_app_state(cli: &Cli, display: DisplayConfig) -> Result<AppState, anyhow::Error> {
    let feed = cli.feed_config();
    info!("  Observations: {}/{{stamp}}.json", feed.observation_base_url);
    info!("  Stations: {}", feed.station_table_url);
    if feed.station_cache_ttl.is_zero() {
        info!("  Station cache: off");
    } else {
        info!("  Station cache: {:?}", feed.station_cache_ttl);
    }

    let fetcher =
        SnapshotFetcher::new(feed).map_err(|e| anyhow!("error building http client: {}", e))?;

    Ok(AppState {
        display,
        snapshots: Arc::new(fetcher),
        ramp: ColorRamp::default(),
    })
}

pub fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
