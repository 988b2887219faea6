use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, StatusCode};
use time::OffsetDateTime;

use crate::{
    latest_snapshot_time, parse_observations, parse_stations, Error, ObservationTable,
    SnapshotTime, StationCache, StationTable,
};

/// Base URL of the per-snapshot observation files
pub const DEFAULT_OBSERVATION_BASE_URL: &str = "https://www.jma.go.jp/bosai/amedas/data/map";

/// Station metadata table
pub const DEFAULT_STATION_TABLE_URL: &str =
    "https://www.jma.go.jp/bosai/amedas/const/amedastable.json";

/// Where to fetch from and how
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub observation_base_url: String,
    pub station_table_url: String,
    pub user_agent: String,
    /// Zero re-fetches the station table on every snapshot
    pub station_cache_ttl: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            observation_base_url: DEFAULT_OBSERVATION_BASE_URL.to_string(),
            station_table_url: DEFAULT_STATION_TABLE_URL.to_string(),
            user_agent: format!("amedas-map/{}", env!("CARGO_PKG_VERSION")),
            station_cache_ttl: Duration::ZERO,
        }
    }
}

impl FeedConfig {
    pub fn observation_url(&self, time: &SnapshotTime) -> Result<String, Error> {
        Ok(format!(
            "{}/{}.json",
            self.observation_base_url.trim_end_matches('/'),
            time.stamp()?
        ))
    }
}

/// Everything one rendering pass needs from the feed
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub time: SnapshotTime,
    pub observations: ObservationTable,
    pub stations: Arc<StationTable>,
}

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the latest snapshot expected to be published at `now`
    async fn latest(&self, now: OffsetDateTime) -> Result<Snapshot, Error>;
}

/// Thin GET-as-text wrapper that turns transport and status failures into [`Error`]
pub struct JsonFetcher {
    client: Client,
}

impl JsonFetcher {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(JsonFetcher { client })
    }

    pub async fn fetch_text(&self, url: &str) -> Result<String, Error> {
        debug!("requesting: {}", url);
        let request_error = |source| Error::Request {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }
        response.text().await.map_err(request_error)
    }
}

/// Fetches the observation snapshot and the station table from the JMA feed
pub struct SnapshotFetcher {
    config: FeedConfig,
    fetcher: JsonFetcher,
    stations: StationCache,
}

impl SnapshotFetcher {
    pub fn new(config: FeedConfig) -> Result<Self, reqwest::Error> {
        let fetcher = JsonFetcher::new(&config.user_agent)?;
        let stations = StationCache::new(config.station_cache_ttl);
        Ok(SnapshotFetcher {
            config,
            fetcher,
            stations,
        })
    }

    pub async fn observations(&self, time: &SnapshotTime) -> Result<ObservationTable, Error> {
        let url = self.config.observation_url(time)?;
        let body = match self.fetcher.fetch_text(&url).await {
            Err(Error::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                return Err(Error::SnapshotUnavailable {
                    stamp: time.stamp()?,
                });
            }
            other => other?,
        };
        let observations =
            parse_observations(&body).map_err(|source| Error::Parse { url, source })?;
        info!("snapshot {} has {} observations", time, observations.len());
        Ok(observations)
    }

    pub async fn stations(&self) -> Result<Arc<StationTable>, Error> {
        if let Some(cached) = self.stations.get(Instant::now()).await {
            return Ok(cached);
        }
        let url = &self.config.station_table_url;
        let body = self.fetcher.fetch_text(url).await?;
        let stations = parse_stations(&body).map_err(|source| Error::Parse {
            url: url.clone(),
            source,
        })?;
        info!("station table has {} stations", stations.len());
        let stations = Arc::new(stations);
        self.stations
            .store(Arc::clone(&stations), Instant::now())
            .await;
        Ok(stations)
    }
}

#[async_trait]
impl SnapshotSource for SnapshotFetcher {
    async fn latest(&self, now: OffsetDateTime) -> Result<Snapshot, Error> {
        let time = latest_snapshot_time(now);
        let observations = self.observations(&time).await?;
        let stations = self.stations().await?;
        Ok(Snapshot {
            time,
            observations,
            stations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use axum::{extract::Path, http::StatusCode as AxumStatus, routing::get, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use time::macros::datetime;

    const PUBLISHED: &str = "20240701123000.json";

    const SNAPSHOT: &str = r#"{
        "11001": {"temp": [12.3, 0], "precipitation24h": [12.0, 0]},
        "44132": {"temp": [28.4, 0], "precipitation24h": [null, 5]}
    }"#;

    const STATIONS: &str = r#"{
        "11001": {"type": "C", "elems": "11112010", "lat": [45, 31.2], "lon": [141, 56.1],
                  "alt": 26, "kjName": "宗谷岬", "knName": "ソウヤミサキ", "enName": "Cape Soya"},
        "44132": {"type": "A", "elems": "11111111", "lat": [35, 41.5], "lon": [139, 45.0],
                  "alt": 25, "kjName": "東京", "knName": "トウキョウ", "enName": "Tokyo"}
    }"#;

    struct Feed {
        base: String,
        station_hits: Arc<AtomicUsize>,
    }

    async fn spawn_feed(station_body: &'static str) -> Feed {
        let station_hits = Arc::new(AtomicUsize::new(0));
        let hits = Arc::clone(&station_hits);
        let app = Router::new()
            .route(
                "/map/{file}",
                get(|Path(file): Path<String>| async move {
                    if file == PUBLISHED {
                        Ok(SNAPSHOT)
                    } else {
                        Err(AxumStatus::NOT_FOUND)
                    }
                }),
            )
            .route(
                "/const/amedastable.json",
                get(move || {
                    let hits = Arc::clone(&hits);
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        station_body
                    }
                }),
            )
            .route(
                "/broken/{file}",
                get(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
            )
            .route(
                "/const/broken.json",
                get(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Feed {
            base: format!("http://{}", addr),
            station_hits,
        }
    }

    fn fetcher(feed: &Feed, station_path: &str, ttl: Duration) -> SnapshotFetcher {
        SnapshotFetcher::new(FeedConfig {
            observation_base_url: format!("{}/map/", feed.base),
            station_table_url: format!("{}{}", feed.base, station_path),
            user_agent: "amedas-map-test".to_string(),
            station_cache_ttl: ttl,
        })
        .unwrap()
    }

    #[test]
    fn observation_url_uses_compact_stamp() {
        let config = FeedConfig::default();
        let time = latest_snapshot_time(datetime!(2024-07-01 12:47:30 +9));
        assert_eq!(
            config.observation_url(&time).unwrap(),
            "https://www.jma.go.jp/bosai/amedas/data/map/20240701123000.json"
        );
    }

    #[tokio::test]
    async fn fetches_latest_snapshot_and_station_table() {
        let feed = spawn_feed(STATIONS).await;
        let source = fetcher(&feed, "/const/amedastable.json", Duration::ZERO);

        let snapshot = source
            .latest(datetime!(2024-07-01 12:47:30 +9))
            .await
            .unwrap();

        assert_eq!(snapshot.time.stamp().unwrap(), "20240701123000");
        assert_eq!(snapshot.observations.len(), 2);
        assert_eq!(snapshot.observations["11001"].temp, Some(12.3));
        assert_eq!(snapshot.stations.len(), 2);
        assert_eq!(snapshot.stations["44132"].kj_name, "東京");
    }

    #[tokio::test]
    async fn unpublished_snapshot_is_a_data_gap() {
        let feed = spawn_feed(STATIONS).await;
        let source = fetcher(&feed, "/const/amedastable.json", Duration::ZERO);

        let err = source
            .latest(datetime!(2024-07-01 12:57:30 +9))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DataGap);
        assert!(err.to_string().contains("20240701124000"));
        assert_eq!(feed.station_hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn server_error_is_a_fetch_error() {
        let feed = spawn_feed(STATIONS).await;
        let source = fetcher(&feed, "/const/broken.json", Duration::ZERO);

        let err = source
            .latest(datetime!(2024-07-01 12:47:30 +9))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Fetch);
    }

    #[tokio::test]
    async fn snapshot_server_error_is_not_a_data_gap() {
        let feed = spawn_feed(STATIONS).await;
        let source = SnapshotFetcher::new(FeedConfig {
            observation_base_url: format!("{}/broken/", feed.base),
            station_table_url: format!("{}/const/amedastable.json", feed.base),
            ..FeedConfig::default()
        })
        .unwrap();

        let err = source
            .latest(datetime!(2024-07-01 12:47:30 +9))
            .await
            .unwrap_err();

        assert!(matches!(
            &err,
            Error::Status { status, .. } if *status == StatusCode::INTERNAL_SERVER_ERROR
        ));
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert_eq!(feed.station_hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_station_table_is_a_parse_error() {
        let feed = spawn_feed("{\"11001\": {\"kjName\": \"宗谷岬\"}}").await;
        let source = fetcher(&feed, "/const/amedastable.json", Duration::ZERO);

        let err = source
            .latest(datetime!(2024-07-01 12:47:30 +9))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn unreachable_feed_is_a_fetch_error() {
        let source = SnapshotFetcher::new(FeedConfig {
            observation_base_url: "http://127.0.0.1:1/map".to_string(),
            ..FeedConfig::default()
        })
        .unwrap();

        let err = source
            .latest(datetime!(2024-07-01 12:47:30 +9))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Request { .. }));
        assert_eq!(err.kind(), ErrorKind::Fetch);
    }

    #[tokio::test]
    async fn station_table_is_refetched_without_cache() {
        let feed = spawn_feed(STATIONS).await;
        let source = fetcher(&feed, "/const/amedastable.json", Duration::ZERO);
        let now = datetime!(2024-07-01 12:47:30 +9);

        source.latest(now).await.unwrap();
        source.latest(now).await.unwrap();

        assert_eq!(feed.station_hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn station_table_is_reused_while_cached() {
        let feed = spawn_feed(STATIONS).await;
        let source = fetcher(&feed, "/const/amedastable.json", Duration::from_secs(600));
        let now = datetime!(2024-07-01 12:47:30 +9);

        source.latest(now).await.unwrap();
        source.latest(now).await.unwrap();

        assert_eq!(feed.station_hits.load(Ordering::SeqCst), 1);
    }
}
