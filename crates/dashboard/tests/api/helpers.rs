use std::sync::Arc;

use amedas_dashboard::{
    app,
    display::{configure_display, DisplayOptions, Layout},
    AppState,
};
use amedas_fetcher::{
    floor_to_interval, ColorRamp, Error, Observation, ObservationTable, Snapshot, SnapshotSource,
    Station, StationTable,
};
use async_trait::async_trait;
use axum::Router;
use mockall::mock;
use time::{macros::datetime, OffsetDateTime};

mock! {
    pub SnapshotSource {}

    #[async_trait]
    impl SnapshotSource for SnapshotSource {
        async fn latest(&self, now: OffsetDateTime) -> Result<Snapshot, Error>;
    }
}

pub struct TestApp {
    pub app: Router,
}

pub async fn spawn_app(snapshots: Arc<dyn SnapshotSource>) -> TestApp {
    let display = configure_display(DisplayOptions {
        title: "10分間雨量".to_string(),
        layout: Layout::Wide,
    })
    .expect("valid display options");

    let app_state = AppState {
        display,
        snapshots,
        ramp: ColorRamp::default(),
    };

    TestApp {
        app: app(app_state),
    }
}

pub fn mock_station(kj_name: &str, kn_name: &str, latitude: f64, longitude: f64) -> Station {
    Station {
        kj_name: kj_name.to_string(),
        kn_name: kn_name.to_string(),
        latitude,
        longitude,
    }
}

/// Station A has 50 mm over 24 hours, station B has no 24-hour reading
pub fn mock_snapshot() -> Snapshot {
    let stations = StationTable::from([
        (
            "A".to_string(),
            mock_station("宗谷岬", "ソウヤミサキ", 45.52, 141.935),
        ),
        (
            "B".to_string(),
            mock_station("東京", "トウキョウ", 35.6917, 139.75),
        ),
    ]);
    let observations = ObservationTable::from([
        (
            "A".to_string(),
            Observation {
                temp: Some(12.3),
                precipitation10m: Some(0.5),
                precipitation1h: Some(3.0),
                precipitation24h: Some(50.0),
                ..Observation::default()
            },
        ),
        (
            "B".to_string(),
            Observation {
                temp: Some(28.4),
                precipitation24h: None,
                ..Observation::default()
            },
        ),
    ]);

    Snapshot {
        time: floor_to_interval(datetime!(2024-07-01 12:30:00 +9)),
        observations,
        stations: Arc::new(stations),
    }
}
