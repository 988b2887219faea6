use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use log::debug;
use tokio::sync::Mutex;

use crate::StationTable;

struct CachedStations {
    fetched_at: Instant,
    stations: Arc<StationTable>,
}

/// Keeps the station table in memory for a bounded time.
///
/// A zero lifetime disables caching and every lookup misses.
pub struct StationCache {
    ttl: Duration,
    entry: Mutex<Option<CachedStations>>,
}

impl StationCache {
    pub fn new(ttl: Duration) -> Self {
        StationCache {
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Cached table if one was stored less than `ttl` before `now`
    pub async fn get(&self, now: Instant) -> Option<Arc<StationTable>> {
        if !self.is_enabled() {
            return None;
        }
        let entry = self.entry.lock().await;
        let cached = entry.as_ref()?;
        let age = now.saturating_duration_since(cached.fetched_at);
        if age < self.ttl {
            debug!("station table cache hit, age {:?}", age);
            Some(Arc::clone(&cached.stations))
        } else {
            debug!("station table cache expired, age {:?}", age);
            None
        }
    }

    pub async fn store(&self, stations: Arc<StationTable>, now: Instant) {
        if !self.is_enabled() {
            return;
        }
        *self.entry.lock().await = Some(CachedStations {
            fetched_at: now,
            stations,
        });
    }
}
