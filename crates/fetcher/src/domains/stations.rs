use std::collections::BTreeMap;

use serde::Deserialize;

/// An angle given as whole degrees plus decimal minutes, e.g. `[45, 31.2]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "(f64, f64)")]
pub struct Sexagesimal {
    pub degrees: f64,
    pub minutes: f64,
}

impl From<(f64, f64)> for Sexagesimal {
    fn from((degrees, minutes): (f64, f64)) -> Self {
        Sexagesimal { degrees, minutes }
    }
}

impl Sexagesimal {
    pub fn to_decimal(self) -> f64 {
        self.degrees + self.minutes / 60.0
    }
}

/// Station entry as published in `amedastable.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationRecord {
    lat: Sexagesimal,
    lon: Sexagesimal,
    kj_name: String,
    kn_name: String,
}

/// Static station metadata, coordinates in decimal degrees
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Name in Kanji
    pub kj_name: String,
    /// Phonetic reading in Katakana
    pub kn_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<StationRecord> for Station {
    fn from(record: StationRecord) -> Self {
        Station {
            kj_name: record.kj_name,
            kn_name: record.kn_name,
            latitude: record.lat.to_decimal(),
            longitude: record.lon.to_decimal(),
        }
    }
}

/// Stations keyed by station identifier
pub type StationTable = BTreeMap<String, Station>;

/// Decode the station table body (`{"11001": {"lat": [45, 31.2], ...}, ...}`)
pub fn parse_stations(body: &str) -> Result<StationTable, serde_json::Error> {
    let records: BTreeMap<String, StationRecord> = serde_json::from_str(body)?;
    Ok(records
        .into_iter()
        .map(|(id, record)| (id, record.into()))
        .collect())
}
