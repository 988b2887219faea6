use std::collections::BTreeMap;

use serde::Deserialize;

use super::leading_value;

/// One station's readings from a single 10-minute snapshot
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Air temperature, °C
    #[serde(default, deserialize_with = "leading_value")]
    pub temp: Option<f64>,
    /// Relative humidity, %
    #[serde(default, deserialize_with = "leading_value")]
    pub humidity: Option<f64>,
    /// Rainfall over the last 10 minutes, mm
    #[serde(default, deserialize_with = "leading_value")]
    pub precipitation10m: Option<f64>,
    /// Rainfall over the last hour, mm
    #[serde(default, deserialize_with = "leading_value")]
    pub precipitation1h: Option<f64>,
    /// Rainfall over the last 24 hours, mm
    #[serde(default, deserialize_with = "leading_value")]
    pub precipitation24h: Option<f64>,
    /// 16-point compass code, 0 is calm and 16 is north
    #[serde(default, deserialize_with = "leading_value")]
    pub wind_direction: Option<u8>,
    /// Wind speed, m/s
    #[serde(default, rename = "wind", deserialize_with = "leading_value")]
    pub wind_speed: Option<f64>,
}

/// Observations keyed by station identifier
pub type ObservationTable = BTreeMap<String, Observation>;

/// Decode a snapshot body (`{"11001": {"temp": [12.3, 0], ...}, ...}`)
pub fn parse_observations(body: &str) -> Result<ObservationTable, serde_json::Error> {
    serde_json::from_str(body)
}
