use crate::{ColorRamp, Observation, ObservationTable, Rgb, StationTable};

/// A station with a current 24-hour reading, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub station_id: String,
    pub kj_name: String,
    pub kn_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
    pub precipitation10m: Option<f64>,
    pub precipitation1h: Option<f64>,
    pub precipitation24h: f64,
    pub wind_direction: Option<u8>,
    pub wind_speed: Option<f64>,
    pub color: Rgb,
}

/// Left-join stations with observations on station identifier.
///
/// Stations without an observation, or whose observation has no 24-hour
/// rainfall, are dropped. Observations for unknown stations are ignored.
/// Rows come out ordered by station identifier.
pub fn merge(
    stations: &StationTable,
    observations: &ObservationTable,
    ramp: &ColorRamp,
) -> Vec<MergedRow> {
    stations
        .iter()
        .filter_map(|(station_id, station)| {
            let observation: &Observation = observations.get(station_id)?;
            let precipitation24h = observation.precipitation24h?;
            Some(MergedRow {
                station_id: station_id.clone(),
                kj_name: station.kj_name.clone(),
                kn_name: station.kn_name.clone(),
                latitude: station.latitude,
                longitude: station.longitude,
                temp: observation.temp,
                humidity: observation.humidity,
                precipitation10m: observation.precipitation10m,
                precipitation1h: observation.precipitation1h,
                precipitation24h,
                wind_direction: observation.wind_direction,
                wind_speed: observation.wind_speed,
                color: ramp.color_for(precipitation24h),
            })
        })
        .collect()
}
