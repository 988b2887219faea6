//! deck.gl column map of 24-hour rainfall
//!
//! The page carries everything deck.gl needs as one JSON document: camera,
//! layer props, tooltip template, and one datum per merged row. A small
//! inline script turns it into a `ColumnLayer`.

use amedas_fetcher::{MergedRow, Rgb};
use maud::{html, Markup, PreEscaped};
use serde::Serialize;

const DECK_GL_JS: &str = "https://unpkg.com/deck.gl@9.0.38/dist.min.js";
const MAPLIBRE_JS: &str = "https://unpkg.com/maplibre-gl@4.7.1/dist/maplibre-gl.js";
const MAPLIBRE_CSS: &str = "https://unpkg.com/maplibre-gl@4.7.1/dist/maplibre-gl.css";
const MAP_STYLE: &str = "https://basemaps.cartocdn.com/gl/dark-matter-gl-style/style.json";

/// Columns are this many meters tall per mm of rain
pub const ELEVATION_SCALE: f64 = 2500.0;
/// Column radius, meters
pub const COLUMN_RADIUS: f64 = 2500.0;
pub const ELEVATION_RANGE: [f64; 2] = [0.0, 500.0];
pub const LINE_COLOR: [u8; 3] = [0, 0, 0];

/// Tooltip template, `{field}` is replaced with the hovered datum's field
pub const TOOLTIP_HTML: &str = "地点名：<ruby>{kjName}<rt>{knName}</rt></ruby><br>\
    気温：{temp}℃<br>\
    10分間雨量：{precipitation10m}mm<br>\
    1時間雨量：{precipitation1h}mm<br>\
    24時間雨量：{precipitation24h}mm";

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

/// Central Japan, tilted
pub const INITIAL_VIEW: ViewState = ViewState {
    longitude: 137.5936,
    latitude: 36.047,
    zoom: 5.0,
    min_zoom: 1.0,
    max_zoom: 15.0,
    pitch: 50.0,
    bearing: 0.0,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnLayerProps {
    id: &'static str,
    radius: f64,
    elevation_scale: f64,
    elevation_range: [f64; 2],
    get_line_color: [u8; 3],
    pickable: bool,
    auto_highlight: bool,
    extruded: bool,
}

const LAYER: ColumnLayerProps = ColumnLayerProps {
    id: "precipitation-24h",
    radius: COLUMN_RADIUS,
    elevation_scale: ELEVATION_SCALE,
    elevation_range: ELEVATION_RANGE,
    get_line_color: LINE_COLOR,
    pickable: true,
    auto_highlight: true,
    extruded: true,
};

#[derive(Debug, Serialize)]
struct TooltipStyle {
    background: &'static str,
    color: &'static str,
    #[serde(rename = "font-family")]
    font_family: &'static str,
    #[serde(rename = "z-index")]
    z_index: &'static str,
}

#[derive(Debug, Serialize)]
struct Tooltip {
    html: &'static str,
    style: TooltipStyle,
}

const TOOLTIP: Tooltip = Tooltip {
    html: TOOLTIP_HTML,
    style: TooltipStyle {
        background: "grey",
        color: "white",
        font_family: "\"ヒラギノ角ゴ Pro W3\", \"Meiryo\", sans-serif",
        z_index: "5000",
    },
};

/// One column: position, elevation, fill color, and the tooltip fields
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDatum<'a> {
    /// `[longitude, latitude]`
    pub position: [f64; 2],
    pub elevation: f64,
    pub fill_color: Rgb,
    pub kj_name: &'a str,
    pub kn_name: &'a str,
    pub temp: Option<f64>,
    pub precipitation10m: Option<f64>,
    pub precipitation1h: Option<f64>,
    pub precipitation24h: f64,
}

impl<'a> From<&'a MergedRow> for ColumnDatum<'a> {
    fn from(row: &'a MergedRow) -> Self {
        ColumnDatum {
            position: [row.longitude, row.latitude],
            elevation: row.precipitation24h,
            fill_color: row.color,
            kj_name: &row.kj_name,
            kn_name: &row.kn_name,
            temp: row.temp,
            precipitation10m: row.precipitation10m,
            precipitation1h: row.precipitation1h,
            precipitation24h: row.precipitation24h,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnMapConfig<'a> {
    map_style: &'static str,
    view_state: ViewState,
    layer: &'a ColumnLayerProps,
    tooltip: &'a Tooltip,
    data: Vec<ColumnDatum<'a>>,
}

/// JSON document read by the map script, safe to inline in a `<script>` tag
pub fn column_map_config(rows: &[MergedRow]) -> serde_json::Result<String> {
    let config = ColumnMapConfig {
        map_style: MAP_STYLE,
        view_state: INITIAL_VIEW,
        layer: &LAYER,
        tooltip: &TOOLTIP,
        data: rows.iter().map(ColumnDatum::from).collect(),
    };
    // '<' only occurs inside JSON strings, where < decodes back to it
    Ok(serde_json::to_string(&config)?.replace('<', "\\u003c"))
}

const COLUMN_MAP_SCRIPT: &str = r#"
(function () {
    const config = JSON.parse(document.getElementById('column-map-config').textContent);
    const entities = { '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' };
    const escape = (value) => String(value).replace(/[&<>"']/g, (c) => entities[c]);
    const fill = (template, row) =>
        template.replace(/\{(\w+)\}/g, (_, key) =>
            row[key] === null || row[key] === undefined ? '-' : escape(row[key]));

    new deck.DeckGL({
        container: 'column-map',
        mapStyle: config.mapStyle,
        initialViewState: config.viewState,
        controller: true,
        layers: [
            new deck.ColumnLayer({
                ...config.layer,
                data: config.data,
                getPosition: (d) => d.position,
                getElevation: (d) => d.elevation,
                getFillColor: (d) => d.fillColor,
            }),
        ],
        getTooltip: ({ object }) =>
            object && { html: fill(config.tooltip.html, object), style: config.tooltip.style },
    });
})();
"#;

/// Map container plus the scripts that draw it
pub fn column_map(rows: &[MergedRow]) -> serde_json::Result<Markup> {
    let config = column_map_config(rows)?;
    Ok(html! {
        link rel="stylesheet" href=(MAPLIBRE_CSS);
        script src=(MAPLIBRE_JS) {}
        script src=(DECK_GL_JS) {}
        div id="column-map" style="position: relative; width: 100%; height: 75vh;" {}
        script type="application/json" id="column-map-config" { (PreEscaped(config)) }
        script { (PreEscaped(COLUMN_MAP_SCRIPT)) }
    })
}
