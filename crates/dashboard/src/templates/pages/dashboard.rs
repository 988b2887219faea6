use amedas_fetcher::{ColorRamp, MergedRow, SnapshotTime};
use maud::{html, Markup};

use crate::{
    display::DisplayConfig,
    templates::{
        fragments::{column_map, rainfall_legend},
        layouts::{base, PageConfig},
    },
};

/// Dashboard page data
pub struct DashboardData {
    pub time: SnapshotTime,
    /// Stations in the metadata table, drawn or not
    pub station_count: usize,
    pub rows: Vec<MergedRow>,
    pub ramp: ColorRamp,
}

/// Dashboard page - the column map for one snapshot
pub fn dashboard_page(
    display: &DisplayConfig,
    data: &DashboardData,
) -> serde_json::Result<Markup> {
    let content = dashboard_content(data)?;
    Ok(base(&PageConfig::from(display), content))
}

pub fn dashboard_content(data: &DashboardData) -> serde_json::Result<Markup> {
    let map = column_map(&data.rows)?;
    Ok(html! {
        nav class="level mb-3" {
            div class="level-left" {
                p class="level-item" {
                    span class="tag is-info is-light" { "観測時刻 " (data.time) }
                }
                p class="level-item" {
                    span class="tag is-light" {
                        (data.rows.len()) " / " (data.station_count) " 地点"
                    }
                }
            }
            div class="level-right" {
                div class="level-item" { (rainfall_legend(&data.ramp)) }
            }
        }

        (map)

        p class="is-size-7 mt-2" {
            "出典: "
            a href="https://www.jma.go.jp/bosai/amedas/" target="_blank" { "気象庁 アメダス" }
        }
    })
}
