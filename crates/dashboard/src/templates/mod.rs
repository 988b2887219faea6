pub mod fragments;
pub mod layouts;
pub mod pages;

pub use fragments::{column_map, column_map_config, rainfall_legend, ColumnDatum};
pub use layouts::PageConfig;
pub use pages::{dashboard::DashboardData, dashboard_page, error_page};
