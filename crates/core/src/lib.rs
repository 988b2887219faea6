//! AMeDAS Map Core Library
//!
//! Shared pieces for the fetcher and dashboard crates:
//! - Configuration file discovery and loading (XDG-compliant)
//! - Application-wide defaults

mod config;

pub use config::{find_config_file, load_config, ConfigSource};

/// Application name used for XDG paths
pub const APP_NAME: &str = "amedas-map";

/// Prefix shared by every environment variable the dashboard reads
pub const ENV_PREFIX: &str = "AMEDAS_MAP";

/// Default dashboard port
pub const DEFAULT_DASHBOARD_PORT: u16 = 9810;

/// Default page title, "10-minute rainfall"
pub const DEFAULT_PAGE_TITLE: &str = "10分間雨量";
