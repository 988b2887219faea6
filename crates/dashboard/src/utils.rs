use std::{env, time::Duration};

use amedas_fetcher::{FeedConfig, DEFAULT_OBSERVATION_BASE_URL, DEFAULT_STATION_TABLE_URL};
use amedas_map_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_DASHBOARD_PORT, DEFAULT_PAGE_TITLE,
    ENV_PREFIX,
};
use anyhow::Context;
use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use time::{format_description::well_known::Iso8601, OffsetDateTime};

use crate::display::{DisplayOptions, Layout};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "AMeDAS rainfall map - renders the latest JMA snapshot as a 3D column map"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $AMEDAS_MAP_CONFIG, ./dashboard.toml,
    /// $XDG_CONFIG_HOME/amedas-map/dashboard.toml, /etc/amedas-map/dashboard.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "AMEDAS_MAP_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(long, env = "AMEDAS_MAP_HOST")]
    #[serde(alias = "domain")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "AMEDAS_MAP_PORT")]
    pub port: Option<u16>,

    /// Base URL of the per-snapshot observation files
    #[arg(short, long, env = "AMEDAS_MAP_OBSERVATION_URL")]
    pub observation_url: Option<String>,

    /// URL of the station metadata table
    #[arg(short, long, env = "AMEDAS_MAP_STATION_TABLE_URL")]
    pub station_table_url: Option<String>,

    /// Seconds to keep the station table in memory, 0 re-fetches it on every page load
    #[arg(long, env = "AMEDAS_MAP_STATION_CACHE_SECS")]
    pub station_cache_secs: Option<u64>,

    /// HTTP User-Agent header for feed requests
    #[arg(short, long, env = "AMEDAS_MAP_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Page title
    #[arg(short, long, env = "AMEDAS_MAP_TITLE")]
    pub title: Option<String>,

    /// Page layout: wide or centered
    #[arg(long, value_enum, env = "AMEDAS_MAP_LAYOUT")]
    pub layout: Option<Layout>,
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn host(&self) -> String {
        self.host
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_DASHBOARD_PORT)
    }

    pub fn feed_config(&self) -> FeedConfig {
        let defaults = FeedConfig::default();
        FeedConfig {
            observation_base_url: self
                .observation_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OBSERVATION_BASE_URL.to_string()),
            station_table_url: self
                .station_table_url
                .clone()
                .unwrap_or_else(|| DEFAULT_STATION_TABLE_URL.to_string()),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            station_cache_ttl: self
                .station_cache_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.station_cache_ttl),
        }
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            title: self
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_string()),
            layout: self.layout.unwrap_or_default(),
        }
    }

    /// Fill every unset field from `file`; values already set here win
    pub fn with_fallback(self, file: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file.level),
            host: self.host.or(file.host),
            port: self.port.or(file.port),
            observation_url: self.observation_url.or(file.observation_url),
            station_table_url: self.station_table_url.or(file.station_table_url),
            station_cache_secs: self.station_cache_secs.or(file.station_cache_secs),
            user_agent: self.user_agent.or(file.user_agent),
            title: self.title.or(file.title),
            layout: self.layout.or(file.layout),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> anyhow::Result<(Cli, ConfigSource)> {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file(&format!("{}_CONFIG", ENV_PREFIX), "dashboard.toml")
    };

    let file_config: Cli =
        load_config(&source).with_context(|| format!("error loading config from {}", source))?;

    // CLI args override file config (env vars are handled by clap)
    Ok((cli_args.with_fallback(file_config), source))
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}: {}",
                OffsetDateTime::now_utc()
                    .format(&Iso8601::DEFAULT)
                    .unwrap_or_default(),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
