//! Configuration file discovery and loading
//!
//! Values are layered in priority order:
//! 1. CLI arguments and environment variables (handled by clap in the binary)
//! 2. Config file (searched in standard locations)
//! 3. Built-in defaults

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;

use crate::APP_NAME;

/// Where a configuration file was found
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Path given with `--config` or the config env var
    Explicit(PathBuf),
    /// Found in the current working directory
    CurrentDir(PathBuf),
    /// Found under `$XDG_CONFIG_HOME/amedas-map/` or `~/.config/amedas-map/`
    XdgConfig(PathBuf),
    /// Found under `/etc/amedas-map/`
    System(PathBuf),
    /// No file, built-in defaults only
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::XdgConfig(p)
            | ConfigSource::System(p) => Some(p.as_path()),
            ConfigSource::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}", path.display()),
            None => write!(f, "(defaults)"),
        }
    }
}

/// Find a configuration file in standard locations
///
/// Search order:
/// 1. `env_var` (e.g. `AMEDAS_MAP_CONFIG`), if it names an existing file
/// 2. `filename` in the current directory
/// 3. XDG config home
/// 4. `/etc/amedas-map/`
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    if let Ok(path) = env::var(env_var) {
        let explicit = PathBuf::from(path);
        if explicit.exists() {
            return ConfigSource::Explicit(explicit);
        }
        debug!(
            "{} points at {}, which does not exist",
            env_var,
            explicit.display()
        );
    }

    let candidates = [
        ConfigSource::CurrentDir(PathBuf::from(filename)),
        ConfigSource::XdgConfig(xdg_config_path(filename)),
        ConfigSource::System(PathBuf::from("/etc").join(APP_NAME).join(filename)),
    ];

    candidates
        .into_iter()
        .find(|source| source.path().is_some_and(Path::exists))
        .unwrap_or(ConfigSource::Defaults)
}

fn xdg_config_path(filename: &str) -> PathBuf {
    let base = match (env::var("XDG_CONFIG_HOME"), env::var("HOME")) {
        (Ok(xdg_config), _) => PathBuf::from(xdg_config),
        (Err(_), Ok(home)) => PathBuf::from(home).join(".config"),
        // won't exist, keeps the search uniform
        _ => PathBuf::from(".config"),
    };
    base.join(APP_NAME).join(filename)
}

/// Load and parse a TOML configuration file
///
/// Returns `T::default()` for [`ConfigSource::Defaults`], and an error if the
/// file cannot be read or is not valid TOML for `T`.
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    match source.path() {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        }
        None => Ok(T::default()),
    }
}
