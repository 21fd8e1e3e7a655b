use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::Deserialize;

use crate::theme::ThemeConfig;

pub const APP_NAME: &str = "month-calendar";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// First column of the grid, e.g. "sunday" or "mon".
    pub week_start: Option<String>,
    /// Event file imported at startup when `--events` is not given.
    pub events: Option<PathBuf>,
    pub theme: ThemeConfig,
}

impl Config {
    /// Read the config file. A missing file gives the defaults; a broken
    /// one is logged and also gives the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(default_path) else {
            return Self::default();
        };
        if !path.exists() {
            log::debug!("no config file at {}", path.display());
            return Self::default();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("could not read {}: {err}", path.display());
                return Self::default();
            }
        };

        match Self::parse(&content) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("ignoring invalid config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn week_start(&self) -> Weekday {
        match self.week_start.as_deref() {
            None => Weekday::Sun,
            Some(raw) => parse_week_start(raw).unwrap_or_else(|| {
                log::warn!("unknown week_start {raw:?}, using sunday");
                Weekday::Sun
            }),
        }
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME).join("config.toml"))
}

/// Accepts full or three-letter day names in any case.
pub fn parse_week_start(raw: &str) -> Option<Weekday> {
    raw.trim().parse::<Weekday>().ok()
}
