use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::loader::DataSource;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Theme name (reserved for future use).
    pub theme: String,
}

/// Where the catalog data and user state live.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory (preferences, logs).
    pub data_dir: Option<PathBuf>,
    /// Local directory holding the catalog JSON files. Ignored when
    /// `base_url` is set. Defaults to `./data`.
    pub source_dir: Option<PathBuf>,
    /// Remote base URL serving the catalog JSON files.
    pub base_url: Option<String>,
    /// Character ids to load. When empty, local sources enumerate
    /// `characters/*.json` instead.
    pub roster: Vec<String>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            theme: "default".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/courtside/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, with the same fallback.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e} - using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("No config file at {} - using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("courtside"))
                .unwrap_or_else(|| PathBuf::from("data-local"))
        })
    }

    /// Path of the preference store file.
    pub fn prefs_path(&self) -> PathBuf {
        self.data_dir().join("preferences.json")
    }

    /// Resolved data source: remote when `base_url` is set and valid,
    /// otherwise the local source directory.
    pub fn data_source(&self) -> DataSource {
        if let Some(raw) = &self.data.base_url {
            // reqwest joins relative paths, so the base must end with '/'.
            let normalized = if raw.ends_with('/') {
                raw.clone()
            } else {
                format!("{raw}/")
            };
            match Url::parse(&normalized) {
                Ok(base_url) => return DataSource::Remote { base_url },
                Err(e) => {
                    log::warn!("invalid base_url {raw} ({e}) - falling back to local data");
                }
            }
        }
        DataSource::Local {
            dir: self
                .data
                .source_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("data")),
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("courtside").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
