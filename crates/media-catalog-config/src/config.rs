use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::paths::PathManager;

const SORT_KEYS: [&str; 3] = ["title", "year", "rating"];

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Catalog file; defaults to `dados.json` in the data directory
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Order used by `list` when no sort is requested: title, year or rating
    #[serde(default)]
    pub default_sort: Option<String>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Write logs to this file (rotated daily) instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if there is one, defaults otherwise.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(ref data_file) = self.storage.data_file {
            if data_file.as_os_str().is_empty() {
                return Err(anyhow::anyhow!("storage.data_file cannot be empty"));
            }
        }

        if let Some(ref sort) = self.display.default_sort {
            if !SORT_KEYS.contains(&sort.to_lowercase().as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid display.default_sort: {} (expected title, year or rating)",
                    sort
                ));
            }
        }

        Ok(())
    }

    /// Pick up `SCREENLOG_DATA_FILE` when it is set.
    pub fn apply_env_overrides(&mut self) {
        if let Some(path) = std::env::var_os("SCREENLOG_DATA_FILE") {
            if !path.is_empty() {
                self.storage.data_file = Some(PathBuf::from(path));
            }
        }
    }

    /// Catalog file to open: explicit override, then config, then the default location.
    pub fn catalog_file(&self, override_path: Option<&Path>, paths: &PathManager) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.storage.data_file.clone())
            .unwrap_or_else(|| paths.catalog_file())
    }
}
