use anyhow::Result;
use std::path::PathBuf;

/// File name used for the catalog, kept from earlier versions.
pub const CATALOG_FILE_NAME: &str = "dados.json";

/// Get the base directory override from the environment, if any
fn home_override() -> Option<PathBuf> {
    std::env::var_os("SCREENLOG_HOME").map(PathBuf::from)
}

#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        if let Some(base) = home_override() {
            return Ok(Self::with_base(base));
        }

        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("screenlog");
        Ok(Self::with_base(base_dir))
    }

    /// Config file at the base level, the catalog in a `data` subdirectory.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            data_dir: base.join("data"),
            config_dir: base,
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn catalog_file(&self) -> PathBuf {
        self.data_dir.join(CATALOG_FILE_NAME)
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // Fall back to the working directory when no platform config dir exists
        Self::new().unwrap_or_else(|_| Self::with_base(".screenlog"))
    }
}
