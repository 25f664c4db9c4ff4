pub mod config;
pub mod paths;

pub use config::{Config, DisplayConfig, LoggingConfig, StorageConfig};
pub use paths::{PathManager, CATALOG_FILE_NAME};
