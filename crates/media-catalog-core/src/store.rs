use media_catalog_models::{MediaItem, StoredMedia};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::StoreError;

/// Backing storage for a catalog. The whole collection is read and written at once.
pub trait CatalogStore {
    /// Read the full collection. A missing or unreadable backing store yields an
    /// empty collection rather than an error.
    fn load(&self) -> Vec<MediaItem>;

    /// Replace the stored collection with `items`. The last save wins.
    fn save(&self, items: &[MediaItem]) -> Result<(), StoreError>;
}

/// Catalog persisted as one JSON array on local disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn backup_corrupt_file(&self) {
        let backup_path = self.path.with_extension("json.bak");
        match std::fs::copy(&self.path, &backup_path) {
            Ok(_) => info!("Backed up unreadable catalog to {:?}", backup_path),
            Err(e) => warn!("Failed to back up unreadable catalog file: {}", e),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl CatalogStore for JsonFileStore {
    fn load(&self) -> Vec<MediaItem> {
        if !self.path.exists() {
            debug!("Catalog file {:?} does not exist, starting empty", self.path);
            return Vec::new();
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read catalog file {:?}: {}. Starting empty.", self.path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<StoredMedia>>(&content) {
            Ok(records) => {
                debug!("Loaded {} catalog entries from {:?}", records.len(), self.path);
                records.into_iter().map(MediaItem::from).collect()
            }
            Err(e) => {
                warn!(
                    "Catalog file {:?} could not be parsed: {}. Starting empty.",
                    self.path, e
                );
                self.backup_corrupt_file();
                Vec::new()
            }
        }
    }

    fn save(&self, items: &[MediaItem]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let records: Vec<StoredMedia> = items.iter().map(StoredMedia::from).collect();
        let json = serde_json::to_string_pretty(&records)?;

        // Write to a sibling temp file, then rename over the catalog
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, json).map_err(|e| self.io_error(e))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;

        debug!("Saved {} catalog entries to {:?}", items.len(), self.path);
        Ok(())
    }
}

/// In-process store, used for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<Vec<MediaItem>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<MediaItem>) -> Self {
        Self {
            items: RefCell::new(items),
            saves: RefCell::new(0),
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }

    pub fn snapshot(&self) -> Vec<MediaItem> {
        self.items.borrow().clone()
    }
}

impl CatalogStore for MemoryStore {
    fn load(&self) -> Vec<MediaItem> {
        self.items.borrow().clone()
    }

    fn save(&self, items: &[MediaItem]) -> Result<(), StoreError> {
        *self.items.borrow_mut() = items.to_vec();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
