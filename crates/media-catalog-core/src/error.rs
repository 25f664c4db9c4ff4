use thiserror::Error;

/// Failures writing the catalog file. Read failures never surface; see
/// [`crate::store::CatalogStore::load`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("No media with id {id}")]
    NotFound { id: u64 },

    #[error("Missing required field for {media_type}: {field}")]
    MissingField {
        media_type: &'static str,
        field: &'static str,
    },

    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("No id left after {max}")]
    IdsExhausted { max: u64 },

    #[error("Failed to save catalog: {0}")]
    Persist(#[from] StoreError),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}
