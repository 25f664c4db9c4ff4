pub mod catalog;
pub mod error;
pub mod query;
pub mod store;

pub use catalog::{MediaCatalog, MediaDraft, MediaUpdate};
pub use error::{CatalogError, StoreError};
pub use query::{
    apply_filter, filter_by_genre, filter_by_platform, ranking, search, sort_by, statistics, CatalogStats,
    FilterField, RankedItem, SortKey, WatchTime,
};
pub use store::{CatalogStore, JsonFileStore, MemoryStore};
