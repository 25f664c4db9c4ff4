pub mod media;
pub mod rating;
pub mod record;

pub use media::{parse_genres, MediaItem, MediaKind, MediaType};
pub use rating::Rating;
pub use record::StoredMedia;
