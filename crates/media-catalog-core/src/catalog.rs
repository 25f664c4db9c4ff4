use chrono::Utc;
use media_catalog_models::{parse_genres, MediaItem, MediaKind, MediaType, Rating};
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::store::CatalogStore;

/// Registration input as collected from the user. Variant-specific numbers are
/// optional here and checked by [`MediaCatalog::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDraft {
    pub title: String,
    pub media_type: MediaType,
    /// Comma-separated, e.g. `"ação, drama"`.
    pub genres: String,
    pub release_year: i32,
    pub platform: String,
    pub season_count: Option<u32>,
    pub total_episodes: Option<u32>,
    /// Runtime for a movie, per-episode duration for a series.
    pub duration_minutes: Option<u32>,
}

/// Changes applied by [`MediaCatalog::update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaUpdate {
    /// Only applied to series.
    pub watched_episodes: Option<u32>,
    pub rating: Option<Rating>,
}

/// In-memory catalog backed by a [`CatalogStore`]. The collection is read once
/// when the catalog is opened and written back after every mutation.
#[derive(Debug)]
pub struct MediaCatalog<S: CatalogStore> {
    store: S,
    items: Vec<MediaItem>,
}

impl<S: CatalogStore> MediaCatalog<S> {
    pub fn open(store: S) -> Self {
        let items = store.load();
        debug!("Opened catalog with {} entries", items.len());
        Self { store, items }
    }

    /// Discard in-memory state and read the store again.
    pub fn reload(&mut self) {
        self.items = self.store.load();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn list(&self) -> &[MediaItem] {
        &self.items
    }

    /// The given pre-computed view when present, otherwise every item in catalog order.
    pub fn list_view<'a>(&'a self, view: Option<Vec<&'a MediaItem>>) -> Vec<&'a MediaItem> {
        view.unwrap_or_else(|| self.items.iter().collect())
    }

    pub fn get(&self, id: u64) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn register(&mut self, draft: MediaDraft) -> Result<MediaItem, CatalogError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(CatalogError::EmptyTitle);
        }

        let kind = match draft.media_type {
            MediaType::Movie => MediaKind::Movie {
                runtime_minutes: required(draft.duration_minutes, "movie", "duration_minutes")?,
            },
            MediaType::Series => MediaKind::Series {
                season_count: required(draft.season_count, "series", "season_count")?,
                total_episodes: required(draft.total_episodes, "series", "total_episodes")?,
                watched_episodes: 0,
                episode_minutes: required(draft.duration_minutes, "series", "duration_minutes")?,
            },
        };

        let item = MediaItem {
            id: self.next_id()?,
            title: title.to_string(),
            genres: parse_genres(&draft.genres),
            release_year: draft.release_year,
            platform: draft.platform.trim().to_string(),
            rating: None,
            kind,
        };

        self.items.push(item.clone());
        if let Err(e) = self.store.save(&self.items) {
            self.items.pop();
            return Err(e.into());
        }

        info!(id = item.id, title = %item.title, "Registered {}", item.media_type());
        Ok(item)
    }

    pub fn update(&mut self, id: u64, changes: MediaUpdate) -> Result<MediaItem, CatalogError> {
        let index = self.position(id)?;
        let previous = self.items[index].clone();

        let item = &mut self.items[index];
        if let Some(watched) = changes.watched_episodes {
            match &mut item.kind {
                MediaKind::Series { watched_episodes, .. } => *watched_episodes = watched,
                MediaKind::Movie { .. } => {
                    debug!(id, "Ignoring watched episodes for a movie");
                }
            }
        }
        if let Some(rating) = changes.rating {
            item.rating = Some(rating);
        }
        let updated = item.clone();

        if let Err(e) = self.store.save(&self.items) {
            self.items[index] = previous;
            return Err(e.into());
        }

        info!(id, title = %updated.title, "Updated media");
        Ok(updated)
    }

    /// Remove an entry. Without confirmation nothing changes and `Ok(None)` is
    /// returned; an unknown id is still reported.
    pub fn delete(&mut self, id: u64, confirmed: bool) -> Result<Option<MediaItem>, CatalogError> {
        let index = self.position(id)?;
        if !confirmed {
            debug!(id, "Deletion not confirmed");
            return Ok(None);
        }

        let removed = self.items.remove(index);
        if let Err(e) = self.store.save(&self.items) {
            self.items.insert(index, removed);
            return Err(e.into());
        }

        info!(id, title = %removed.title, "Deleted media");
        Ok(Some(removed))
    }

    fn position(&self, id: u64) -> Result<usize, CatalogError> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(CatalogError::NotFound { id })
    }

    /// Creation time in milliseconds, bumped past the largest existing id when
    /// the clock has not moved on.
    fn next_id(&self) -> Result<u64, CatalogError> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        match self.items.iter().map(|item| item.id).max() {
            Some(max) if now <= max => max.checked_add(1).ok_or(CatalogError::IdsExhausted { max }),
            _ => Ok(now),
        }
    }
}

fn required(value: Option<u32>, media_type: &'static str, field: &'static str) -> Result<u32, CatalogError> {
    value.ok_or(CatalogError::MissingField { media_type, field })
}

#[cfg(test)]
mod tests;
