use super::*;
use crate::error::StoreError;
use crate::store::{JsonFileStore, MemoryStore};
use tempfile::TempDir;

fn movie_draft(title: &str) -> MediaDraft {
    MediaDraft {
        title: title.to_string(),
        media_type: MediaType::Movie,
        genres: "ação, aventura".to_string(),
        release_year: 2021,
        platform: "HBO Max".to_string(),
        season_count: None,
        total_episodes: None,
        duration_minutes: Some(155),
    }
}

fn series_draft(title: &str) -> MediaDraft {
    MediaDraft {
        title: title.to_string(),
        media_type: MediaType::Series,
        genres: "drama".to_string(),
        release_year: 2008,
        platform: "Netflix".to_string(),
        season_count: Some(5),
        total_episodes: Some(62),
        duration_minutes: Some(47),
    }
}

/// Store whose writes always fail, loaded with a fixed collection.
struct ReadOnlyStore(Vec<MediaItem>);

impl CatalogStore for ReadOnlyStore {
    fn load(&self) -> Vec<MediaItem> {
        self.0.clone()
    }

    fn save(&self, _items: &[MediaItem]) -> Result<(), StoreError> {
        Err(StoreError::Io {
            path: "read-only".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

#[test]
fn test_register_movie_defaults() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    let item = catalog.register(movie_draft("Dune")).unwrap();

    assert_eq!(item.title, "Dune");
    assert_eq!(item.genres, vec!["ação", "aventura"]);
    assert_eq!(item.rating, None);
    assert_eq!(item.kind, MediaKind::Movie { runtime_minutes: 155 });
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.store().save_count(), 1);
    assert_eq!(catalog.store().snapshot(), vec![item]);
}

#[test]
fn test_register_series_starts_unwatched() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    let item = catalog.register(series_draft("Breaking Bad")).unwrap();
    assert_eq!(
        item.kind,
        MediaKind::Series {
            season_count: 5,
            total_episodes: 62,
            watched_episodes: 0,
            episode_minutes: 47,
        }
    );
}

#[test]
fn test_register_series_requires_episode_fields() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    let mut draft = series_draft("Lost");
    draft.total_episodes = None;

    let err = catalog.register(draft).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::MissingField { field: "total_episodes", .. }
    ));
    assert!(catalog.is_empty());
    assert_eq!(catalog.store().save_count(), 0);
}

#[test]
fn test_register_movie_ignores_series_fields() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    let mut draft = movie_draft("Up");
    draft.season_count = Some(4);
    draft.total_episodes = Some(9);

    let item = catalog.register(draft).unwrap();
    assert_eq!(item.watched_episodes(), 0);
    assert!(!item.is_series());

    let mut draft = movie_draft("Nope");
    draft.duration_minutes = None;
    assert!(matches!(
        catalog.register(draft),
        Err(CatalogError::MissingField { field: "duration_minutes", .. })
    ));
}

#[test]
fn test_register_rejects_blank_title() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    assert!(matches!(
        catalog.register(movie_draft("   ")),
        Err(CatalogError::EmptyTitle)
    ));
}

#[test]
fn test_register_assigns_increasing_unique_ids() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    let mut previous = 0;
    for i in 0..20 {
        let before = catalog.len();
        let item = catalog.register(movie_draft(&format!("Movie {}", i))).unwrap();
        assert_eq!(catalog.len(), before + 1);
        assert!(item.id > previous);
        previous = item.id;
    }
}

#[test]
fn test_register_id_exceeds_ids_from_the_future() {
    let far_future = u64::MAX / 2;
    let seed = MediaItem {
        id: far_future,
        title: "Seed".to_string(),
        genres: vec![],
        release_year: 2000,
        platform: String::new(),
        rating: None,
        kind: MediaKind::Movie { runtime_minutes: 90 },
    };

    let mut catalog = MediaCatalog::open(MemoryStore::with_items(vec![seed]));
    let item = catalog.register(movie_draft("Next")).unwrap();
    assert_eq!(item.id, far_future + 1);
}

#[test]
fn test_register_fails_when_largest_id_is_taken() {
    let seed = MediaItem {
        id: u64::MAX,
        title: "Seed".to_string(),
        genres: vec![],
        release_year: 2000,
        platform: String::new(),
        rating: None,
        kind: MediaKind::Movie { runtime_minutes: 90 },
    };

    let mut catalog = MediaCatalog::open(MemoryStore::with_items(vec![seed]));
    let err = catalog.register(movie_draft("Next")).unwrap_err();

    assert!(matches!(err, CatalogError::IdsExhausted { max: u64::MAX }));
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.store().save_count(), 0);
}

#[test]
fn test_update_series_progress_and_rating() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    let id = catalog.register(series_draft("The Wire")).unwrap().id;

    let updated = catalog
        .update(
            id,
            MediaUpdate {
                watched_episodes: Some(12),
                rating: Rating::new(7),
            },
        )
        .unwrap();

    assert_eq!(updated.watched_episodes(), 12);
    assert_eq!(updated.rating, Rating::new(7));
    assert_eq!(catalog.get(id), Some(&updated));
    assert_eq!(catalog.store().save_count(), 2);
}

#[test]
fn test_update_skip_rating_keeps_existing() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    let id = catalog.register(movie_draft("Heat")).unwrap().id;
    catalog
        .update(id, MediaUpdate { watched_episodes: None, rating: Rating::new(9) })
        .unwrap();

    for skipped in [0, 11, -1] {
        let updated = catalog
            .update(
                id,
                MediaUpdate {
                    watched_episodes: None,
                    rating: Rating::from_input(skipped),
                },
            )
            .unwrap();
        assert_eq!(updated.rating, Rating::new(9));
    }
}

#[test]
fn test_update_watched_episodes_not_capped() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    let id = catalog.register(series_draft("Dark")).unwrap().id;
    let updated = catalog
        .update(id, MediaUpdate { watched_episodes: Some(500), rating: None })
        .unwrap();
    assert_eq!(updated.watched_episodes(), 500);
}

#[test]
fn test_update_movie_ignores_watched_episodes() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    let id = catalog.register(movie_draft("Alien")).unwrap().id;
    let updated = catalog
        .update(id, MediaUpdate { watched_episodes: Some(3), rating: None })
        .unwrap();
    assert_eq!(updated.kind, MediaKind::Movie { runtime_minutes: 155 });
}

#[test]
fn test_update_unknown_id_is_not_found() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    catalog.register(movie_draft("Alien")).unwrap();

    let err = catalog.update(42, MediaUpdate::default()).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(catalog.store().save_count(), 1);
}

#[test]
fn test_delete_confirmed_removes_item() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    let keep = catalog.register(movie_draft("Keep")).unwrap().id;
    let drop = catalog.register(movie_draft("Drop")).unwrap().id;

    let removed = catalog.delete(drop, true).unwrap();
    assert_eq!(removed.map(|item| item.id), Some(drop));
    assert!(catalog.list().iter().all(|item| item.id != drop));
    assert!(catalog.get(keep).is_some());
    assert_eq!(catalog.store().snapshot().len(), 1);
}

#[test]
fn test_delete_unconfirmed_is_noop() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    let id = catalog.register(movie_draft("Stay")).unwrap().id;
    let saves = catalog.store().save_count();

    assert_eq!(catalog.delete(id, false).unwrap(), None);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.store().save_count(), saves);
}

#[test]
fn test_delete_unknown_id_is_not_found() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    assert!(catalog.delete(7, true).unwrap_err().is_not_found());
    assert!(catalog.delete(7, false).unwrap_err().is_not_found());
}

#[test]
fn test_failed_writes_roll_back_memory() {
    let mut seed = MediaCatalog::open(MemoryStore::new());
    let existing = seed.register(series_draft("Fargo")).unwrap();

    let mut catalog = MediaCatalog::open(ReadOnlyStore(vec![existing.clone()]));

    assert!(matches!(
        catalog.register(movie_draft("New")),
        Err(CatalogError::Persist(_))
    ));
    assert_eq!(catalog.len(), 1);

    assert!(catalog
        .update(existing.id, MediaUpdate { watched_episodes: Some(3), rating: Rating::new(5) })
        .is_err());
    assert_eq!(catalog.get(existing.id), Some(&existing));

    assert!(catalog.delete(existing.id, true).is_err());
    assert_eq!(catalog.list(), &[existing]);
}

#[test]
fn test_list_view_prefers_override() {
    let mut catalog = MediaCatalog::open(MemoryStore::new());
    catalog.register(movie_draft("A")).unwrap();
    catalog.register(movie_draft("B")).unwrap();

    let all = catalog.list_view(None);
    assert_eq!(all.len(), 2);

    let only_b: Vec<&MediaItem> = catalog.list().iter().filter(|i| i.title == "B").collect();
    let view = catalog.list_view(Some(only_b));
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].title, "B");
}

#[test]
fn test_mutations_survive_reopen_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dados.json");

    let mut catalog = MediaCatalog::open(JsonFileStore::new(&path));
    let dune = catalog.register(movie_draft("Dune")).unwrap();
    let show = catalog.register(series_draft("Succession")).unwrap();
    catalog
        .update(show.id, MediaUpdate { watched_episodes: Some(4), rating: Rating::new(10) })
        .unwrap();
    catalog.delete(dune.id, true).unwrap();

    let reopened = MediaCatalog::open(JsonFileStore::new(&path));
    assert_eq!(reopened.list(), catalog.list());
    assert_eq!(reopened.list()[0].rating, Rating::new(10));
    assert_eq!(reopened.list()[0].watched_episodes(), 4);
}

#[test]
fn test_reload_picks_up_external_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dados.json");

    let mut first = MediaCatalog::open(JsonFileStore::new(&path));
    let mut second = MediaCatalog::open(JsonFileStore::new(&path));
    first.register(movie_draft("Solaris")).unwrap();

    assert!(second.is_empty());
    second.reload();
    assert_eq!(second.len(), 1);
}
