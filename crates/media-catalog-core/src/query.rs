//! Read-only views over a catalog snapshot.
//!
//! Every function takes any iterator of item references and returns borrowed
//! results, so views compose: `sort_by(filter_by_genre(catalog.list(), "drama"), SortKey::Year)`.

use media_catalog_models::{MediaItem, MediaType, Rating};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// A-Z, ignoring case.
    Title,
    /// Newest first.
    Year,
    /// Highest first, unrated counted as 0.
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Genre,
    Platform,
}

/// Items with a genre equal to `genre`, ignoring case. Stored genres are
/// compared trimmed; the query is taken as given.
pub fn filter_by_genre<'a, I>(items: I, genre: &str) -> Vec<&'a MediaItem>
where
    I: IntoIterator<Item = &'a MediaItem>,
{
    let wanted = genre.to_lowercase();
    items
        .into_iter()
        .filter(|item| item.genres.iter().any(|g| g.trim().to_lowercase() == wanted))
        .collect()
}

/// Items whose platform contains `platform`, ignoring case.
pub fn filter_by_platform<'a, I>(items: I, platform: &str) -> Vec<&'a MediaItem>
where
    I: IntoIterator<Item = &'a MediaItem>,
{
    let wanted = platform.to_lowercase();
    items
        .into_iter()
        .filter(|item| item.platform.to_lowercase().contains(&wanted))
        .collect()
}

pub fn apply_filter<'a, I>(items: I, field: FilterField, value: &str) -> Vec<&'a MediaItem>
where
    I: IntoIterator<Item = &'a MediaItem>,
{
    match field {
        FilterField::Genre => filter_by_genre(items, value),
        FilterField::Platform => filter_by_platform(items, value),
    }
}

/// Items whose title contains `term`, ignoring case.
pub fn search<'a, I>(items: I, term: &str) -> Vec<&'a MediaItem>
where
    I: IntoIterator<Item = &'a MediaItem>,
{
    let wanted = term.to_lowercase();
    items
        .into_iter()
        .filter(|item| item.title.to_lowercase().contains(&wanted))
        .collect()
}

/// Stable sort: items with equal keys keep their relative order.
pub fn sort_by<'a, I>(items: I, key: SortKey) -> Vec<&'a MediaItem>
where
    I: IntoIterator<Item = &'a MediaItem>,
{
    let mut sorted: Vec<&MediaItem> = items.into_iter().collect();
    match key {
        SortKey::Title => sorted.sort_by_cached_key(|item| item.title.to_lowercase()),
        SortKey::Year => sorted.sort_by_key(|item| Reverse(item.release_year)),
        SortKey::Rating => sorted.sort_by_key(|item| Reverse(rating_or_zero(item.rating))),
    }
    debug!("Sorted {} items by {}", sorted.len(), key);
    sorted
}

fn rating_or_zero(rating: Option<Rating>) -> u8 {
    rating.map(Rating::value).unwrap_or(0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub movies: usize,
    pub series: usize,
    pub minutes_watched: u64,
    pub episodes_watched: u64,
}

/// Aggregate watch time split into whole hours and leftover minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WatchTime {
    pub hours: u64,
    pub minutes: u64,
}

impl CatalogStats {
    pub fn watch_time(&self) -> WatchTime {
        WatchTime {
            hours: self.minutes_watched / 60,
            minutes: self.minutes_watched % 60,
        }
    }
}

impl fmt::Display for WatchTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}min", self.hours, self.minutes)
    }
}

/// Counts and watch time. A movie counts its full runtime; a series counts
/// watched episodes times episode length.
pub fn statistics<'a, I>(items: I) -> CatalogStats
where
    I: IntoIterator<Item = &'a MediaItem>,
{
    items.into_iter().fold(CatalogStats::default(), |mut stats, item| {
        stats.total += 1;
        match item.media_type() {
            MediaType::Movie => stats.movies += 1,
            MediaType::Series => {
                stats.series += 1;
                stats.episodes_watched += u64::from(item.watched_episodes());
            }
        }
        stats.minutes_watched += item.minutes_watched();
        stats
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedItem<'a> {
    /// 1-based.
    pub position: usize,
    pub rating: Rating,
    pub item: &'a MediaItem,
}

/// Rated items only, best first. Ties keep catalog order.
pub fn ranking<'a, I>(items: I) -> Vec<RankedItem<'a>>
where
    I: IntoIterator<Item = &'a MediaItem>,
{
    let mut rated: Vec<(Rating, &MediaItem)> = items
        .into_iter()
        .filter_map(|item| item.rating.map(|rating| (rating, item)))
        .collect();
    rated.sort_by_key(|(rating, _)| Reverse(*rating));

    rated
        .into_iter()
        .enumerate()
        .map(|(index, (rating, item))| RankedItem {
            position: index + 1,
            rating,
            item,
        })
        .collect()
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Title => write!(f, "title"),
            SortKey::Year => write!(f, "year"),
            SortKey::Rating => write!(f, "rating"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" | "titulo" | "título" => Ok(SortKey::Title),
            "year" | "ano" => Ok(SortKey::Year),
            "rating" | "nota" => Ok(SortKey::Rating),
            other => Err(format!("Invalid sort key: {}. Use 'title', 'year' or 'rating'", other)),
        }
    }
}
