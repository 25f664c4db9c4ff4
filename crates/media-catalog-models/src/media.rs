use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::rating::Rating;

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaItem {
    pub id: u64,
    pub title: String,
    pub genres: Vec<String>,
    pub release_year: i32,
    pub platform: String,
    pub rating: Option<Rating>,
    pub kind: MediaKind,
}

/// Variant-specific data. Series carry their episode counters; movies only a runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum MediaKind {
    Movie {
        runtime_minutes: u32,
    },
    Series {
        season_count: u32,
        total_episodes: u32,
        /// Not clamped to `total_episodes`.
        watched_episodes: u32,
        episode_minutes: u32,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaItem {
    pub fn media_type(&self) -> MediaType {
        match self.kind {
            MediaKind::Movie { .. } => MediaType::Movie,
            MediaKind::Series { .. } => MediaType::Series,
        }
    }

    pub fn is_series(&self) -> bool {
        matches!(self.kind, MediaKind::Series { .. })
    }

    /// Runtime for a movie, per-episode duration for a series.
    pub fn duration_minutes(&self) -> u32 {
        match self.kind {
            MediaKind::Movie { runtime_minutes } => runtime_minutes,
            MediaKind::Series { episode_minutes, .. } => episode_minutes,
        }
    }

    pub fn watched_episodes(&self) -> u32 {
        match self.kind {
            MediaKind::Movie { .. } => 0,
            MediaKind::Series { watched_episodes, .. } => watched_episodes,
        }
    }

    /// Minutes this entry contributes to the watch-time total.
    pub fn minutes_watched(&self) -> u64 {
        match self.kind {
            MediaKind::Movie { runtime_minutes } => u64::from(runtime_minutes),
            MediaKind::Series { watched_episodes, episode_minutes, .. } => {
                u64::from(watched_episodes) * u64::from(episode_minutes)
            }
        }
    }

    pub fn genres_joined(&self) -> String {
        self.genres.join(", ")
    }
}

/// Split a comma-delimited genre list, trimming each token and dropping empty ones.
pub fn parse_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Series => write!(f, "Series"),
        }
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "film" | "filme" => Ok(MediaType::Movie),
            "series" | "show" | "série" | "serie" => Ok(MediaType::Series),
            other => Err(format!("Invalid media type: {}. Use 'movie' or 'series'", other)),
        }
    }
}
