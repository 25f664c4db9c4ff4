//! On-disk shape of a catalog entry.
//!
//! Field names are fixed so that catalog files written by earlier versions
//! keep loading. Numbers written as `null` (what earlier versions stored when a
//! numeric prompt got non-numeric text) read back as zero. Ids are the
//! exception to leniency: anything but a whole non-negative number is rejected.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

use crate::media::{parse_genres, MediaItem, MediaKind};
use crate::rating::Rating;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredMedia {
    #[serde(deserialize_with = "stored_id")]
    pub id: u64,
    pub titulo: String,
    pub tipo: StoredKind,
    #[serde(default)]
    pub genero: String,
    #[serde(deserialize_with = "lenient_i32")]
    pub ano: i32,
    #[serde(default)]
    pub plataforma: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub temporadas: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub episodios_total: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub episodios_assistidos: u32,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub nota: Option<u8>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub duracao_media: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StoredKind {
    #[serde(rename = "filme")]
    Movie,
    #[serde(rename = "série")]
    Series,
}

impl From<&MediaItem> for StoredMedia {
    fn from(item: &MediaItem) -> Self {
        let (tipo, temporadas, episodios_total, episodios_assistidos, duracao_media) = match item.kind {
            MediaKind::Movie { runtime_minutes } => (StoredKind::Movie, 0, 0, 0, runtime_minutes),
            MediaKind::Series {
                season_count,
                total_episodes,
                watched_episodes,
                episode_minutes,
            } => (
                StoredKind::Series,
                season_count,
                total_episodes,
                watched_episodes,
                episode_minutes,
            ),
        };

        Self {
            id: item.id,
            titulo: item.title.clone(),
            tipo,
            genero: item.genres_joined(),
            ano: item.release_year,
            plataforma: item.platform.clone(),
            temporadas,
            episodios_total,
            episodios_assistidos,
            nota: item.rating.map(Rating::value),
            duracao_media,
        }
    }
}

impl From<StoredMedia> for MediaItem {
    fn from(stored: StoredMedia) -> Self {
        // Episode counters on a stored movie carry no meaning and are dropped here.
        let kind = match stored.tipo {
            StoredKind::Movie => MediaKind::Movie {
                runtime_minutes: stored.duracao_media,
            },
            StoredKind::Series => MediaKind::Series {
                season_count: stored.temporadas,
                total_episodes: stored.episodios_total,
                watched_episodes: stored.episodios_assistidos,
                episode_minutes: stored.duracao_media,
            },
        };

        Self {
            id: stored.id,
            genres: parse_genres(&stored.genero),
            title: stored.titulo,
            release_year: stored.ano,
            platform: stored.plataforma,
            rating: stored.nota.and_then(Rating::new),
            kind,
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Largest integer a float holds exactly (2^53).
const MAX_EXACT_FLOAT_ID: f64 = 9_007_199_254_740_992.0;

struct StoredIdVisitor;

impl<'de> Visitor<'de> for StoredIdVisitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a whole non-negative id")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
        u64::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<u64, E> {
        if value.fract() != 0.0 || !(0.0..=MAX_EXACT_FLOAT_ID).contains(&value) {
            return Err(E::invalid_value(de::Unexpected::Float(value), &self));
        }
        Ok(value as u64)
    }

    fn visit_unit<E: de::Error>(self) -> Result<u64, E> {
        Ok(0)
    }

    fn visit_none<E: de::Error>(self) -> Result<u64, E> {
        Ok(0)
    }
}

fn stored_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(StoredIdVisitor)
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_number(deserializer).map(|n| n.max(0.0) as u32)
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_number(deserializer).map(|n| n as i32)
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let rating = Rating::from_input(raw.round() as i64);
    if rating.is_none() {
        warn!("Ignoring stored rating {} outside 1-10, treating entry as unrated", raw);
    }
    Ok(rating.map(Rating::value))
}
