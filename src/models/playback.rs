use serde::{Deserialize, Serialize};

use super::{CatalogId, MediaKind};
use crate::error::{AppError, AppResult};

/// What to play. Built once per "Play" action and never mutated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaybackRequest {
    pub media_kind: MediaKind,
    pub catalog_id: CatalogId,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub episode: Option<u32>,
}

impl PlaybackRequest {
    /// Validates a request arriving from the outside
    pub fn new(
        media_kind: MediaKind,
        catalog_id: CatalogId,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> AppResult<Self> {
        if media_kind == MediaKind::Movie && (season.is_some() || episode.is_some()) {
            return Err(AppError::InvalidInput(
                "Movies cannot target a season or episode".to_string(),
            ));
        }

        Ok(Self {
            media_kind,
            catalog_id,
            season,
            episode,
        })
    }

    pub fn movie(catalog_id: CatalogId) -> Self {
        Self {
            media_kind: MediaKind::Movie,
            catalog_id,
            season: None,
            episode: None,
        }
    }

    /// Whole show, no particular episode
    pub fn series(catalog_id: CatalogId) -> Self {
        Self {
            media_kind: MediaKind::Series,
            catalog_id,
            season: None,
            episode: None,
        }
    }

    pub fn episode(catalog_id: CatalogId, season: u32, episode: u32) -> Self {
        Self {
            media_kind: MediaKind::Series,
            catalog_id,
            season: Some(season),
            episode: Some(episode),
        }
    }

    /// Season and episode, only when this is a series request carrying both
    ///
    /// A zero in either field counts as missing.
    pub fn episode_target(&self) -> Option<(u32, u32)> {
        match (self.media_kind, self.season, self.episode) {
            (MediaKind::Series, Some(season), Some(episode)) if season > 0 && episode > 0 => {
                Some((season, episode))
            }
            _ => None,
        }
    }
}

/// Destination handed to the router after a search selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavigationTarget {
    pub media_kind: MediaKind,
    pub id: CatalogId,
    /// Detail page route, e.g. `/movie/155` or `/tv/1399`
    pub path: String,
}

impl NavigationTarget {
    pub fn detail_page(media_kind: MediaKind, id: CatalogId) -> Self {
        Self {
            media_kind,
            id,
            path: format!("/{}/{}", media_kind.catalog_segment(), id),
        }
    }
}
