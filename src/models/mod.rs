use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod details;
pub mod playback;
pub mod title;

pub use details::{Episode, Genre, MovieDetails, SeasonDetails, SeasonSummary, SeriesDetails};
pub use playback::{NavigationTarget, PlaybackRequest};
pub use title::{image_url, CatalogRecord, CatalogTitle, ImageSize, ListRecord, ResultItem};

/// Opaque numeric catalog identifier
pub type CatalogId = u64;

/// Kind of media a catalog record describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    #[serde(alias = "tv")]
    Series,
}

impl MediaKind {
    /// Maps the catalog's kind discriminator. Anything other than movie or tv is not ours.
    pub fn from_catalog_tag(tag: &str) -> Option<Self> {
        match tag {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::Series),
            _ => None,
        }
    }

    /// Path segment the catalog API uses for this kind
    pub fn catalog_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Series => write!(f, "series"),
        }
    }
}

/// Curated list families exposed by the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ListCategory {
    /// Weekly trending
    Trending,
    Popular,
    TopRated,
}

impl ListCategory {
    pub const ALL: [ListCategory; 3] = [
        ListCategory::Trending,
        ListCategory::Popular,
        ListCategory::TopRated,
    ];

    /// Catalog API path for this list and kind
    pub fn catalog_path(&self, kind: MediaKind) -> String {
        let segment = kind.catalog_segment();
        match self {
            ListCategory::Trending => format!("trending/{}/week", segment),
            ListCategory::Popular => format!("{}/popular", segment),
            ListCategory::TopRated => format!("{}/top_rated", segment),
        }
    }
}

impl Display for ListCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListCategory::Trending => write!(f, "trending"),
            ListCategory::Popular => write!(f, "popular"),
            ListCategory::TopRated => write!(f, "top_rated"),
        }
    }
}

/// The three browse rows for one media kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowseRows {
    pub media_kind: MediaKind,
    pub trending: Vec<CatalogTitle>,
    pub popular: Vec<CatalogTitle>,
    pub top_rated: Vec<CatalogTitle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_from_catalog_tag() {
        assert_eq!(MediaKind::from_catalog_tag("movie"), Some(MediaKind::Movie));
        assert_eq!(MediaKind::from_catalog_tag("tv"), Some(MediaKind::Series));
        assert_eq!(MediaKind::from_catalog_tag("person"), None);
        assert_eq!(MediaKind::from_catalog_tag("Movie"), None);
    }

    #[test]
    fn test_media_kind_serde_accepts_tv_alias() {
        let kind: MediaKind = serde_json::from_str("\"tv\"").unwrap();
        assert_eq!(kind, MediaKind::Series);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"series\"");
    }

    #[test]
    fn test_list_category_paths() {
        assert_eq!(
            ListCategory::Trending.catalog_path(MediaKind::Movie),
            "trending/movie/week"
        );
        assert_eq!(
            ListCategory::Popular.catalog_path(MediaKind::Series),
            "tv/popular"
        );
        assert_eq!(
            ListCategory::TopRated.catalog_path(MediaKind::Series),
            "tv/top_rated"
        );
    }

    #[test]
    fn test_list_category_serialization() {
        let json = serde_json::to_string(&ListCategory::TopRated).unwrap();
        assert_eq!(json, "\"top_rated\"");
    }
}
