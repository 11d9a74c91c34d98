use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{CatalogId, MediaKind};

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Image CDN size buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Search result thumbnails
    W92,
    /// Cards and detail posters
    W500,
    /// Full-bleed backdrops
    Original,
}

impl ImageSize {
    fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W92 => "w92",
            ImageSize::W500 => "w500",
            ImageSize::Original => "original",
        }
    }
}

/// Builds an image CDN URL for a catalog image path
pub fn image_url(path: &str, size: ImageSize) -> String {
    format!("{}/{}{}", IMAGE_BASE_URL, size.as_str(), path)
}

/// Year component of a `YYYY-MM-DD` catalog date. Blank or malformed dates have none.
pub fn year_from_date(date: Option<&str>) -> Option<i32> {
    date.map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.year())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Movies carry `title`, series carry `name`
fn display_title(title: Option<String>, name: Option<String>) -> String {
    title
        .filter(|t| !t.trim().is_empty())
        .or(name)
        .unwrap_or_default()
}

// ============================================================================
// Catalog API Types
// ============================================================================

/// Raw record from the catalog's multi-type search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogRecord {
    pub id: CatalogId,
    pub media_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
}

impl CatalogRecord {
    /// Projects the record into a search result, or `None` when it is not a movie or series
    pub fn into_result_item(self) -> Option<ResultItem> {
        let media_kind = MediaKind::from_catalog_tag(&self.media_type)?;
        let year = year_from_date(
            non_blank(self.release_date.as_deref()).or(self.first_air_date.as_deref()),
        );

        Some(ResultItem {
            media_kind,
            id: self.id,
            display_title: display_title(self.title, self.name),
            poster_path: self.poster_path,
            year,
        })
    }
}

/// Raw entry from a curated list endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListRecord {
    pub id: CatalogId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
}

// ============================================================================
// Projections returned to the client
// ============================================================================

/// Immutable projection of a search hit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultItem {
    pub media_kind: MediaKind,
    pub id: CatalogId,
    pub display_title: String,
    pub poster_path: Option<String>,
    pub year: Option<i32>,
}

impl ResultItem {
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|p| image_url(p, ImageSize::W92))
    }
}

/// A card in a browse row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogTitle {
    pub media_kind: MediaKind,
    pub id: CatalogId,
    pub display_title: String,
    pub overview: Option<String>,
    pub vote_average: f64,
    pub year: Option<i32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

impl CatalogTitle {
    pub fn from_list_record(media_kind: MediaKind, record: ListRecord) -> Self {
        let year = year_from_date(
            non_blank(record.release_date.as_deref()).or(record.first_air_date.as_deref()),
        );

        CatalogTitle {
            media_kind,
            id: record.id,
            display_title: display_title(record.title, record.name),
            overview: record.overview,
            vote_average: record.vote_average,
            year,
            poster_url: record
                .poster_path
                .as_deref()
                .map(|p| image_url(p, ImageSize::W500)),
            backdrop_url: record
                .backdrop_path
                .as_deref()
                .map(|p| image_url(p, ImageSize::Original)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(media_type: &str) -> CatalogRecord {
        CatalogRecord {
            id: 272,
            media_type: media_type.to_string(),
            title: None,
            name: None,
            poster_path: None,
            release_date: None,
            first_air_date: None,
        }
    }

    #[test]
    fn test_blank_title_falls_back_to_name() {
        let item = CatalogRecord {
            title: Some("  ".to_string()),
            name: Some("Breaking Bad".to_string()),
            ..record("tv")
        }
        .into_result_item()
        .unwrap();
        assert_eq!(item.display_title, "Breaking Bad");

        let card = CatalogTitle::from_list_record(
            MediaKind::Series,
            ListRecord {
                id: 1396,
                title: Some(String::new()),
                name: Some("Breaking Bad".to_string()),
                poster_path: None,
                backdrop_path: None,
                overview: None,
                vote_average: 0.0,
                release_date: None,
                first_air_date: None,
            },
        );
        assert_eq!(card.display_title, "Breaking Bad");
    }

    #[test]
    fn test_year_from_date() {
        assert_eq!(year_from_date(Some("2008-07-16")), Some(2008));
        assert_eq!(year_from_date(Some("")), None);
        assert_eq!(year_from_date(Some("soon")), None);
        assert_eq!(year_from_date(None), None);
    }

    #[test]
    fn test_movie_record_projection() {
        let item = CatalogRecord {
            title: Some("Batman Begins".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            release_date: Some("2005-06-10".to_string()),
            ..record("movie")
        }
        .into_result_item()
        .unwrap();

        assert_eq!(item.media_kind, MediaKind::Movie);
        assert_eq!(item.id, 272);
        assert_eq!(item.display_title, "Batman Begins");
        assert_eq!(item.year, Some(2005));
        assert_eq!(
            item.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w92/poster.jpg")
        );
    }

    #[test]
    fn test_series_record_uses_name_and_first_air_date() {
        let item = CatalogRecord {
            name: Some("Batman: The Animated Series".to_string()),
            first_air_date: Some("1992-09-05".to_string()),
            ..record("tv")
        }
        .into_result_item()
        .unwrap();

        assert_eq!(item.media_kind, MediaKind::Series);
        assert_eq!(item.display_title, "Batman: The Animated Series");
        assert_eq!(item.year, Some(1992));
    }

    #[test]
    fn test_blank_release_date_falls_back_to_first_air_date() {
        let item = CatalogRecord {
            name: Some("Gotham".to_string()),
            release_date: Some(String::new()),
            first_air_date: Some("2014-09-22".to_string()),
            ..record("tv")
        }
        .into_result_item()
        .unwrap();

        assert_eq!(item.year, Some(2014));
    }

    #[test]
    fn test_series_without_poster_has_no_poster_url() {
        let item = CatalogRecord {
            name: Some("Batman: The Animated Series".to_string()),
            first_air_date: Some("1992-09-05".to_string()),
            ..record("tv")
        }
        .into_result_item()
        .unwrap();

        assert_eq!(item.year, Some(1992));
        assert_eq!(item.poster_url(), None);
    }

    #[test]
    fn test_person_record_is_dropped() {
        let person = CatalogRecord {
            name: Some("Christian Bale".to_string()),
            ..record("person")
        };
        assert_eq!(person.into_result_item(), None);
    }

    #[test]
    fn test_search_record_deserialization() {
        let json = r#"{
            "id": 155,
            "media_type": "movie",
            "title": "The Dark Knight",
            "poster_path": "/qJ2tW6WMUDux911r6m7haRef0WH.jpg",
            "release_date": "2008-07-16",
            "popularity": 123.4
        }"#;

        let record: CatalogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 155);
        assert_eq!(record.media_type, "movie");
        assert_eq!(record.name, None);
    }

    #[test]
    fn test_list_record_to_catalog_title() {
        let json = r#"{
            "id": 1399,
            "name": "Game of Thrones",
            "poster_path": "/p.jpg",
            "backdrop_path": "/b.jpg",
            "overview": "Seven noble families fight for control.",
            "vote_average": 8.4,
            "first_air_date": "2011-04-17"
        }"#;

        let record: ListRecord = serde_json::from_str(json).unwrap();
        let title = CatalogTitle::from_list_record(MediaKind::Series, record);

        assert_eq!(title.display_title, "Game of Thrones");
        assert_eq!(title.year, Some(2011));
        assert_eq!(
            title.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/p.jpg")
        );
        assert_eq!(
            title.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/b.jpg")
        );
    }
}
