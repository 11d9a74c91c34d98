/// Catalog metadata abstraction
///
/// Everything the browse, detail and search surfaces read about titles comes through
/// `CatalogClient`. The production implementation talks to TMDB; tests swap in mocks.
use crate::{
    error::AppResult,
    models::{
        CatalogId, CatalogRecord, CatalogTitle, ListCategory, MediaKind, MovieDetails,
        SeasonDetails, SeasonSummary, SeriesDetails,
    },
};

pub mod tmdb;

pub use tmdb::TmdbCatalog;

/// Read-only access to the external catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Multi-type search. Returns raw records of every kind, including people.
    async fn search_multi(&self, query: &str) -> AppResult<Vec<CatalogRecord>>;

    /// One curated list (trending, popular, top rated) for a media kind
    async fn list(
        &self,
        category: ListCategory,
        media_kind: MediaKind,
    ) -> AppResult<Vec<CatalogTitle>>;

    async fn movie_details(&self, id: CatalogId) -> AppResult<MovieDetails>;

    async fn series_details(&self, id: CatalogId) -> AppResult<SeriesDetails>;

    /// Seasons of a series
    ///
    /// Default implementation reads them off the series details.
    async fn seasons(&self, series_id: CatalogId) -> AppResult<Vec<SeasonSummary>> {
        Ok(self.series_details(series_id).await?.seasons)
    }

    /// Episodes of a single season
    async fn season_episodes(&self, series_id: CatalogId, season: u32)
        -> AppResult<SeasonDetails>;

    /// Catalog name for logging
    fn name(&self) -> &'static str;
}
