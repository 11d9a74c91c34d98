/// TMDB catalog client
///
/// Wraps the handful of read-only TMDB v3 endpoints the site needs:
/// 1. Search: /search/multi → movies, series and people mixed together
/// 2. Lists: /trending/{kind}/week, /{kind}/popular, /{kind}/top_rated
/// 3. Details: /movie/{id}, /tv/{id}, /tv/{id}/season/{n}
///
/// Every call is authenticated with the `api_key` query parameter.
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{
        CatalogId, CatalogRecord, CatalogTitle, ListCategory, ListRecord, MediaKind,
        MovieDetails, SeasonDetails, SeriesDetails,
    },
    services::catalog::CatalogClient,
};
use reqwest::Client as HttpClient;
use serde::{de::DeserializeOwned, Deserialize};

const LIST_CACHE_TTL: u64 = 3600; // 1 hour
const DETAILS_CACHE_TTL: u64 = 3600; // 1 hour

#[derive(Debug, Deserialize)]
struct PagedResponse<T> {
    results: Vec<T>,
}

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    cache: Option<Cache>,
}

impl TmdbCatalog {
    pub fn new(cache: Option<Cache>, api_key: Option<String>, api_url: String) -> Self {
        if api_key.is_none() {
            tracing::warn!("TMDB API key is not configured; catalog requests will fail");
        }

        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or(AppError::MissingCredential)
    }

    /// GETs `{api_url}/{path}` and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let api_key = self.api_key()?;
        let url = format!("{}/{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key)])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogClient for TmdbCatalog {
    async fn search_multi(&self, query: &str) -> AppResult<Vec<CatalogRecord>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let page: PagedResponse<serde_json::Value> = self
            .get_json("search/multi", &[("query", query), ("page", "1")])
            .await?;

        // People and other record shapes may not decode; they are dropped later anyway
        let records: Vec<CatalogRecord> = page
            .results
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();

        tracing::info!(
            query = %query,
            results = records.len(),
            catalog = self.name(),
            "Catalog search completed"
        );

        Ok(records)
    }

    async fn list(
        &self,
        category: ListCategory,
        media_kind: MediaKind,
    ) -> AppResult<Vec<CatalogTitle>> {
        cached!(
            self.cache,
            CacheKey::CatalogList {
                category,
                media_kind,
            },
            LIST_CACHE_TTL,
            async move {
                let page: PagedResponse<ListRecord> = self
                    .get_json(&category.catalog_path(media_kind), &[])
                    .await?;

                let titles: Vec<CatalogTitle> = page
                    .results
                    .into_iter()
                    .map(|record| CatalogTitle::from_list_record(media_kind, record))
                    .collect();

                tracing::info!(
                    category = %category,
                    media_kind = %media_kind,
                    results = titles.len(),
                    catalog = self.name(),
                    "Catalog list fetched"
                );

                Ok::<_, AppError>(titles)
            }
        )
    }

    async fn movie_details(&self, id: CatalogId) -> AppResult<MovieDetails> {
        cached!(
            self.cache,
            CacheKey::MovieDetails(id),
            DETAILS_CACHE_TTL,
            async move {
                self.get_json::<MovieDetails>(&format!("movie/{}", id), &[])
                    .await
            }
        )
    }

    async fn series_details(&self, id: CatalogId) -> AppResult<SeriesDetails> {
        cached!(
            self.cache,
            CacheKey::SeriesDetails(id),
            DETAILS_CACHE_TTL,
            async move { self.get_json::<SeriesDetails>(&format!("tv/{}", id), &[]).await }
        )
    }

    async fn season_episodes(
        &self,
        series_id: CatalogId,
        season: u32,
    ) -> AppResult<SeasonDetails> {
        cached!(
            self.cache,
            CacheKey::Season { series_id, season },
            DETAILS_CACHE_TTL,
            async move {
                self.get_json::<SeasonDetails>(
                    &format!("tv/{}/season/{}", series_id, season),
                    &[],
                )
                .await
            }
        )
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Serves `router` on an ephemeral local port and returns its base URL
    async fn spawn_fixture_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn search_fixture(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        assert_eq!(params.get("api_key").map(String::as_str), Some("test_key"));
        assert_eq!(params.get("page").map(String::as_str), Some("1"));

        Json(json!({
            "page": 1,
            "results": [
                {"id": 272, "media_type": "movie", "title": "Batman Begins", "release_date": "2005-06-10"},
                {"id": 3894, "media_type": "person", "name": "Christian Bale"},
                {"id": 2098, "media_type": "tv", "name": "Batman: The Animated Series"}
            ]
        }))
    }

    #[tokio::test]
    async fn test_missing_credential_fails_without_request() {
        let catalog = TmdbCatalog::new(None, None, "http://127.0.0.1:1".to_string());

        let result = catalog.search_multi("batman").await;
        assert!(matches!(result, Err(AppError::MissingCredential)));

        let result = catalog.movie_details(155).await;
        assert!(matches!(result, Err(AppError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let catalog = TmdbCatalog::new(None, Some("test_key".into()), "http://test.local".into());
        let result = catalog.search_multi("   ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_search_multi_returns_all_kinds() {
        let base = spawn_fixture_server(Router::new().route("/search/multi", get(search_fixture)))
            .await;
        let catalog = TmdbCatalog::new(None, Some("test_key".into()), base);

        let records = catalog.search_multi("batman").await.unwrap();

        let kinds: Vec<&str> = records.iter().map(|r| r.media_type.as_str()).collect();
        assert_eq!(kinds, vec!["movie", "person", "tv"]);
    }

    #[tokio::test]
    async fn test_list_projects_records_for_kind() {
        let router = Router::new().route(
            "/tv/top_rated",
            get(|| async {
                Json(json!({
                    "results": [
                        {"id": 1396, "name": "Breaking Bad", "vote_average": 8.9, "poster_path": "/bb.jpg"}
                    ]
                }))
            }),
        );
        let base = spawn_fixture_server(router).await;
        let catalog = TmdbCatalog::new(None, Some("test_key".into()), format!("{}/", base));

        let titles = catalog
            .list(ListCategory::TopRated, MediaKind::Series)
            .await
            .unwrap();

        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].media_kind, MediaKind::Series);
        assert_eq!(titles[0].display_title, "Breaking Bad");
        assert_eq!(
            titles[0].poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/bb.jpg")
        );
    }

    #[tokio::test]
    async fn test_season_episodes_path() {
        let router = Router::new().route(
            "/tv/:id/season/:season",
            get(|Path((id, season)): Path<(u64, u32)>| async move {
                Json(json!({
                    "season_number": season,
                    "name": format!("Season {} of {}", season, id),
                    "episodes": [{"episode_number": 1}, {"episode_number": 2}]
                }))
            }),
        );
        let base = spawn_fixture_server(router).await;
        let catalog = TmdbCatalog::new(None, Some("test_key".into()), base);

        let season = catalog.season_episodes(1399, 2).await.unwrap();

        assert_eq!(season.season_number, 2);
        assert_eq!(season.name.as_deref(), Some("Season 2 of 1399"));
        assert_eq!(season.episodes.len(), 2);
    }

    #[tokio::test]
    async fn test_non_success_status_is_external_api_error() {
        let router = Router::new().route(
            "/movie/:id",
            get(|| async { (StatusCode::UNAUTHORIZED, "Invalid API key") }),
        );
        let base = spawn_fixture_server(router).await;
        let catalog = TmdbCatalog::new(None, Some("bad_key".into()), base);

        match catalog.movie_details(155).await {
            Err(AppError::ExternalApi(msg)) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("Invalid API key"));
            }
            other => panic!("expected ExternalApi error, got {:?}", other.map(|m| m.id)),
        }
    }

    #[tokio::test]
    async fn test_seasons_read_from_series_details() {
        let router = Router::new().route(
            "/tv/:id",
            get(|| async {
                Json(json!({
                    "id": 1396,
                    "name": "Breaking Bad",
                    "seasons": [{"season_number": 1}, {"season_number": 2}]
                }))
            }),
        );
        let base = spawn_fixture_server(router).await;
        let catalog = TmdbCatalog::new(None, Some("test_key".into()), base);

        let seasons = catalog.seasons(1396).await.unwrap();
        let numbers: Vec<u32> = seasons.iter().map(|s| s.season_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }
}
