use crate::{
    error::{AppError, AppResult},
    models::{BrowseRows, CatalogTitle, ListCategory, MediaKind},
    services::catalog::CatalogClient,
};
use std::sync::Arc;

/// Hero title for the home page: the top weekly trending movie
pub async fn featured_title(catalog: Arc<dyn CatalogClient>) -> AppResult<CatalogTitle> {
    catalog
        .list(ListCategory::Trending, MediaKind::Movie)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound("No trending movies to feature".to_string()))
}

/// Trending, popular and top rated rows for one kind, fetched concurrently
///
/// Any failing row fails the whole set.
pub async fn browse_rows(
    catalog: Arc<dyn CatalogClient>,
    media_kind: MediaKind,
) -> AppResult<BrowseRows> {
    let (trending, popular, top_rated) = tokio::try_join!(
        catalog.list(ListCategory::Trending, media_kind),
        catalog.list(ListCategory::Popular, media_kind),
        catalog.list(ListCategory::TopRated, media_kind),
    )?;

    tracing::info!(
        media_kind = %media_kind,
        trending = trending.len(),
        popular = popular.len(),
        top_rated = top_rated.len(),
        "Browse rows loaded"
    );

    Ok(BrowseRows {
        media_kind,
        trending,
        popular,
        top_rated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::MockCatalogClient;
    use mockall::predicate::eq;

    fn title(id: u64, name: &str) -> CatalogTitle {
        CatalogTitle {
            media_kind: MediaKind::Movie,
            id,
            display_title: name.to_string(),
            overview: None,
            vote_average: 7.0,
            year: None,
            poster_url: None,
            backdrop_url: None,
        }
    }

    #[tokio::test]
    async fn test_featured_is_first_trending_movie() {
        let mut mock = MockCatalogClient::new();
        mock.expect_list()
            .with(eq(ListCategory::Trending), eq(MediaKind::Movie))
            .times(1)
            .returning(|_, _| Ok(vec![title(1, "Dune"), title(2, "Alien")]));

        let featured = featured_title(Arc::new(mock)).await.unwrap();
        assert_eq!(featured.display_title, "Dune");
    }

    #[tokio::test]
    async fn test_featured_with_empty_trending_is_not_found() {
        let mut mock = MockCatalogClient::new();
        mock.expect_list().returning(|_, _| Ok(vec![]));

        let result = featured_title(Arc::new(mock)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_browse_rows_routes_each_category() {
        let mut mock = MockCatalogClient::new();
        mock.expect_list()
            .times(3)
            .returning(|category, _| match category {
                ListCategory::Trending => Ok(vec![title(1, "Trending")]),
                ListCategory::Popular => Ok(vec![title(2, "Popular")]),
                ListCategory::TopRated => Ok(vec![title(3, "Top")]),
            });

        let rows = browse_rows(Arc::new(mock), MediaKind::Series).await.unwrap();
        assert_eq!(rows.media_kind, MediaKind::Series);
        assert_eq!(rows.trending[0].display_title, "Trending");
        assert_eq!(rows.popular[0].display_title, "Popular");
        assert_eq!(rows.top_rated[0].display_title, "Top");
    }

    #[tokio::test]
    async fn test_browse_rows_fail_together() {
        let mut mock = MockCatalogClient::new();
        mock.expect_list().returning(|category, _| match category {
            ListCategory::Popular => Err(AppError::ExternalApi("503".to_string())),
            _ => Ok(vec![]),
        });

        let result = browse_rows(Arc::new(mock), MediaKind::Movie).await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }
}
