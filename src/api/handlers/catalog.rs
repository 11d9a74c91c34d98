use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::AppState,
    error::AppResult,
    models::{
        BrowseRows, CatalogId, CatalogTitle, ListCategory, MediaKind, MovieDetails, SeasonDetails,
        SeasonSummary, SeriesDetails,
    },
    services::browse,
};

/// Home page hero
pub async fn featured(State(state): State<AppState>) -> AppResult<Json<CatalogTitle>> {
    let title = browse::featured_title(state.catalog.clone()).await?;
    Ok(Json(title))
}

/// All browse rows for one kind
pub async fn browse_rows(
    State(state): State<AppState>,
    Path(media_kind): Path<MediaKind>,
) -> AppResult<Json<BrowseRows>> {
    let rows = browse::browse_rows(state.catalog.clone(), media_kind).await?;
    Ok(Json(rows))
}

/// A single curated list
pub async fn list(
    State(state): State<AppState>,
    Path((media_kind, category)): Path<(MediaKind, ListCategory)>,
) -> AppResult<Json<Vec<CatalogTitle>>> {
    let titles = state.catalog.list(category, media_kind).await?;
    Ok(Json(titles))
}

pub async fn movie_details(
    State(state): State<AppState>,
    Path(id): Path<CatalogId>,
) -> AppResult<Json<MovieDetails>> {
    let movie = state.catalog.movie_details(id).await?;
    Ok(Json(movie))
}

pub async fn series_details(
    State(state): State<AppState>,
    Path(id): Path<CatalogId>,
) -> AppResult<Json<SeriesDetails>> {
    let series = state.catalog.series_details(id).await?;
    Ok(Json(series))
}

pub async fn seasons(
    State(state): State<AppState>,
    Path(id): Path<CatalogId>,
) -> AppResult<Json<Vec<SeasonSummary>>> {
    let seasons = state.catalog.seasons(id).await?;
    Ok(Json(seasons))
}

pub async fn season_episodes(
    State(state): State<AppState>,
    Path((id, season)): Path<(CatalogId, u32)>,
) -> AppResult<Json<SeasonDetails>> {
    let details = state.catalog.season_episodes(id, season).await?;
    Ok(Json(details))
}
