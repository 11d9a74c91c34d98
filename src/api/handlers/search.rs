use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::AppState,
    error::AppResult,
    middleware::request_id::RequestId,
    models::{CatalogId, MediaKind, NavigationTarget},
    services::search::SearchSnapshot,
};

#[derive(Debug, Serialize)]
pub struct SearchSessionResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub snapshot: SearchSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct SetQueryRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectResultRequest {
    pub media_kind: MediaKind,
    pub id: CatalogId,
}

/// Opens the search surface
pub async fn open_session(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> (StatusCode, Json<SearchSessionResponse>) {
    let (id, controller) = state.open_search().await;
    tracing::info!(request_id = %request_id, session_id = %id, "Search session opened");

    let snapshot = controller.snapshot().await;
    (StatusCode::CREATED, Json(SearchSessionResponse { id, snapshot }))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SearchSessionResponse>> {
    let snapshot = state.search(id).await?.snapshot().await;
    Ok(Json(SearchSessionResponse { id, snapshot }))
}

/// One keystroke's worth of query text
pub async fn set_query(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetQueryRequest>,
) -> AppResult<Json<SearchSessionResponse>> {
    let snapshot = state.search(id).await?.set_query_text(request.text).await;
    Ok(Json(SearchSessionResponse { id, snapshot }))
}

/// Picks a result; the session ends and the client navigates to the returned target
pub async fn select_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectResultRequest>,
) -> AppResult<Json<NavigationTarget>> {
    let controller = state.search(id).await?;
    let target = controller
        .select_result(request.media_kind, request.id)
        .await?;

    state.close_search(id).await?;
    Ok(Json(target))
}

pub async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.close_search(id).await?;
    tracing::info!(session_id = %id, "Search session closed");
    Ok(StatusCode::NO_CONTENT)
}
