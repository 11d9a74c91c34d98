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
    models::{CatalogId, MediaKind, PlaybackRequest},
    services::playback::{EmbedProvider, LoadSignal, PlaybackSession, PlaybackSnapshot},
    services::EMBED_PROVIDERS,
};

#[derive(Debug, Serialize)]
pub struct PlaybackSessionResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub snapshot: PlaybackSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct OpenPlaybackRequest {
    pub media_kind: MediaKind,
    pub catalog_id: CatalogId,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub episode: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct LoadSignalRequest {
    pub signal: LoadSignal,
    /// Attempt the signal belongs to; omitted means the current one
    #[serde(default)]
    pub attempt: Option<u64>,
}

/// Provider cycle order
pub async fn list_providers() -> Json<Vec<EmbedProvider>> {
    Json(EMBED_PROVIDERS.to_vec())
}

/// "Play" pressed
pub async fn open_session(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<OpenPlaybackRequest>,
) -> AppResult<(StatusCode, Json<PlaybackSessionResponse>)> {
    let request = PlaybackRequest::new(
        request.media_kind,
        request.catalog_id,
        request.season,
        request.episode,
    )?;

    let session = PlaybackSession::open(request);
    let snapshot = session.snapshot();
    let id = state.open_playback(session).await;

    tracing::info!(
        request_id = %request_id,
        session_id = %id,
        media_kind = %request.media_kind,
        catalog_id = request.catalog_id,
        provider = snapshot.provider.id,
        "Playback session opened"
    );

    Ok((
        StatusCode::CREATED,
        Json(PlaybackSessionResponse { id, snapshot }),
    ))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PlaybackSessionResponse>> {
    let snapshot = state.with_playback(id, |s| Ok(s.snapshot())).await?;
    Ok(Json(PlaybackSessionResponse { id, snapshot }))
}

/// Load or error event from the embedded player
pub async fn record_load(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<LoadSignalRequest>,
) -> AppResult<Json<PlaybackSessionResponse>> {
    let snapshot = state
        .with_playback(id, |s| {
            s.record_load(request.signal, request.attempt);
            Ok(s.snapshot())
        })
        .await?;
    Ok(Json(PlaybackSessionResponse { id, snapshot }))
}

/// "Try a different source"
pub async fn advance_provider(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PlaybackSessionResponse>> {
    let snapshot = state
        .with_playback(id, |s| {
            s.advance_provider()?;
            Ok(s.snapshot())
        })
        .await?;
    Ok(Json(PlaybackSessionResponse { id, snapshot }))
}

pub async fn dismiss_advisory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PlaybackSessionResponse>> {
    let snapshot = state
        .with_playback(id, |s| {
            s.dismiss_advisory();
            Ok(s.snapshot())
        })
        .await?;
    Ok(Json(PlaybackSessionResponse { id, snapshot }))
}

pub async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.close_playback(id).await?.close();
    Ok(StatusCode::NO_CONTENT)
}
