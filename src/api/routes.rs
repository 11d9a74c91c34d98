use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{self, catalog, playback, search};
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/catalog/featured", get(catalog::featured))
        .route("/catalog/lists/:media_kind", get(catalog::browse_rows))
        .route("/catalog/lists/:media_kind/:category", get(catalog::list))
        .route("/catalog/movie/:id", get(catalog::movie_details))
        .route("/catalog/series/:id", get(catalog::series_details))
        .route("/catalog/series/:id/seasons", get(catalog::seasons))
        .route(
            "/catalog/series/:id/seasons/:season",
            get(catalog::season_episodes),
        )
        // Search
        .route("/search/sessions", post(search::open_session))
        .route(
            "/search/sessions/:id",
            get(search::get_session).delete(search::close_session),
        )
        .route("/search/sessions/:id/query", put(search::set_query))
        .route("/search/sessions/:id/select", post(search::select_result))
        // Playback
        .route("/playback/providers", get(playback::list_providers))
        .route("/playback/sessions", post(playback::open_session))
        .route(
            "/playback/sessions/:id",
            get(playback::get_session).delete(playback::close_session),
        )
        .route("/playback/sessions/:id/load", post(playback::record_load))
        .route(
            "/playback/sessions/:id/advance",
            post(playback::advance_provider),
        )
        .route(
            "/playback/sessions/:id/advisory/dismiss",
            post(playback::dismiss_advisory),
        )
}
