use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

pub mod catalog;
pub mod playback;
pub mod search;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
