//! Health check handler.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

/// Reports service health.
///
/// `GET /health` — `200 OK` when the record store answers, otherwise
/// `503 Service Unavailable`. The search index is not probed: queries
/// against a cold index already degrade gracefully.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.books().ping() {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        ),
    }
}
