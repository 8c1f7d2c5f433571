use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use super::{AppState, HandlerResult};

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to the Dosa Restaurant API!" }))
}

/// Liveness probe that also round-trips a query through the pool
pub async fn health(State((backend, _)): State<AppState>) -> HandlerResult {
    backend.health_check().await.map_err(|e| e.to_response())?;
    Ok(Json(json!({ "status": "ok" })).into_response())
}
