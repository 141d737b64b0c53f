use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Liveness probe.
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "working" }))
}

/// GET /health
/// Reports which upstream the service is wired to. Never reveals the key itself.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "status": "ok",
        "provider": "openrouter",
        "model": config.model,
        "baseURL": config.base_url,
        "hasKey": config.has_api_key(),
    }))
}
