use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub id: String,
}

/// POST /save
///
/// Accepts any JSON payload (or none). Nothing is stored; the review text is
/// logged and an opaque id handed back.
pub async fn save_handler(payload: Option<Json<Value>>) -> Json<SaveResponse> {
    let saved = payload
        .as_ref()
        .and_then(|Json(body)| body.get("review").or_else(|| body.get("roast")));
    match saved {
        Some(text) => info!("Save requested: {text}"),
        None => info!("Save requested without review content"),
    }

    Json(SaveResponse {
        id: Uuid::new_v4().to_string(),
    })
}
