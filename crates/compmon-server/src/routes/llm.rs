//! LLM provider configuration routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use compmon_llm::LlmConfigUpdate;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/llm/status", get(get_status))
        .route("/llm/config", get(get_config).put(update_config))
}

/// GET /api/llm/status — availability summary.
async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let config = state.llm_config.read();
    let resolved = config.resolve_provider();

    Json(serde_json::json!({
        "llmAvailable": resolved.is_some(),
        "llmProvider": resolved.as_ref().map(|r| r.provider.to_string()),
        "model": resolved.as_ref().map(|r| r.model.clone()),
    }))
}

/// GET /api/llm/config — masked provider config.
async fn get_config(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let config = state.llm_config.read();
    Json(serde_json::to_value(config.to_response()).unwrap_or_default())
}

/// PUT /api/llm/config — merge an update and persist it.
async fn update_config(
    State(state): State<Arc<AppState>>,
    Json(update): Json<LlmConfigUpdate>,
) -> impl IntoResponse {
    let mut config = state.llm_config.write();
    config.apply_update(&update);

    if let Err(e) = config.save() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": format!("Failed to save config: {}", e) })),
        );
    }

    (
        StatusCode::OK,
        Json(serde_json::to_value(config.to_response()).unwrap_or_default()),
    )
}
