//! Health and stats routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(get_health))
        .route("/stats", get(get_stats))
}

/// GET /api/health — service status and configured providers.
async fn get_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let llm = state.llm_config.read();
    let db_available = state.store.count_analyses().is_ok();

    Json(serde_json::json!({
        "status": "ok",
        "service": "compmon",
        "version": env!("CARGO_PKG_VERSION"),
        "perplexityConfigured": llm.perplexity_api_key.is_some(),
        "openaiConfigured": llm.openai_api_key.is_some(),
        "dbAvailable": db_available,
    }))
}

/// GET /api/stats — store statistics.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.store.get_stats().unwrap_or_else(|_| {
        compmon_store::StoreStats {
            total_analyses: 0,
            scored_analyses: 0,
            db_path: String::new(),
            db_size_mb: 0.0,
        }
    });

    Json(serde_json::json!({
        "analyses": stats.total_analyses,
        "scored": stats.scored_analyses,
        "dbSizeMb": stats.db_size_mb,
        "dbPath": stats.db_path,
    }))
}
