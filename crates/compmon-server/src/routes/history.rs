//! History routes — listing, retrieval, deletion of stored analyses.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/history", get(get_history).delete(clear_history))
        .route("/analysis/{id}", get(get_analysis).delete(delete_analysis))
}

#[derive(Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

/// GET /api/history — newest-first listing.
async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(state.config.history_page_size);
    match (state.store.list_history(limit), state.store.count_analyses()) {
        (Ok(items), Ok(total)) => (
            StatusCode::OK,
            Json(serde_json::json!({ "items": items, "total": total })),
        ),
        (Err(e), _) | (_, Err(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}

/// DELETE /api/history — wipe the whole history.
async fn clear_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.clear() {
        Ok(removed) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "removed": removed })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "success": false, "error": e.to_string() })),
        ),
    }
}

/// GET /api/analysis/{id} — full stored record.
async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.store.get_analysis(id) {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "record": record })),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Analysis not found" })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}

/// DELETE /api/analysis/{id}
async fn delete_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.store.delete_analysis(id) {
        Ok(true) => (
            StatusCode::OK,
            Json(serde_json::json!({ "deleted": true, "id": id })),
        ),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Analysis not found" })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}
