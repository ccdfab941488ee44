//! Cross-competitor comparison route.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use compmon_analysis::{compare, score_analysis, Score};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/compare", post(compare_analyses))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompareRequest {
    analysis_ids: Vec<i64>,
}

/// POST /api/compare — rank stored analyses and summarize the market.
///
/// Missing IDs are skipped; records persisted without a score are scored on
/// the fly from their stored analysis.
async fn compare_analyses(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CompareRequest>,
) -> impl IntoResponse {
    let mut entries: Vec<(String, Score)> = Vec::new();

    for id in &req.analysis_ids {
        match state.store.get_analysis(*id) {
            Ok(Some(record)) => {
                let score = record
                    .score
                    .unwrap_or_else(|| score_analysis(&record.analysis));
                entries.push((record.competitor_name, score));
            }
            Ok(None) => {}
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "success": false, "error": e.to_string() })),
                );
            }
        }
    }

    if entries.is_empty() {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "success": false, "error": "No analyses found" })),
        );
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "comparison": compare(&entries),
        })),
    )
}
