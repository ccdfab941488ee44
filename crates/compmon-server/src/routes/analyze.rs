//! Analysis routes — LLM calls feeding the extraction/scoring pipeline.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use compmon_analysis::{extract, score_analysis, score_image, score_text};
use compmon_llm::ResolvedProvider;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", post(analyze_text))
        .route("/analyze/image", post(analyze_image))
        .route("/competitors/discover", post(discover_competitors))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    text: String,
    #[serde(default = "default_competitor_name")]
    competitor_name: String,
}

fn default_competitor_name() -> String {
    "Competitor".into()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageAnalyzeRequest {
    image_base64: String,
    #[serde(default = "default_image_type")]
    image_type: String,
}

fn default_image_type() -> String {
    "image/jpeg".into()
}

#[derive(Deserialize)]
struct DiscoverRequest {
    query: String,
}

fn resolve_provider(state: &AppState) -> Option<ResolvedProvider> {
    state.llm_config.read().resolve_provider()
}

fn no_provider() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(serde_json::json!({
            "success": false,
            "error": "No LLM provider configured",
        })),
    )
}

/// POST /api/analyze — analyze competitor text, score it, persist.
async fn analyze_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let Some(resolved) = resolve_provider(&state) else {
        return no_provider();
    };

    info!(competitor = %req.competitor_name, chars = req.text.len(), "analyzing competitor text");

    let analysis = state
        .llm_client
        .analyze_competitor(&resolved, &req.text)
        .await;
    let score = score_analysis(&analysis);

    match state
        .store
        .add_analysis(&req.competitor_name, &req.text, &analysis, Some(&score))
    {
        Ok(id) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "analysisId": id,
                "analysis": analysis,
                "score": score,
            })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "success": false, "error": e.to_string() })),
        ),
    }
}

/// POST /api/analyze/image — vision analysis plus image scoring.
async fn analyze_image(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImageAnalyzeRequest>,
) -> impl IntoResponse {
    let Some(resolved) = resolve_provider(&state) else {
        return no_provider();
    };

    let analysis = state
        .llm_client
        .analyze_image(&resolved, &req.image_base64, &req.image_type)
        .await;
    let score = score_image(&analysis);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "analysis": analysis,
            "score": score,
        })),
    )
}

/// POST /api/competitors/discover — ask the model for a competitor list,
/// extract entities from the reply, score each description.
async fn discover_competitors(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DiscoverRequest>,
) -> impl IntoResponse {
    let Some(resolved) = resolve_provider(&state) else {
        return no_provider();
    };

    match state
        .llm_client
        .discover_competitors(&resolved, &req.query)
        .await
    {
        Ok(reply) => {
            let mut competitors = extract(&reply);
            for competitor in &mut competitors {
                competitor.score = Some(score_text(&competitor.description, ""));
            }
            info!(found = competitors.len(), "discovery pass finished");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "success": true,
                    "total": competitors.len(),
                    "competitors": competitors,
                })),
            )
        }
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({ "success": false, "error": e.to_string() })),
        ),
    }
}
