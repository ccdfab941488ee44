//! HTTP route handlers — ports the original FastAPI endpoint surface.

pub mod analyze;
pub mod compare;
pub mod export;
pub mod health;
pub mod history;
pub mod llm;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::routes())
        .merge(analyze::routes())
        .merge(history::routes())
        .merge(compare::routes())
        .merge(export::routes())
        .merge(llm::routes())
}
