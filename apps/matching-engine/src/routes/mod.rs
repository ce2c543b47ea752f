pub mod health;
pub mod matching;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/match", post(matching::handle_match))
        .route("/api/v1/stats", get(matching::handle_stats))
        .route("/api/v1/cache/clear", post(matching::handle_cache_clear))
        .with_state(state)
}
