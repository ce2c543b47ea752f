//! Axum route handlers for the matching API (§6).

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::errors::AppJson;
use crate::model::{MatchingRequest, MatchingResponse};
use crate::state::AppState;

/// POST /api/v1/match
///
/// Scores a single candidate/company pair and returns the full
/// `MatchingResponse`. Validation failures are NOT transport errors: an
/// incoherent profile still produces a 200 with `compatibility: INCOMPATIBLE`
/// and an `attention` entry explaining why (§4.7 step 0). A malformed body
/// is a transport error and is rejected by the `AppJson` extractor before
/// the handler runs.
pub async fn handle_match(
    State(state): State<AppState>,
    AppJson(request): AppJson<MatchingRequest>,
) -> Json<MatchingResponse> {
    Json(state.orchestrator.match_candidate_company(request).await)
}

/// GET /api/v1/stats
pub async fn handle_stats(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.orchestrator.stats()))
}

/// POST /api/v1/cache/clear
pub async fn handle_cache_clear(State(state): State<AppState>) -> StatusCode {
    state.orchestrator.clear_cache();
    StatusCode::NO_CONTENT
}
