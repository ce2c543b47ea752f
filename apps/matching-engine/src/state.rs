use std::sync::Arc;

use crate::config::Config;
use crate::orchestrator::MatcherOrchestrator;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<MatcherOrchestrator>,
    pub config: Config,
}
