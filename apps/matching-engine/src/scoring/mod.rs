//! Scorer Interface (C2) and the four scorer implementations.
//!
//! Every scorer is a pure, deterministic function of `(candidate, company)`.
//! The three CPU-only scorers implement the synchronous `Scorer` trait and
//! must never perform I/O (§5). Location is async and gets its own shape
//! (`scoring::location::score`) since it may delegate to the Geo Service.

pub mod experience;
pub mod location;
pub mod salary;
pub mod semantic;
pub mod synonyms;

use std::time::Instant;

use crate::model::{CandidateProfile, CompanyProfile, ScoringResult};

/// Contract every CPU-only scorer implements (§4.1).
///
/// Implementations must be total: on internal failure they return
/// `ScoringResult::neutral(..)` rather than panicking.
pub trait Scorer {
    fn score(&self, candidate: &CandidateProfile, company: &CompanyProfile) -> ScoringResult;
}

/// Runs `f`, stamping the result with the elapsed wall time (§3
/// `processingTimeMs`). Shared by all four scorers so the timing field is
/// computed the same way everywhere.
pub(crate) fn timed(mut f: impl FnMut() -> ScoringResult) -> ScoringResult {
    let start = Instant::now();
    let mut result = f();
    result.processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    result
}
