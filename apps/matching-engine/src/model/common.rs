//! Value types shared across the scoring pipeline: weight vectors, per-scorer
//! results, and the final matching request/response pair.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::candidate::CandidateProfile;
use super::company::CompanyProfile;
use super::enums::{Compatibility, HiringUrgency, ListeningReason};

/// Normalized weight vector over the four scoring components (§3).
/// Invariant: `semantic + salary + experience + location == 1.0 ± 0.01`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightVector {
    pub semantic: f64,
    pub salary: f64,
    pub experience: f64,
    pub location: f64,
}

impl WeightVector {
    pub fn sum(&self) -> f64 {
        self.semantic + self.salary + self.experience + self.location
    }

    /// True iff every component is in [0,1] and the vector sums to 1.0±0.01 (P1).
    pub fn is_valid(&self) -> bool {
        let in_range = [self.semantic, self.salary, self.experience, self.location]
            .iter()
            .all(|w| (0.0..=1.0).contains(w));
        in_range && (self.sum() - 1.0).abs() <= 0.01
    }
}

/// Output of a single scorer (C2 contract). `details` carries whatever
/// diagnostic fields each scorer documents in SPEC_FULL §4.2–§4.5.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub score: f64,
    pub confidence: f64,
    pub details: Map<String, Value>,
    pub processing_time_ms: f64,
    pub error: Option<String>,
}

impl ScoringResult {
    /// The neutral zero-result every scorer returns on internal failure
    /// (§4.1 totality contract) or when a deadline expires unfinished (§5).
    pub fn neutral(error: impl Into<String>) -> Self {
        let message = error.into();
        let mut details = Map::new();
        details.insert("error".to_string(), Value::String(message.clone()));
        ScoringResult {
            score: 0.0,
            confidence: 0.0,
            details,
            processing_time_ms: 0.0,
            error: Some(message),
        }
    }

    /// The neutral result used when a scorer didn't finish before the
    /// orchestrator's deadline (§5 cancellation rule).
    pub fn timeout() -> Self {
        let mut details = Map::new();
        details.insert("timeout".to_string(), Value::Bool(true));
        ScoringResult {
            score: 0.0,
            confidence: 0.0,
            details,
            processing_time_ms: 0.0,
            error: None,
        }
    }
}

/// The four component results of a single match (§3 MatchingResponse.components).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentResults {
    pub semantic: ScoringResult,
    pub salary: ScoringResult,
    pub experience: ScoringResult,
    pub location: ScoringResult,
}

/// The adaptive weighting decision that produced a match (§4.6 output).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightingInfo {
    pub candidate_weights: WeightVector,
    pub company_weights: WeightVector,
    pub listening_reason: ListeningReason,
    pub urgency: HiringUrgency,
    pub reasoning_candidate: String,
    pub reasoning_company: String,
}

/// Transport-agnostic primary operation input (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingRequest {
    pub candidate: CandidateProfile,
    pub company: CompanyProfile,
    #[serde(default)]
    pub force_adaptive: bool,
    #[serde(default)]
    pub deadline_ms: Option<u64>,
}

/// Transport-agnostic primary operation output (§3/§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingResponse {
    pub final_score: f64,
    pub confidence: f64,
    pub compatibility: Compatibility,
    pub components: ComponentResults,
    pub weighting: WeightingInfo,
    pub recommendations_candidate: Vec<String>,
    pub recommendations_company: Vec<String>,
    pub strengths: Vec<String>,
    pub attention: Vec<String>,
    pub processing_time_ms: f64,
    pub cached: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_vector_validity() {
        let valid = WeightVector {
            semantic: 0.35,
            salary: 0.25,
            experience: 0.25,
            location: 0.15,
        };
        assert!(valid.is_valid());

        let invalid = WeightVector {
            semantic: 0.5,
            salary: 0.5,
            experience: 0.5,
            location: 0.5,
        };
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_scoring_result_neutral_has_zero_score_and_confidence() {
        let r = ScoringResult::neutral("boom");
        assert_eq!(r.score, 0.0);
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.error.as_deref(), Some("boom"));
        assert_eq!(r.details.get("error").unwrap(), "boom");
    }

    #[test]
    fn test_scoring_result_timeout_flags_details() {
        let r = ScoringResult::timeout();
        assert_eq!(r.score, 0.0);
        assert_eq!(r.details.get("timeout").unwrap(), true);
        assert!(r.error.is_none());
    }
}
