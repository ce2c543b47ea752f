//! Matcher Orchestrator (C8) — ties fingerprinting, the cache, adaptive
//! weighting, the four scorers, aggregation and recommendation synthesis
//! into the single `match` operation (§4.7). Also owns the stats counters
//! from §5/§6.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use crate::cache::ResultCache;
use crate::fingerprint::fingerprint;
use crate::geo::GeoService;
use crate::model::{
    CandidateProfile, Compatibility, ComponentResults, CompanyProfile, MatchingRequest, MatchingResponse,
};
use crate::recommendations;
use crate::scoring::experience::ExperienceScorer;
use crate::scoring::location;
use crate::scoring::salary::SalaryScorer;
use crate::scoring::semantic::SemanticScorer;
use crate::scoring::Scorer;
use crate::weighting;

/// Administrative snapshot served by `GET /api/v1/stats` (§6).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_matches: u64,
    pub cache_hits: u64,
    pub cache_hit_rate_percent: f64,
    pub avg_processing_time_ms: f64,
    pub cache_size: usize,
    pub uptime_hours: f64,
}

pub struct MatcherOrchestrator {
    geo: Arc<dyn GeoService>,
    cache: ResultCache,
    default_deadline_ms: u64,
    started_at: Instant,
    total_matches: AtomicU64,
    total_processing_ms_bits: AtomicU64,
}

impl MatcherOrchestrator {
    pub fn new(geo: Arc<dyn GeoService>, cache_ttl: Duration, default_deadline_ms: u64) -> Self {
        Self {
            geo,
            cache: ResultCache::new(cache_ttl),
            default_deadline_ms,
            started_at: Instant::now(),
            total_matches: AtomicU64::new(0),
            total_processing_ms_bits: AtomicU64::new(0.0_f64.to_bits()),
        }
    }

    pub async fn match_candidate_company(&self, request: MatchingRequest) -> MatchingResponse {
        let start = Instant::now();
        self.total_matches.fetch_add(1, Ordering::Relaxed);

        let response = self.match_inner(request, start).await;

        self.record_processing_time(start.elapsed());
        response
    }

    async fn match_inner(&self, request: MatchingRequest, start: Instant) -> MatchingResponse {
        let MatchingRequest { candidate, company, force_adaptive, deadline_ms } = request;

        if let Err(reason) = validate(&candidate, &company) {
            warn!(%reason, "validation failure, scorers not invoked");
            return validation_failure_response(&candidate, &company, reason, start);
        }

        let key = fingerprint(&candidate, &company);

        if !force_adaptive {
            if let Some(mut cached) = self.cache.get(&key) {
                cached.cached = true;
                return cached;
            }
        }

        let weighting = weighting::compute_weights(candidate.motivation.listening_reason, company.hiring.urgency);
        let final_weights = weighting.company_weights;

        let deadline = Duration::from_millis(deadline_ms.unwrap_or(self.default_deadline_ms));

        let semantic = SemanticScorer.score(&candidate, &company);
        let salary = SalaryScorer.score(&candidate, &company);
        let experience = ExperienceScorer.score(&candidate, &company);

        let location_started = Instant::now();
        let remaining = deadline.saturating_sub(location_started.saturating_duration_since(start));
        let location_result = match tokio::time::timeout(remaining, location::score(&candidate, &company, self.geo.as_ref())).await {
            Ok(result) => result,
            Err(_) => {
                info!("location scorer exceeded deadline, contributing neutral result");
                crate::model::ScoringResult::timeout()
            }
        };
        let timed_out = location_result.details.get("timeout").and_then(|v| v.as_bool()).unwrap_or(false);

        let components = ComponentResults { semantic, salary, experience, location: location_result };

        let final_score = aggregate(&components, &final_weights);
        let confidence = aggregate_confidence(&components);
        let compatibility = Compatibility::from_score(final_score);

        let recs = recommendations::synthesize(&components, candidate.motivation.listening_reason, company.hiring.urgency);

        let response = MatchingResponse {
            final_score,
            confidence,
            compatibility,
            components,
            weighting,
            recommendations_candidate: recs.candidate,
            recommendations_company: recs.company,
            strengths: recs.strengths,
            attention: recs.attention,
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            cached: false,
        };

        if !timed_out {
            self.cache.insert(key, response.clone());
        }

        response
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn stats(&self) -> Stats {
        let total_matches = self.total_matches.load(Ordering::Relaxed);
        let cache_hits = self.cache.hits();
        let cache_lookups = self.cache.total_lookups();
        let cache_hit_rate_percent = if cache_lookups > 0 {
            (cache_hits as f64 / cache_lookups as f64) * 100.0
        } else {
            0.0
        };
        let avg_processing_time_ms = f64::from_bits(self.total_processing_ms_bits.load(Ordering::Relaxed))
            / total_matches.max(1) as f64;

        Stats {
            total_matches,
            cache_hits,
            cache_hit_rate_percent,
            avg_processing_time_ms,
            cache_size: self.cache.size(),
            uptime_hours: self.started_at.elapsed().as_secs_f64() / 3600.0,
        }
    }

    /// Approximate moving average via a running total, matching §5's
    /// "approximate moving averages are acceptable".
    fn record_processing_time(&self, elapsed: Duration) {
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        loop {
            let current_bits = self.total_processing_ms_bits.load(Ordering::Relaxed);
            let current = f64::from_bits(current_bits);
            let updated = current + elapsed_ms;
            if self
                .total_processing_ms_bits
                .compare_exchange(current_bits, updated.to_bits(), Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                break;
            }
        }
    }
}

/// Validation failure taxonomy (§7): missing first name/email, incoherent
/// salary range. The orchestrator's step 0.
fn validate(candidate: &CandidateProfile, company: &CompanyProfile) -> Result<(), String> {
    if candidate.personal.first_name.trim().is_empty() {
        return Err("missing candidate first name".to_string());
    }
    if candidate.personal.email.trim().is_empty() {
        return Err("missing candidate email".to_string());
    }
    if !is_plausible_email(&candidate.personal.email) {
        return Err("malformed candidate email".to_string());
    }
    if candidate.expectations.salary_min >= candidate.expectations.salary_max {
        return Err("incoherent candidate salary range (min >= max)".to_string());
    }
    if company.company.name.trim().is_empty() {
        return Err("missing company name".to_string());
    }
    if company.job.title.trim().is_empty() {
        return Err("missing job title".to_string());
    }
    Ok(())
}

/// Shape check, not deliverability: exactly one `@`, with a non-empty local
/// part and a domain part containing at least one `.` (§3.5).
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.trim().split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn validation_failure_response(
    candidate: &CandidateProfile,
    company: &CompanyProfile,
    reason: String,
    start: Instant,
) -> MatchingResponse {
    let weighting = weighting::compute_weights(candidate.motivation.listening_reason, company.hiring.urgency);
    let neutral = || crate::model::ScoringResult::neutral("validation failed, scorer not invoked");

    MatchingResponse {
        final_score: 0.0,
        confidence: 0.0,
        compatibility: Compatibility::Incompatible,
        components: ComponentResults {
            semantic: neutral(),
            salary: neutral(),
            experience: neutral(),
            location: neutral(),
        },
        weighting,
        recommendations_candidate: vec![],
        recommendations_company: vec![],
        strengths: vec![],
        attention: vec![format!("Validation: {reason}")],
        processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        cached: false,
    }
}

/// `finalScore = Σ components_i.score · finalWeights_i` (P2).
fn aggregate(components: &ComponentResults, weights: &crate::model::WeightVector) -> f64 {
    components.semantic.score * weights.semantic
        + components.salary.score * weights.salary
        + components.experience.score * weights.experience
        + components.location.score * weights.location
}

/// `confidence = min(0.95, Σ(c_i·s_i) / Σ s_i)` over components with
/// positive confidence and positive score (§4.7 step 6).
fn aggregate_confidence(components: &ComponentResults) -> f64 {
    let pairs = [
        (components.semantic.confidence, components.semantic.score),
        (components.salary.confidence, components.salary.score),
        (components.experience.confidence, components.experience.score),
        (components.location.confidence, components.location.score),
    ];

    let score_sum: f64 = pairs.iter().filter(|(_, s)| *s > 0.0).map(|(_, s)| s).sum();
    let has_confidence = pairs.iter().any(|(c, _)| *c > 0.0);

    if score_sum <= 0.0 || !has_confidence {
        return 0.0;
    }

    let weighted_sum: f64 = pairs.iter().filter(|(_, s)| *s > 0.0).map(|(c, s)| c * s).sum();
    (weighted_sum / score_sum).min(0.95)
}
