//! Location Scorer (C6) — equality, distance estimation, remote compatibility
//! (§4.5). Async: may delegate to the Geo Service, so it gets its own free
//! function instead of implementing the synchronous `Scorer` trait.

use std::collections::{HashMap, HashSet};

use serde_json::{json, Map};

use crate::geo::{GeoEstimateRequest, GeoService, TransportMode};
use crate::model::{CandidateProfile, CompanyProfile, ScoringResult};

const EQUALITY_WEIGHT: f64 = 0.60;
const DISTANCE_WEIGHT: f64 = 0.25;
const REMOTE_WEIGHT: f64 = 0.15;

pub async fn score(
    candidate: &CandidateProfile,
    company: &CompanyProfile,
    geo: &dyn GeoService,
) -> ScoringResult {
    let start = std::time::Instant::now();

    let candidate_location = candidate.expectations.preferred_location.trim().to_string();
    let company_location = company.job.location.trim().to_string();

    if candidate_location.is_empty() || company_location.is_empty() {
        let mut result = ScoringResult {
            score: 0.5,
            confidence: 0.3,
            details: Map::new(),
            processing_time_ms: 0.0,
            error: None,
        };
        result.processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        return result;
    }

    let equality_score = location_equality(&candidate_location, &company_location);

    let (distance_score, confidence, geo_used) = if equality_score >= 0.8 {
        (1.0, 0.7, false)
    } else {
        match delegate_to_geo(geo, &candidate_location, &company_location, candidate.expectations.max_distance_km).await {
            Some(travel_score) => (travel_score, 0.9, true),
            None => (distance_heuristic(candidate.expectations.max_distance_km), 0.7, false),
        }
    };

    let remote_score = remote_compatibility(
        candidate.expectations.remote_accepted,
        company.work_conditions.remote_possible,
    );

    let score = (equality_score * EQUALITY_WEIGHT + distance_score * DISTANCE_WEIGHT + remote_score * REMOTE_WEIGHT)
        .clamp(0.0, 1.0);

    let mut details = Map::new();
    details.insert("equalityScore".to_string(), json!(equality_score));
    details.insert("distanceScore".to_string(), json!(distance_score));
    details.insert("remoteScore".to_string(), json!(remote_score));
    details.insert("geoServiceUsed".to_string(), json!(geo_used));

    let mut result = ScoringResult {
        score,
        confidence,
        details,
        processing_time_ms: 0.0,
        error: None,
    };
    result.processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    result
}

/// Returns `Some(travelScore)` on a successful Geo Service call; `None` on
/// any failure, letting the caller fall back to the heuristic (§4.5, §7).
async fn delegate_to_geo(
    geo: &dyn GeoService,
    origin: &str,
    destination: &str,
    max_distance_km: u32,
) -> Option<f64> {
    let request = GeoEstimateRequest {
        origin_hint: origin.to_string(),
        destination_hint: destination.to_string(),
        max_distance_km,
        transport_modes: HashSet::from([TransportMode::Car, TransportMode::PublicTransport]),
        max_travel_minutes: HashMap::from([(TransportMode::Car, 60), (TransportMode::PublicTransport, 90)]),
    };

    match geo.estimate(&request).await {
        Ok(response) if response.reachable => Some(response.travel_score.clamp(0.0, 1.0)),
        Ok(_) => Some(0.0),
        Err(_) => None,
    }
}

/// Location equality (60%).
fn location_equality(candidate_location: &str, company_location: &str) -> f64 {
    let a = candidate_location.to_lowercase();
    let b = company_location.to_lowercase();

    if a == b {
        return 1.0;
    }

    let a_tokens: HashSet<&str> = a.split_whitespace().collect();
    let b_tokens: HashSet<&str> = b.split_whitespace().collect();
    if !a_tokens.is_empty() && a_tokens.intersection(&b_tokens).next().is_some() {
        return 0.8;
    }

    if a.contains("paris") && b.contains("paris") {
        return 0.7;
    }

    0.3
}

/// Distance estimation (25%) heuristic fallback, keyed on the candidate's
/// own distance tolerance.
fn distance_heuristic(max_distance_km: u32) -> f64 {
    if max_distance_km >= 50 {
        0.7
    } else if max_distance_km >= 30 {
        0.5
    } else {
        0.3
    }
}

/// Remote compatibility (15%).
fn remote_compatibility(candidate_accepts_remote: bool, company_offers_remote: bool) -> f64 {
    match (candidate_accepts_remote, company_offers_remote) {
        (true, true) => 1.0,
        (false, false) => 1.0,
        (false, true) => 0.8,
        (true, false) => 0.3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{GeoEstimateResponse, NullGeoService};
    use crate::model::candidate::{CandidateSkills, Expectations, ExperienceLevel, Motivation, PersonalInfo};
    use crate::model::company::{CompanyInfo, Hiring, Job, Requirements, WorkConditions};
    use crate::model::{ContractKind, HiringUrgency, ListeningReason};
    use chrono::Utc;
    use std::collections::HashSet as Set;

    struct FixedGeo {
        travel_score: f64,
        reachable: bool,
    }

    #[async_trait::async_trait]
    impl GeoService for FixedGeo {
        async fn estimate(&self, _request: &GeoEstimateRequest) -> anyhow::Result<GeoEstimateResponse> {
            Ok(GeoEstimateResponse {
                travel_score: self.travel_score,
                reachable: self.reachable,
                details: Default::default(),
            })
        }
    }

    fn candidate_with(location: &str, max_distance_km: u32, remote_accepted: bool) -> CandidateProfile {
        CandidateProfile {
            personal: PersonalInfo {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                email: "jane@example.com".into(),
                phone: None,
                age: None,
            },
            experience_level: ExperienceLevel::Confirmed,
            experiences: vec![],
            skills: CandidateSkills::default(),
            expectations: Expectations {
                salary_min: 30_000,
                salary_max: 50_000,
                preferred_location: location.into(),
                max_distance_km,
                remote_accepted,
                preferred_sectors: Set::new(),
                accepted_contracts: Set::new(),
            },
            motivation: Motivation {
                listening_reason: ListeningReason::SalaryTooLow,
                primary_motivations: vec![],
            },
            parse_confidence: 0.9,
            source: "test".into(),
            parsed_at: Utc::now(),
        }
    }

    fn company_with(location: &str, remote_possible: bool) -> CompanyProfile {
        CompanyProfile {
            company: CompanyInfo {
                name: "Acme".into(),
                sector: "Accounting".into(),
                location: location.into(),
                size: None,
                description: None,
                website: None,
            },
            job: Job {
                title: "Sole Accountant".into(),
                location: location.into(),
                contract_kind: ContractKind::Permanent,
                salary_min: Some(35_000),
                salary_max: Some(42_000),
                description: None,
                primary_missions: vec![],
                required_competences: Set::new(),
            },
            requirements: Requirements {
                experience_required: "5 years".into(),
                mandatory_competences: Set::new(),
                desired_competences: Set::new(),
                required_languages: Default::default(),
                required_education: None,
            },
            work_conditions: WorkConditions {
                remote_possible,
                ..Default::default()
            },
            hiring: Hiring {
                urgency: HiringUrgency::Urgent,
                priority_criteria: vec![],
                eliminatory_criteria: Set::new(),
                openings: 1,
            },
            parse_confidence: 0.9,
            source: "test".into(),
            parsed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_s1_same_location_scores_full_equality_and_distance() {
        let candidate = candidate_with("Paris 8", 10, true);
        let company = company_with("Paris 8", false);
        let result = score(&candidate, &company, &NullGeoService).await;
        assert!(result.score >= 0.8);
    }

    #[tokio::test]
    async fn test_both_contain_paris_is_same_city_special_case() {
        let equality = location_equality("Paris 8eme", "Paris 15eme");
        assert_eq!(equality, 0.7);
    }

    #[tokio::test]
    async fn test_geo_unavailable_falls_back_to_heuristic() {
        let candidate = candidate_with("Paris", 60, false);
        let company = company_with("Lyon", false);
        let result = score(&candidate, &company, &NullGeoService).await;
        assert_eq!(result.details.get("distanceScore").unwrap(), &json!(0.7));
        assert_eq!(result.confidence, 0.7);
    }

    #[tokio::test]
    async fn test_geo_success_is_used_directly_and_raises_confidence() {
        let candidate = candidate_with("Paris", 10, false);
        let company = company_with("Lyon", false);
        let geo = FixedGeo { travel_score: 0.65, reachable: true };
        let result = score(&candidate, &company, &geo).await;
        assert_eq!(result.details.get("distanceScore").unwrap(), &json!(0.65));
        assert_eq!(result.confidence, 0.9);
    }

    #[tokio::test]
    async fn test_geo_unreachable_scores_zero_distance() {
        let candidate = candidate_with("Paris", 10, false);
        let company = company_with("Lyon", false);
        let geo = FixedGeo { travel_score: 0.9, reachable: false };
        let result = score(&candidate, &company, &geo).await;
        assert_eq!(result.details.get("distanceScore").unwrap(), &json!(0.0));
    }

    #[tokio::test]
    async fn test_empty_location_is_fully_neutral() {
        let candidate = candidate_with("", 10, false);
        let company = company_with("Lyon", false);
        let result = score(&candidate, &company, &NullGeoService).await;
        assert_eq!(result.score, 0.5);
        assert_eq!(result.confidence, 0.3);
    }

    #[tokio::test]
    async fn test_remote_compatibility_combinations() {
        assert_eq!(remote_compatibility(true, true), 1.0);
        assert_eq!(remote_compatibility(false, false), 1.0);
        assert_eq!(remote_compatibility(false, true), 0.8);
        assert_eq!(remote_compatibility(true, false), 0.3);
    }
}
