//! Salary Scorer (C4) — compatibility/positioning/negotiability (§4.3).

use serde_json::{json, Map};

use crate::model::enums::HiringUrgency;
use crate::model::candidate::ExperienceLevel;
use crate::model::{CandidateProfile, CompanyProfile, ScoringResult};

use super::{timed, Scorer};

const COMPATIBILITY_WEIGHT: f64 = 0.60;
const POSITIONING_WEIGHT: f64 = 0.25;
const NEGOTIABILITY_WEIGHT: f64 = 0.15;

pub struct SalaryScorer;

impl Scorer for SalaryScorer {
    fn score(&self, candidate: &CandidateProfile, company: &CompanyProfile) -> ScoringResult {
        timed(|| score_salary(candidate, company))
    }
}

fn score_salary(candidate: &CandidateProfile, company: &CompanyProfile) -> ScoringResult {
    let c_min = candidate.expectations.salary_min as f64;
    let c_max = candidate.expectations.salary_max as f64;
    let e_min = company.job.salary_min.unwrap_or(0) as f64;
    let e_max = company.job.salary_max.map(|v| v as f64).unwrap_or(f64::INFINITY);

    let (compatibility_score, overlap_amount) = compatibility(c_min, c_max, e_min, e_max);
    let positioning_score = positioning(c_min, c_max, e_min, e_max);
    let negotiability_score = negotiability(company.hiring.urgency, candidate.experience_level);

    let score = (compatibility_score * COMPATIBILITY_WEIGHT
        + positioning_score * POSITIONING_WEIGHT
        + negotiability_score * NEGOTIABILITY_WEIGHT)
        .clamp(0.0, 1.0);
    let confidence = if compatibility_score >= 0.7 { 0.9 } else { 0.6 };

    let candidate_range = format!("{}-{}", candidate.expectations.salary_min, candidate.expectations.salary_max);
    let job_range = format!(
        "{}-{}",
        company.job.salary_min.map(|v| v.to_string()).unwrap_or_else(|| "0".to_string()),
        company.job.salary_max.map(|v| v.to_string()).unwrap_or_else(|| "+inf".to_string()),
    );
    let mid_c = (c_min + c_max) / 2.0;
    let recommendation = format!("Propose {:.0} (convergence midpoint)", mid_c);

    let mut details = Map::new();
    details.insert("compatibilityScore".to_string(), json!(compatibility_score));
    details.insert("positioningScore".to_string(), json!(positioning_score));
    details.insert("negotiabilityScore".to_string(), json!(negotiability_score));
    details.insert("candidateRange".to_string(), json!(candidate_range));
    details.insert("jobRange".to_string(), json!(job_range));
    details.insert("overlapAmount".to_string(), json!(overlap_amount));
    details.insert("recommendation".to_string(), json!(recommendation));

    ScoringResult {
        score,
        confidence,
        details,
        processing_time_ms: 0.0,
        error: None,
    }
}

/// Compatibility (60%). Returns the sub-score plus the overlap amount in
/// euros (0.0 when the ranges don't overlap).
fn compatibility(c_min: f64, c_max: f64, e_min: f64, e_max: f64) -> (f64, f64) {
    if c_min > e_max {
        let score = (1.0 - (c_min - e_max) / c_min).max(0.0);
        return (score, 0.0);
    }
    if e_min > c_max {
        let score = (1.0 - (e_min - c_max) / e_min).max(0.0);
        return (score, 0.0);
    }

    let overlap_start = c_min.max(e_min);
    let overlap_end = c_max.min(e_max);
    let overlap = (overlap_end - overlap_start).max(0.0);
    let c_range = c_max - c_min;
    let e_range = e_max - e_min;
    let avg_range = (c_range + e_range) / 2.0;

    let score = if avg_range > 0.0 { (overlap / avg_range).min(1.0) } else { 1.0 };
    (score, overlap)
}

/// Positioning (25%): compares midpoints once the ranges aren't disjoint.
fn positioning(c_min: f64, c_max: f64, e_min: f64, e_max: f64) -> f64 {
    if e_max < c_min {
        return 0.0;
    }
    if e_min > c_max {
        return 0.2;
    }

    let mid_c = (c_min + c_max) / 2.0;
    let mid_e = if e_max.is_finite() { (e_min + e_max) / 2.0 } else { e_min };

    if mid_c <= 0.0 {
        return 0.5;
    }
    let relative_gap = (mid_c - mid_e).abs() / mid_c;

    if relative_gap < 0.10 {
        1.0
    } else if relative_gap < 0.20 {
        0.8
    } else {
        0.5
    }
}

/// Negotiability (15%): urgency and seniority both make the employer side
/// more willing to move on salary.
fn negotiability(urgency: HiringUrgency, experience_level: ExperienceLevel) -> f64 {
    let mut score: f64 = 0.5;
    match urgency {
        HiringUrgency::Critical => score += 0.3,
        HiringUrgency::Urgent => score += 0.2,
        HiringUrgency::Normal | HiringUrgency::LongTerm => {}
    }
    if matches!(experience_level, ExperienceLevel::Confirmed | ExperienceLevel::Senior) {
        score += 0.2;
    }
    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::candidate::{CandidateSkills, Expectations, Motivation, PersonalInfo};
    use crate::model::company::{CompanyInfo, Hiring, Job, Requirements, WorkConditions};
    use crate::model::{ContractKind, ListeningReason};
    use chrono::Utc;
    use std::collections::HashSet;

    fn candidate_with(salary_min: i64, salary_max: i64, level: ExperienceLevel) -> CandidateProfile {
        CandidateProfile {
            personal: PersonalInfo {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                email: "jane@example.com".into(),
                phone: None,
                age: None,
            },
            experience_level: level,
            experiences: vec![],
            skills: CandidateSkills::default(),
            expectations: Expectations {
                salary_min,
                salary_max,
                preferred_location: "Paris".into(),
                max_distance_km: 20,
                remote_accepted: true,
                preferred_sectors: HashSet::new(),
                accepted_contracts: HashSet::new(),
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

    fn company_with(salary_min: Option<i64>, salary_max: Option<i64>, urgency: HiringUrgency) -> CompanyProfile {
        CompanyProfile {
            company: CompanyInfo {
                name: "Acme".into(),
                sector: "Accounting".into(),
                location: "Paris".into(),
                size: None,
                description: None,
                website: None,
            },
            job: Job {
                title: "Sole Accountant".into(),
                location: "Paris".into(),
                contract_kind: ContractKind::Permanent,
                salary_min,
                salary_max,
                description: None,
                primary_missions: vec![],
                required_competences: HashSet::new(),
            },
            requirements: Requirements {
                experience_required: "5 years".into(),
                mandatory_competences: HashSet::new(),
                desired_competences: HashSet::new(),
                required_languages: Default::default(),
                required_education: None,
            },
            work_conditions: WorkConditions::default(),
            hiring: Hiring {
                urgency,
                priority_criteria: vec![],
                eliminatory_criteria: HashSet::new(),
                openings: 1,
            },
            parse_confidence: 0.9,
            source: "test".into(),
            parsed_at: Utc::now(),
        }
    }

    #[test]
    fn test_s1_strong_salary_overlap() {
        let candidate = candidate_with(38_000, 45_000, ExperienceLevel::Confirmed);
        let company = company_with(Some(35_000), Some(42_000), HiringUrgency::Urgent);
        let result = SalaryScorer.score(&candidate, &company);
        let overlap = result.details.get("overlapAmount").unwrap().as_f64().unwrap();
        assert!(overlap >= 4000.0);
    }

    #[test]
    fn test_candidate_above_company_range_degrades_gracefully() {
        let candidate = candidate_with(70_000, 90_000, ExperienceLevel::Senior);
        let company = company_with(Some(30_000), Some(35_000), HiringUrgency::Normal);
        let result = SalaryScorer.score(&candidate, &company);
        assert!(result.score < 0.5);
    }

    #[test]
    fn test_company_above_candidate_range_scores_low_positioning() {
        let positioning_score = positioning(30_000.0, 35_000.0, 70_000.0, 90_000.0);
        assert_eq!(positioning_score, 0.2);
    }

    #[test]
    fn test_missing_job_max_treated_as_open_ended() {
        let candidate = candidate_with(38_000, 45_000, ExperienceLevel::Confirmed);
        let company = company_with(Some(35_000), None, HiringUrgency::Normal);
        let result = SalaryScorer.score(&candidate, &company);
        assert!(result.score > 0.0);
    }

    #[test]
    fn test_negotiability_rewards_critical_urgency_and_seniority() {
        let base = negotiability(HiringUrgency::Normal, ExperienceLevel::Entry);
        let boosted = negotiability(HiringUrgency::Critical, ExperienceLevel::Senior);
        assert_eq!(base, 0.5);
        assert_eq!(boosted, 1.0);
    }

    #[test]
    fn test_confidence_threshold_at_0_7_compatibility() {
        let candidate = candidate_with(38_000, 45_000, ExperienceLevel::Confirmed);
        let company = company_with(Some(35_000), Some(42_000), HiringUrgency::Urgent);
        let result = SalaryScorer.score(&candidate, &company);
        let compatibility_score = result.details.get("compatibilityScore").unwrap().as_f64().unwrap();
        if compatibility_score >= 0.7 {
            assert_eq!(result.confidence, 0.9);
        } else {
            assert_eq!(result.confidence, 0.6);
        }
    }
}
