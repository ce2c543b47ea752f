//! Experience Scorer (C5) — base/quality/progression (§4.4).

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map};

use crate::model::{CandidateProfile, CompanyProfile, ScoringResult};

use super::{timed, Scorer};

const BASE_WEIGHT: f64 = 0.70;
const QUALITY_WEIGHT: f64 = 0.20;
const PROGRESSION_WEIGHT: f64 = 0.10;

const PROGRESSION_KEYWORDS: &[&str] = &["senior", "lead", "chief", "manager", "director"];

static RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:years?|ans?)?\s*-\s*(\d+)\s*(?:years?|ans?)").unwrap());
static SINGLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:years?|ans|mois|months?)").unwrap());
static BARE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)\s*$").unwrap());
static MONTHS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)mois|months?").unwrap());

pub struct ExperienceScorer;

impl Scorer for ExperienceScorer {
    fn score(&self, candidate: &CandidateProfile, company: &CompanyProfile) -> ScoringResult {
        timed(|| score_experience(candidate, company))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct RequiredRange {
    min: f64,
    max: f64,
}

/// Parses `experienceRequired`: a two-number range, a single number (read as
/// `[n, n+2]`), or the `[2, 10]` default when nothing matches (§4.4, §9
/// degrade-don't-throw).
fn parse_required_range(raw: &str) -> RequiredRange {
    if let Some(caps) = RANGE_RE.captures(raw) {
        if let (Ok(min), Ok(max)) = (caps[1].parse(), caps[2].parse()) {
            return RequiredRange { min, max };
        }
    }

    if let Some(caps) = SINGLE_RE.captures(raw) {
        if let Ok(n) = caps[1].parse::<f64>() {
            return RequiredRange { min: n, max: n + 2.0 };
        }
    }

    RequiredRange { min: 2.0, max: 10.0 }
}

fn score_experience(candidate: &CandidateProfile, company: &CompanyProfile) -> ScoringResult {
    let range = parse_required_range(&company.requirements.experience_required);
    let candidate_years = candidate_years(candidate);

    let base_score = base_match(candidate_years, range);
    let quality_score = quality_match(candidate, company);
    let progression_score = progression_match(candidate);

    let score = (base_score * BASE_WEIGHT + quality_score * QUALITY_WEIGHT + progression_score * PROGRESSION_WEIGHT)
        .clamp(0.0, 1.0);
    let confidence = if base_score >= 0.8 { 0.9 } else { 0.7 };

    let verdict = if base_score >= 0.8 {
        "Experience well matched to requirement"
    } else if candidate_years < range.min {
        "Candidate under-experienced for this requirement"
    } else {
        "Candidate over-experienced for this requirement"
    };

    let mut details = Map::new();
    details.insert("candidateYears".to_string(), json!(candidate_years));
    details.insert("requiredRange".to_string(), json!([range.min, range.max]));
    details.insert("baseScore".to_string(), json!(base_score));
    details.insert("qualityScore".to_string(), json!(quality_score));
    details.insert("progressionScore".to_string(), json!(progression_score));
    details.insert("verdict".to_string(), json!(verdict));

    ScoringResult {
        score,
        confidence,
        details,
        processing_time_ms: 0.0,
        error: None,
    }
}

/// Candidate years: level-table base, optionally raised by summed parsed
/// experience durations but capped at `levelBase + 2` (§4.4).
fn candidate_years(candidate: &CandidateProfile) -> f64 {
    let level_base = candidate.experience_level.base_years() as f64;

    let parsed_sum: f64 = candidate
        .experiences
        .iter()
        .filter_map(|exp| parse_duration_years(&exp.duration))
        .sum();

    if parsed_sum > 0.0 {
        parsed_sum.min(level_base + 2.0)
    } else {
        level_base
    }
}

fn parse_duration_years(raw: &str) -> Option<f64> {
    if let Some(caps) = SINGLE_RE.captures(raw) {
        let mut value: f64 = caps[1].parse().ok()?;
        if MONTHS_RE.is_match(raw) {
            value /= 12.0;
        }
        return Some(value);
    }

    // A bare integer with no unit suffix (e.g. "8") is taken as years (§4.4).
    let caps = BARE_NUMBER_RE.captures(raw)?;
    caps[1].parse().ok()
}

/// Base match (70%).
fn base_match(years: f64, range: RequiredRange) -> f64 {
    if years >= range.min && years <= range.max {
        return 1.0;
    }

    if years < range.min {
        let gap = range.min - years;
        if gap <= 1.0 {
            0.8
        } else if gap <= 2.0 {
            0.6
        } else {
            (1.0 - gap / range.min.max(1.0)).max(0.2)
        }
    } else {
        let excess = years - range.max;
        if excess <= 2.0 {
            0.9
        } else if excess <= 5.0 {
            0.7
        } else {
            0.5
        }
    }
}

/// Quality (20%): sector/title/skills signal summed across experience
/// entries and clamped to 1.0.
fn quality_match(candidate: &CandidateProfile, company: &CompanyProfile) -> f64 {
    if candidate.experiences.is_empty() {
        return 0.0;
    }

    let job_sector = company.company.sector.to_lowercase();
    let job_title_tokens: std::collections::HashSet<String> =
        company.job.title.to_lowercase().split_whitespace().map(String::from).collect();
    let mandatory: std::collections::HashSet<String> = company
        .requirements
        .mandatory_competences
        .iter()
        .map(|s| s.to_lowercase())
        .collect();

    let total: f64 = candidate
        .experiences
        .iter()
        .map(|exp| {
            let mut points = 0.0;

            if !job_sector.is_empty() && exp.company.to_lowercase().contains(&job_sector) {
                points += 0.3;
            }

            let exp_title_tokens: std::collections::HashSet<String> =
                exp.title.to_lowercase().split_whitespace().map(String::from).collect();
            if exp_title_tokens.intersection(&job_title_tokens).next().is_some() {
                points += 0.2;
            }

            if !mandatory.is_empty() {
                let skills_lower: std::collections::HashSet<String> =
                    exp.skills_acquired.iter().map(|s| s.to_lowercase()).collect();
                let overlap = skills_lower.intersection(&mandatory).count();
                points += 0.3 * (overlap as f64 / mandatory.len() as f64);
            }

            points
        })
        .sum();

    total.min(1.0)
}

/// Progression (10%).
fn progression_match(candidate: &CandidateProfile) -> f64 {
    if candidate.experiences.len() < 2 {
        return 0.5;
    }

    let has_progression_title = candidate.experiences.iter().any(|exp| {
        let title_lower = exp.title.to_lowercase();
        PROGRESSION_KEYWORDS.iter().any(|kw| title_lower.contains(kw))
    });

    if has_progression_title {
        0.8
    } else {
        0.5
    }
}
