//! Semantic Scorer (C3) — skill/title/sector/tool overlap (§4.2).

use std::collections::HashSet;

use serde_json::{json, Map, Value};

use crate::model::{CandidateProfile, CompanyProfile, ScoringResult};

use super::synonyms::concepts_match;
use super::{timed, Scorer};

const COMPETENCE_WEIGHT: f64 = 0.40;
const TITLE_WEIGHT: f64 = 0.30;
const SECTOR_WEIGHT: f64 = 0.20;
const TOOL_WEIGHT: f64 = 0.10;

pub struct SemanticScorer;

impl Scorer for SemanticScorer {
    fn score(&self, candidate: &CandidateProfile, company: &CompanyProfile) -> ScoringResult {
        timed(|| score_semantic(candidate, company))
    }
}

fn score_semantic(candidate: &CandidateProfile, company: &CompanyProfile) -> ScoringResult {
    let required: HashSet<&String> = company
        .requirements
        .mandatory_competences
        .iter()
        .chain(company.requirements.desired_competences.iter())
        .collect();

    let (competence_score, matched, missing) = competence_match(candidate, &required);
    let title_score = title_match(candidate, &company.job.title);
    let sector_score = sector_match(candidate, &company.company.sector);
    let tool_score = tool_match(candidate, &required);

    let score = (competence_score * COMPETENCE_WEIGHT
        + title_score * TITLE_WEIGHT
        + sector_score * SECTOR_WEIGHT
        + tool_score * TOOL_WEIGHT)
        .clamp(0.0, 1.0);
    let confidence = (score * 1.1).min(0.95);

    let mut details = Map::new();
    details.insert("competenceScore".to_string(), json!(competence_score));
    details.insert("titleScore".to_string(), json!(title_score));
    details.insert("sectorScore".to_string(), json!(sector_score));
    details.insert("toolScore".to_string(), json!(tool_score));
    details.insert("matchedCompetences".to_string(), json!(matched));
    details.insert("missingCompetences".to_string(), json!(missing));

    ScoringResult {
        score,
        confidence,
        details,
        processing_time_ms: 0.0,
        error: None,
    }
}

/// Competence match (40%): matchedRequired / totalRequired, 1.0 if none required.
fn competence_match(
    candidate: &CandidateProfile,
    required: &HashSet<&String>,
) -> (f64, Vec<String>, Vec<String>) {
    if required.is_empty() {
        return (1.0, vec![], vec![]);
    }

    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for competence in required {
        let is_matched = candidate
            .skills
            .technical
            .iter()
            .any(|skill| concepts_match(skill, competence));

        if is_matched {
            matched.push((*competence).clone());
        } else {
            missing.push((*competence).clone());
        }
    }

    let score = matched.len() as f64 / required.len() as f64;
    (score, matched, missing)
}

/// Title match (30%): max token-set overlap across past experiences.
fn title_match(candidate: &CandidateProfile, job_title: &str) -> f64 {
    if candidate.experiences.is_empty() {
        return 0.5;
    }

    let job_tokens = tokenize(job_title);

    candidate
        .experiences
        .iter()
        .map(|exp| {
            let exp_tokens = tokenize(&exp.title);
            token_overlap(&job_tokens, &exp_tokens)
        })
        .fold(0.0_f64, f64::max)
}

fn tokenize(s: &str) -> HashSet<String> {
    s.to_lowercase().split_whitespace().map(String::from).collect()
}

fn token_overlap(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let denom = a.len().max(b.len());
    if denom == 0 {
        return 0.0;
    }
    let common = a.intersection(b).count();
    common as f64 / denom as f64
}

/// Sector match (20%).
fn sector_match(candidate: &CandidateProfile, job_sector: &str) -> f64 {
    if candidate.expectations.preferred_sectors.is_empty() {
        return 0.7;
    }

    let job_sector_lower = job_sector.to_lowercase();
    let any_overlap = candidate.expectations.preferred_sectors.iter().any(|sector| {
        let sector_lower = sector.to_lowercase();
        job_sector_lower.contains(&sector_lower) || sector_lower.contains(&job_sector_lower)
    });

    if any_overlap {
        1.0
    } else {
        0.3
    }
}

/// Tool match (10%): matchedRequired / totalRequired where a required
/// competence is matched if any candidate software string is a substring of it.
fn tool_match(candidate: &CandidateProfile, required: &HashSet<&String>) -> f64 {
    if required.is_empty() {
        return 1.0;
    }

    let matched = required
        .iter()
        .filter(|competence| {
            let competence_lower = competence.to_lowercase();
            candidate
                .skills
                .software
                .iter()
                .any(|tool| competence_lower.contains(&tool.to_lowercase()))
        })
        .count();

    matched as f64 / required.len() as f64
}
