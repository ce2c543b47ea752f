//! The canonical candidate profile consumed by the scorers (C1).
//!
//! Adapters producing a `CandidateProfile` are responsible for satisfying
//! these invariants; the core does not re-validate beyond what scoring
//! needs (see `orchestrator::validate_candidate`).

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{ContractKind, ListeningReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    Entry,
    Junior,
    Confirmed,
    Senior,
}

impl ExperienceLevel {
    /// Base years of experience per level, used by the experience scorer
    /// when no parseable duration is available (§4.4).
    pub fn base_years(self) -> u32 {
        match self {
            ExperienceLevel::Entry => 1,
            ExperienceLevel::Junior => 3,
            ExperienceLevel::Confirmed => 7,
            ExperienceLevel::Senior => 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub title: String,
    pub company: String,
    /// Free-form duration string, e.g. "3 years", "18 mois", "8".
    pub duration: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills_acquired: HashSet<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSkills {
    #[serde(default)]
    pub technical: HashSet<String>,
    #[serde(default)]
    pub software: HashSet<String>,
    #[serde(default)]
    pub languages: HashMap<String, String>,
    #[serde(default)]
    pub certifications: HashSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expectations {
    pub salary_min: i64,
    pub salary_max: i64,
    pub preferred_location: String,
    pub max_distance_km: u32,
    pub remote_accepted: bool,
    #[serde(default)]
    pub preferred_sectors: HashSet<String>,
    #[serde(default)]
    pub accepted_contracts: HashSet<ContractKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motivation {
    pub listening_reason: ListeningReason,
    #[serde(default)]
    pub primary_motivations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub personal: PersonalInfo,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub skills: CandidateSkills,
    pub expectations: Expectations,
    pub motivation: Motivation,
    pub parse_confidence: f64,
    pub source: String,
    pub parsed_at: DateTime<Utc>,
}
