//! The canonical company/job profile consumed by the scorers (C1).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{ContractKind, HiringUrgency};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub sector: String,
    pub location: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub title: String,
    pub location: String,
    pub contract_kind: ContractKind,
    #[serde(default)]
    pub salary_min: Option<i64>,
    #[serde(default)]
    pub salary_max: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub primary_missions: Vec<String>,
    #[serde(default)]
    pub required_competences: HashSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    #[serde(default)]
    pub experience_required: String,
    #[serde(default)]
    pub mandatory_competences: HashSet<String>,
    #[serde(default)]
    pub desired_competences: HashSet<String>,
    #[serde(default)]
    pub required_languages: std::collections::HashMap<String, String>,
    #[serde(default)]
    pub required_education: Option<HashSet<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkConditions {
    #[serde(default)]
    pub remote_possible: bool,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub benefits: HashSet<String>,
    #[serde(default)]
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hiring {
    pub urgency: HiringUrgency,
    #[serde(default)]
    pub priority_criteria: Vec<String>,
    #[serde(default)]
    pub eliminatory_criteria: HashSet<String>,
    pub openings: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub company: CompanyInfo,
    pub job: Job,
    pub requirements: Requirements,
    #[serde(default)]
    pub work_conditions: WorkConditions,
    pub hiring: Hiring,
    pub parse_confidence: f64,
    pub source: String,
    pub parsed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_roundtrips_through_json() {
        let company = CompanyProfile {
            company: CompanyInfo {
                name: "Acme".into(),
                sector: "Accounting".into(),
                location: "Paris 8".into(),
                size: None,
                description: None,
                website: None,
            },
            job: Job {
                title: "Sole Accountant".into(),
                location: "Paris 8".into(),
                contract_kind: ContractKind::Permanent,
                salary_min: Some(35_000),
                salary_max: Some(42_000),
                description: None,
                primary_missions: vec![],
                required_competences: HashSet::new(),
            },
            requirements: Requirements {
                experience_required: "5 years - 10 years".into(),
                mandatory_competences: HashSet::from(["CEGID mastery".to_string()]),
                desired_competences: HashSet::new(),
                required_languages: Default::default(),
                required_education: None,
            },
            work_conditions: WorkConditions::default(),
            hiring: Hiring {
                urgency: HiringUrgency::Urgent,
                priority_criteria: vec![],
                eliminatory_criteria: HashSet::new(),
                openings: 1,
            },
            parse_confidence: 0.9,
            source: "test".into(),
            parsed_at: Utc::now(),
        };

        let json = serde_json::to_string(&company).unwrap();
        let back: CompanyProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.job.title, "Sole Accountant");
        assert_eq!(back.hiring.urgency, HiringUrgency::Urgent);
    }
}
