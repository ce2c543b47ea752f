//! Recommendation Synthesizer (C10) — deterministic bullet lists derived
//! from the four sub-scores and the adaptive context (§4.10). No free-form
//! generation: every line comes from a fixed table.

use crate::model::{ComponentResults, HiringUrgency, ListeningReason, ScoringResult};

const STRENGTH_THRESHOLD: f64 = 0.8;
const ATTENTION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Semantic,
    Salary,
    Experience,
    Location,
}

const COMPONENT_ORDER: [Component; 4] =
    [Component::Semantic, Component::Salary, Component::Experience, Component::Location];

pub struct Recommendations {
    pub candidate: Vec<String>,
    pub company: Vec<String>,
    pub strengths: Vec<String>,
    pub attention: Vec<String>,
}

pub fn synthesize(
    components: &ComponentResults,
    listening_reason: ListeningReason,
    urgency: HiringUrgency,
) -> Recommendations {
    let mut candidate = Vec::new();
    let mut company = Vec::new();
    let mut strengths = Vec::new();
    let mut attention = Vec::new();

    for component in COMPONENT_ORDER {
        let result = component_result(components, component);

        if result.score >= STRENGTH_THRESHOLD {
            strengths.push(strength_sentence(component).to_string());
        }
        if result.score < ATTENTION_THRESHOLD {
            attention.push(attention_sentence(component).to_string());

            if let Some(text) = base_candidate_recommendation(component) {
                candidate.push(text.to_string());
            }
            if let Some(text) = base_company_recommendation(component) {
                company.push(text.to_string());
            }
            if let Some(text) = reason_candidate_recommendation(component, listening_reason) {
                candidate.push(text.to_string());
            }
            if let Some(text) = reason_company_recommendation(component, listening_reason) {
                company.push(text.to_string());
            }
        }
    }

    if urgency == HiringUrgency::Critical {
        company.push("Accelerate the recruitment process".to_string());
        candidate.push("Rapid availability is valued".to_string());
    }

    Recommendations { candidate, company, strengths, attention }
}

fn component_result(components: &ComponentResults, component: Component) -> &ScoringResult {
    match component {
        Component::Semantic => &components.semantic,
        Component::Salary => &components.salary,
        Component::Experience => &components.experience,
        Component::Location => &components.location,
    }
}

fn strength_sentence(component: Component) -> &'static str {
    match component {
        Component::Semantic => "Excellent skill fit",
        Component::Salary => "Perfectly calibrated salary",
        Component::Experience => "Experience exceptionally well matched",
        Component::Location => "Ideal location match",
    }
}

fn attention_sentence(component: Component) -> &'static str {
    match component {
        Component::Semantic => "Significant skill gap",
        Component::Salary => "Salary expectations are misaligned",
        Component::Experience => "Experience level is a poor fit for this role",
        Component::Location => "Location or remote-work mismatch",
    }
}

fn base_candidate_recommendation(component: Component) -> Option<&'static str> {
    match component {
        Component::Semantic => Some("Highlight transferable skills in the application"),
        Component::Salary => Some("Clarify salary flexibility with the recruiter"),
        Component::Experience => Some("Emphasize relevant achievements to offset the experience gap"),
        Component::Location => Some("Confirm relocation or remote-work flexibility"),
    }
}

fn base_company_recommendation(component: Component) -> Option<&'static str> {
    match component {
        Component::Semantic => Some("Review required skills alignment before proceeding"),
        Component::Salary => Some("Reassess the offered salary range"),
        Component::Experience => Some("Plan a training and accompaniment program for the onboarding period"),
        Component::Location => Some("Consider flexible or remote-work arrangements"),
    }
}

/// Reason-specific additions, keyed on `(component, listeningReason)`. Not
/// every pair has an entry — only the ones where the candidate's declared
/// motivation changes what's worth saying.
fn reason_candidate_recommendation(component: Component, reason: ListeningReason) -> Option<&'static str> {
    match (component, reason) {
        (Component::Salary, ListeningReason::SalaryTooLow) => {
            Some("This role may not resolve the salary gap that prompted the search")
        }
        (Component::Location, ListeningReason::LocationTooFar) => {
            Some("Double-check the commute before accepting, given the stated motivation")
        }
        (Component::Semantic, ListeningReason::RoleMismatch) => {
            Some("Consider whether this role actually addresses the desired change in scope")
        }
        _ => None,
    }
}

fn reason_company_recommendation(component: Component, reason: ListeningReason) -> Option<&'static str> {
    match (component, reason) {
        (Component::Salary, ListeningReason::SalaryTooLow) => {
            Some("Consider additional budget or compensatory benefits")
        }
        (Component::Location, ListeningReason::LocationTooFar) => {
            Some("Offer remote or hybrid arrangements to address the candidate's commute concern")
        }
        (Component::Semantic, ListeningReason::RoleMismatch) => {
            Some("Clarify the role's scope to avoid repeating the candidate's reason for leaving")
        }
        _ => None,
    }
}
