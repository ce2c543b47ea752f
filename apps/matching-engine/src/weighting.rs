//! Adaptive Weighting Engine (C7) — candidate-reason adaptation, then
//! urgency boost, then mandatory renormalization (§4.6).
//!
//! Implemented as pure data (two tables) plus a normalization step, per the
//! design note in §9: the previous source variant relied on accidental
//! sums that didn't always total 1.0; this one renormalizes unconditionally.

use crate::model::{HiringUrgency, ListeningReason, WeightVector, WeightingInfo};

const BASE_WEIGHTS: WeightVector = WeightVector {
    semantic: 0.35,
    salary: 0.25,
    experience: 0.25,
    location: 0.15,
};

fn candidate_adaptation(reason: ListeningReason) -> WeightVector {
    match reason {
        ListeningReason::SalaryTooLow => WeightVector { semantic: 0.30, salary: 0.35, experience: 0.20, location: 0.15 },
        ListeningReason::RoleMismatch => WeightVector { semantic: 0.45, salary: 0.20, experience: 0.20, location: 0.15 },
        ListeningReason::LocationTooFar => WeightVector { semantic: 0.30, salary: 0.25, experience: 0.20, location: 0.25 },
        ListeningReason::LackOfFlexibility => WeightVector { semantic: 0.30, salary: 0.30, experience: 0.20, location: 0.20 },
        ListeningReason::LackOfProspects => WeightVector { semantic: 0.40, salary: 0.30, experience: 0.15, location: 0.15 },
    }
}

fn urgency_boost(urgency: HiringUrgency) -> f64 {
    match urgency {
        HiringUrgency::Critical => 1.2,
        HiringUrgency::Urgent => 1.1,
        HiringUrgency::Normal => 1.0,
        HiringUrgency::LongTerm => 0.95,
    }
}

fn reasoning_candidate(reason: ListeningReason) -> String {
    match reason {
        ListeningReason::SalaryTooLow => {
            "Candidate is moving for salary improvement — salary weight increased".to_string()
        }
        ListeningReason::RoleMismatch => {
            "Candidate is moving for a better role fit — semantic weight increased".to_string()
        }
        ListeningReason::LocationTooFar => {
            "Candidate is moving to reduce commute — location weight increased".to_string()
        }
        ListeningReason::LackOfFlexibility => {
            "Candidate wants more flexibility — salary and location weights increased".to_string()
        }
        ListeningReason::LackOfProspects => {
            "Candidate is seeking better prospects — semantic weight increased".to_string()
        }
    }
}

fn reasoning_company(urgency: HiringUrgency) -> String {
    match urgency {
        HiringUrgency::Critical => "Critical hiring urgency — tolerance boosted across all components".to_string(),
        HiringUrgency::Urgent => "Urgent hiring — tolerance moderately boosted".to_string(),
        HiringUrgency::Normal => "Normal hiring timeline — no tolerance adjustment".to_string(),
        HiringUrgency::LongTerm => "Long-term hiring — weights tightened before renormalization".to_string(),
    }
}

fn renormalize(vector: WeightVector) -> WeightVector {
    let sum = vector.sum();
    if sum <= 0.0 {
        return BASE_WEIGHTS;
    }
    WeightVector {
        semantic: vector.semantic / sum,
        salary: vector.salary / sum,
        experience: vector.experience / sum,
        location: vector.location / sum,
    }
}

/// Runs the full two-phase adaptation (§4.6) and returns both the
/// candidate-phase vector and the final renormalized vector, with
/// human-readable reasoning for each phase.
pub fn compute_weights(reason: ListeningReason, urgency: HiringUrgency) -> WeightingInfo {
    let candidate_weights = candidate_adaptation(reason);

    let boost = urgency_boost(urgency);
    let boosted = WeightVector {
        semantic: (candidate_weights.semantic * boost).min(1.0),
        salary: (candidate_weights.salary * boost).min(1.0),
        experience: (candidate_weights.experience * boost).min(1.0),
        location: (candidate_weights.location * boost).min(1.0),
    };
    let company_weights = renormalize(boosted);

    WeightingInfo {
        candidate_weights,
        company_weights,
        listening_reason: reason,
        urgency,
        reasoning_candidate: reasoning_candidate(reason),
        reasoning_company: reasoning_company(urgency),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_REASONS: [ListeningReason; 5] = [
        ListeningReason::SalaryTooLow,
        ListeningReason::RoleMismatch,
        ListeningReason::LocationTooFar,
        ListeningReason::LackOfFlexibility,
        ListeningReason::LackOfProspects,
    ];
    const ALL_URGENCIES: [HiringUrgency; 4] = [
        HiringUrgency::Critical,
        HiringUrgency::Urgent,
        HiringUrgency::Normal,
        HiringUrgency::LongTerm,
    ];

    #[test]
    fn test_p1_weight_sum_for_every_pair() {
        for &reason in &ALL_REASONS {
            for &urgency in &ALL_URGENCIES {
                let info = compute_weights(reason, urgency);
                assert!(info.candidate_weights.is_valid(), "candidate weights invalid for {reason:?}");
                assert!(info.company_weights.is_valid(), "company weights invalid for {reason:?}/{urgency:?}");
            }
        }
    }

    #[test]
    fn test_candidate_adaptation_table_matches_salary_too_low() {
        let vector = candidate_adaptation(ListeningReason::SalaryTooLow);
        assert_eq!(vector.semantic, 0.30);
        assert_eq!(vector.salary, 0.35);
        assert_eq!(vector.experience, 0.20);
        assert_eq!(vector.location, 0.15);
    }

    #[test]
    fn test_s5_long_term_renormalizes_and_preserves_ordering() {
        let info = compute_weights(ListeningReason::LocationTooFar, HiringUrgency::LongTerm);
        assert!((info.company_weights.sum() - 1.0).abs() < 1e-6);

        let candidate = info.candidate_weights;
        let company = info.company_weights;

        let mut candidate_order = [
            ("semantic", candidate.semantic),
            ("salary", candidate.salary),
            ("experience", candidate.experience),
            ("location", candidate.location),
        ];
        let mut company_order = [
            ("semantic", company.semantic),
            ("salary", company.salary),
            ("experience", company.experience),
            ("location", company.location),
        ];
        candidate_order.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        company_order.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

        let candidate_names: Vec<&str> = candidate_order.iter().map(|(n, _)| *n).collect();
        let company_names: Vec<&str> = company_order.iter().map(|(n, _)| *n).collect();
        assert_eq!(candidate_names, company_names);
    }

    #[test]
    fn test_critical_urgency_clamps_each_component_at_one() {
        let info = compute_weights(ListeningReason::RoleMismatch, HiringUrgency::Critical);
        assert!(info.company_weights.semantic <= 1.0);
        assert!(info.company_weights.salary <= 1.0);
        assert!(info.company_weights.experience <= 1.0);
        assert!(info.company_weights.location <= 1.0);
    }
}
