//! Closed enumerations shared by candidate and company profiles.
//!
//! These drive table lookups in `weighting` and `recommendations` — they are
//! never treated as free strings internally, only at the serde boundary.

use serde::{Deserialize, Serialize};

/// The candidate's self-declared reason for considering a move.
/// Drives the candidate-side weight adaptation (see `weighting`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListeningReason {
    SalaryTooLow,
    RoleMismatch,
    LocationTooFar,
    LackOfFlexibility,
    LackOfProspects,
}

/// The employer's hiring timeline. Drives the company-side tolerance boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HiringUrgency {
    Critical,
    Urgent,
    Normal,
    LongTerm,
}

/// Closed set of contract kinds. No other values are valid on the wire —
/// an adapter that sees an internship/apprenticeship contract must map it
/// to one of these four or reject at its own boundary (see SPEC_FULL §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractKind {
    Permanent,
    FixedTerm,
    Freelance,
    Interim,
}

/// The qualitative compatibility label derived from `finalScore` (§4.8).
/// Ordinal ordering matters for P3 (band monotonicity) — derive `PartialOrd`
/// over the declaration order, worst-to-best isn't used; we compare via
/// `rank()` instead so the enum's declaration order doesn't silently become
/// a correctness dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Compatibility {
    Incompatible,
    Poor,
    Average,
    Good,
    Excellent,
}

impl Compatibility {
    /// Ordinal rank, low to high. Used to assert P3 monotonicity in tests
    /// without relying on derive ordering matching intent.
    pub fn rank(self) -> u8 {
        match self {
            Compatibility::Incompatible => 0,
            Compatibility::Poor => 1,
            Compatibility::Average => 2,
            Compatibility::Good => 3,
            Compatibility::Excellent => 4,
        }
    }

    /// Pure function mapping a final score to its compatibility band (§4.8).
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            Compatibility::Excellent
        } else if score >= 0.70 {
            Compatibility::Good
        } else if score >= 0.50 {
            Compatibility::Average
        } else if score >= 0.30 {
            Compatibility::Poor
        } else {
            Compatibility::Incompatible
        }
    }
}
