pub mod candidate;
pub mod common;
pub mod company;
pub mod enums;

pub use candidate::CandidateProfile;
pub use common::{ComponentResults, MatchingRequest, MatchingResponse, ScoringResult, WeightVector, WeightingInfo};
pub use company::CompanyProfile;
pub use enums::{Compatibility, ContractKind, HiringUrgency, ListeningReason};
