//! Deterministic request fingerprint (§4.7 step 1, §9 "cache keying").
//!
//! Hashes a canonical serialization of candidate and company, excluding
//! `parsedAt` (a mutable timestamp that carries no scoring signal) and
//! stable under reordering of set-typed fields — every array in the
//! canonical form is sorted by its own serialized text, not by insertion
//! or hash-table order, so two semantically identical profiles collapse to
//! the same key (`HashSet` iteration order is otherwise unspecified).

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::model::{CandidateProfile, CompanyProfile};

pub fn fingerprint(candidate: &CandidateProfile, company: &CompanyProfile) -> String {
    let candidate_fp = fingerprint_one(candidate);
    let company_fp = fingerprint_one(company);
    format!("match_{candidate_fp}_{company_fp}")
}

fn fingerprint_one(value: &impl serde::Serialize) -> String {
    let mut json = serde_json::to_value(value).expect("profile types always serialize");
    strip_transient_fields(&mut json);
    let canonical = canonicalize(json);
    let bytes = serde_json::to_vec(&canonical).expect("canonical value always serializes");

    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn strip_transient_fields(value: &mut Value) {
    if let Value::Object(map) = value {
        map.remove("parsedAt");
    }
}

/// Recursively sorts object keys (already alphabetical via `serde_json`'s
/// default `BTreeMap`-backed `Map`) and array elements (by their own
/// canonical text) so fingerprints don't depend on `HashSet` iteration order.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Array(items) => {
            let mut canon: Vec<Value> = items.into_iter().map(canonicalize).collect();
            canon.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
            Value::Array(canon)
        }
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, val) in map {
                out.insert(key, canonicalize(val));
            }
            Value::Object(out)
        }
        other => other,
    }
}
