//! Result Cache (C9) — TTL-bounded, lazy eviction, last-writer-wins (§4.9).
//!
//! Single-flight de-duplication is explicitly optional per the
//! specification and is not implemented here (see DESIGN.md). Readers and
//! writers coordinate through a single `std::sync::Mutex`, matching the
//! teacher's shared-handle-on-`AppState` idiom rather than a global static.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::model::MatchingResponse;

struct Entry {
    response: MatchingResponse,
    inserted_at: Instant,
}

/// In-memory TTL cache keyed by the fingerprint computed in `fingerprint.rs`.
pub struct ResultCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry>>,
    hits: AtomicU64,
    total_lookups: AtomicU64,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            total_lookups: AtomicU64::new(0),
        }
    }

    /// Returns a cached response if present and not expired, evicting it
    /// lazily if it has. Every call counts toward `totalLookups`.
    pub fn get(&self, key: &str) -> Option<MatchingResponse> {
        self.total_lookups.fetch_add(1, Ordering::Relaxed);

        let mut entries = self.entries.lock().expect("result cache mutex poisoned");
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.response.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Last-writer-wins: concurrent inserts for the same key simply
    /// overwrite one another (§4.9).
    pub fn insert(&self, key: String, response: MatchingResponse) {
        let mut entries = self.entries.lock().expect("result cache mutex poisoned");
        entries.insert(
            key,
            Entry {
                response,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("result cache mutex poisoned");
        entries.clear();
    }

    pub fn size(&self) -> usize {
        self.entries.lock().expect("result cache mutex poisoned").len()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn total_lookups(&self) -> u64 {
        self.total_lookups.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Compatibility, ComponentResults, HiringUrgency, ListeningReason, ScoringResult, WeightVector, WeightingInfo};

    fn sample_response() -> MatchingResponse {
        let result = ScoringResult {
            score: 0.8,
            confidence: 0.9,
            details: Default::default(),
            processing_time_ms: 1.0,
            error: None,
        };
        MatchingResponse {
            final_score: 0.8,
            confidence: 0.9,
            compatibility: Compatibility::Good,
            components: ComponentResults {
                semantic: result.clone(),
                salary: result.clone(),
                experience: result.clone(),
                location: result,
            },
            weighting: WeightingInfo {
                candidate_weights: WeightVector { semantic: 0.35, salary: 0.25, experience: 0.25, location: 0.15 },
                company_weights: WeightVector { semantic: 0.35, salary: 0.25, experience: 0.25, location: 0.15 },
                listening_reason: ListeningReason::SalaryTooLow,
                urgency: HiringUrgency::Normal,
                reasoning_candidate: "".into(),
                reasoning_company: "".into(),
            },
            recommendations_candidate: vec![],
            recommendations_company: vec![],
            strengths: vec![],
            attention: vec![],
            processing_time_ms: 1.0,
            cached: false,
        }
    }

    #[test]
    fn test_p4_hit_returns_equal_response() {
        let cache = ResultCache::new(Duration::from_secs(3600));
        let response = sample_response();
        cache.insert("match_a_b".to_string(), response.clone());

        let hit = cache.get("match_a_b").unwrap();
        assert_eq!(hit.final_score, response.final_score);
        assert_eq!(hit.compatibility, response.compatibility);
    }

    #[test]
    fn test_miss_does_not_count_as_hit() {
        let cache = ResultCache::new(Duration::from_secs(3600));
        assert!(cache.get("nope").is_none());
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.total_lookups(), 1);
    }

    #[test]
    fn test_expired_entry_is_evicted_on_lookup() {
        let cache = ResultCache::new(Duration::from_millis(1));
        cache.insert("match_a_b".to_string(), sample_response());
        std::thread::sleep(Duration::from_millis(10));

        assert!(cache.get("match_a_b").is_none());
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_last_writer_wins() {
        let cache = ResultCache::new(Duration::from_secs(3600));
        let mut first = sample_response();
        first.final_score = 0.1;
        let mut second = sample_response();
        second.final_score = 0.9;

        cache.insert("match_a_b".to_string(), first);
        cache.insert("match_a_b".to_string(), second);

        assert_eq!(cache.get("match_a_b").unwrap().final_score, 0.9);
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = ResultCache::new(Duration::from_secs(3600));
        cache.insert("match_a_b".to_string(), sample_response());
        cache.clear();
        assert_eq!(cache.size(), 0);
    }
}
