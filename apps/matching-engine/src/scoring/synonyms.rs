//! Fixed synonym table used by the semantic scorer (C3) to treat distinct
//! strings as the same underlying concept.
//!
//! Immutable after initialization, safe for concurrent reads without
//! locking (§5), loaded once via `once_cell::sync::Lazy`. Versioned so
//! recommendation output could later be attributed to a table version
//! (§9 design note) — not surfaced on the wire today, just kept alongside
//! the table for when it is.

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub const SYNONYM_TABLE_VERSION: &str = "v1";

/// Canonical concept key -> alternate spellings/phrasings that mean the same
/// thing. Lookups are case-insensitive; callers lowercase before matching.
pub static SYNONYM_TABLE: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        (
            "accounting",
            [
                "accountant",
                "bookkeeping",
                "tax management",
                "comptabilite",
                "comptable",
                "cegid mastery",
            ]
            .as_slice(),
        ),
        (
            "rust",
            ["rust programming", "systems programming in rust"].as_slice(),
        ),
        (
            "kubernetes",
            ["k8s", "container orchestration"].as_slice(),
        ),
        (
            "python",
            ["python programming", "python development"].as_slice(),
        ),
        (
            "react",
            ["reactjs", "react.js"].as_slice(),
        ),
        (
            "project management",
            ["pmp", "scrum master", "agile project management"].as_slice(),
        ),
        (
            "sql",
            ["structured query language", "database querying"].as_slice(),
        ),
    ])
});

/// True if `a` and `b` refer to the same concept: equal case-insensitively,
/// a substring of one another, or co-members of a synonym-table entry.
pub fn concepts_match(a: &str, b: &str) -> bool {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();

    if a_lower == b_lower {
        return true;
    }
    if a_lower.contains(&b_lower) || b_lower.contains(&a_lower) {
        return true;
    }

    SYNONYM_TABLE.iter().any(|(key, alternates)| {
        let in_set = |s: &str| s == *key || alternates.contains(&s);
        in_set(&a_lower) && in_set(&b_lower)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_case_insensitive() {
        assert!(concepts_match("Rust", "rust"));
    }

    #[test]
    fn test_substring_match() {
        assert!(concepts_match("CEGID mastery", "cegid"));
    }

    #[test]
    fn test_synonym_table_match() {
        assert!(concepts_match("accountant", "bookkeeping"));
        assert!(concepts_match("tax management", "comptable"));
    }

    #[test]
    fn test_unrelated_terms_do_not_match() {
        assert!(!concepts_match("java", "kubernetes"));
    }
}
