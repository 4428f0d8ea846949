//! Fuzzy search and filtering utilities

use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::core::ruleset::RuleSetRef;

/// Fuzzy filters rule-set membership entries by name using the nucleo matcher.
///
/// Returns entries sorted by match quality (best matches first).
/// Empty queries return all entries in their original order with a score of 0.
///
/// Uses buffer reuse optimization to minimize allocations during filtering.
pub fn fuzzy_filter_rule_sets<'a>(
    refs: impl Iterator<Item = &'a RuleSetRef>,
    query: &str,
) -> Vec<(&'a RuleSetRef, u16)> {
    if query.is_empty() {
        return refs.map(|r| (r, 0)).collect();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let query_lowercase = query.to_lowercase();
    let mut needle_buf = Vec::new();
    let needle = Utf32Str::new(&query_lowercase, &mut needle_buf);

    // Reuse buffer across all entries to reduce allocations
    let mut haystack_buf = Vec::new();

    let mut results: Vec<_> = refs
        .filter_map(|entry| {
            let name_lowercase = entry.name.to_lowercase();
            haystack_buf.clear(); // Reuse instead of reallocate
            let haystack = Utf32Str::new(&name_lowercase, &mut haystack_buf);
            matcher
                .fuzzy_match(haystack, needle)
                .map(|score| (entry, score))
        })
        .collect();

    // Sort by score descending (highest relevance first)
    results.sort_unstable_by(|a, b| b.1.cmp(&a.1));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[&str]) -> Vec<RuleSetRef> {
        names
            .iter()
            .map(|n| RuleSetRef {
                name: (*n).to_string(),
                destination: "wan".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_empty_query_returns_all() {
        let entries = refs(&["lan-wan", "dmz-wan"]);
        let results = fuzzy_filter_rule_sets(entries.iter(), "");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|(_, score)| *score == 0));
        // Original order preserved for empty queries
        assert_eq!(results[0].0.name, "lan-wan");
    }

    #[test]
    fn test_match_filters_and_ranks() {
        let entries = refs(&["lan-to-wan", "guest-to-wan", "lan-local"]);
        let results = fuzzy_filter_rule_sets(entries.iter(), "lan");
        assert!(!results.is_empty());
        assert!(results.iter().all(|(r, _)| r.name.contains("lan")));
        // Scores are sorted descending
        for pair in results.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let entries = refs(&["LAN-WAN"]);
        let results = fuzzy_filter_rule_sets(entries.iter(), "lan");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let entries = refs(&["lan-wan"]);
        let results = fuzzy_filter_rule_sets(entries.iter(), "zzzz");
        assert!(results.is_empty());
    }
}
