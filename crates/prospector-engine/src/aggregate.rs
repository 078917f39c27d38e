//! Merging and deduplication of multi-strategy search batches.

use std::collections::{HashMap, HashSet};

use prospector_core::{BusinessData, Location, SearchResult};
use uuid::Uuid;

use crate::heuristic::{self, HeuristicScore};

/// Dedup key for a business name: lowercased, whitespace collapsed.
///
/// The provider spells the same business differently across prompt
/// strategies ("Chez  Marcel", "chez marcel"); exact-match dedup misses
/// those.
#[must_use]
pub fn normalized_name_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Merges per-strategy batches into one result list with at most one entry
/// per (normalized) business name. First seen wins; batch order is the
/// strategy dispatch order, so earlier strategies take precedence.
///
/// Every surviving entry gets a fresh session-scoped `source_id`.
#[must_use]
pub fn aggregate(batches: Vec<Vec<(BusinessData, Option<Location>)>>) -> Vec<SearchResult> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut results = Vec::new();

    for batch in batches {
        for (business_data, location) in batch {
            if !seen.insert(normalized_name_key(&business_data.name)) {
                continue;
            }
            results.push(SearchResult {
                source_id: Uuid::new_v4().to_string(),
                business_data,
                location,
            });
        }
    }

    tracing::debug!(count = results.len(), "aggregated search results");
    results
}

/// Computes the transient local score for each result, keyed by
/// `source_id`.
///
/// Carried beside the results rather than inside [`SearchResult`] — the
/// score is a session-local ranking aid, not part of the result itself.
#[must_use]
pub fn attach_scores(results: &[SearchResult]) -> HashMap<String, HeuristicScore> {
    results
        .iter()
        .map(|r| (r.source_id.clone(), heuristic::score(&r.business_data)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> (BusinessData, Option<Location>) {
        (
            BusinessData {
                name: name.to_string(),
                ..BusinessData::default()
            },
            None,
        )
    }

    #[test]
    fn duplicate_name_across_batches_survives_once() {
        let batches = vec![
            vec![named("Chez Marcel"), named("Boulangerie Martin")],
            vec![named("Chez Marcel"), named("Café de la Gare")],
        ];
        let results = aggregate(batches);
        assert_eq!(results.len(), 3);
        let marcels = results
            .iter()
            .filter(|r| r.business_data.name == "Chez Marcel")
            .count();
        assert_eq!(marcels, 1);
    }

    #[test]
    fn dedup_key_ignores_case_and_whitespace() {
        let batches = vec![vec![named("Chez  Marcel")], vec![named("chez marcel")]];
        let results = aggregate(batches);
        assert_eq!(results.len(), 1);
        // First seen wins.
        assert_eq!(results[0].business_data.name, "Chez  Marcel");
    }

    #[test]
    fn every_result_gets_a_distinct_source_id() {
        let batches = vec![vec![named("A"), named("B"), named("C")]];
        let results = aggregate(batches);
        let ids: HashSet<_> = results.iter().map(|r| r.source_id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn empty_batches_aggregate_to_empty() {
        assert!(aggregate(vec![vec![], vec![]]).is_empty());
        assert!(aggregate(Vec::new()).is_empty());
    }

    #[test]
    fn attached_scores_cover_every_result() {
        let results = aggregate(vec![vec![named("A"), named("B")]]);
        let scores = attach_scores(&results);
        assert_eq!(scores.len(), results.len());
        for result in &results {
            // Siteless, unrated: 5 + 3 + 1.
            assert_eq!(scores[&result.source_id].score, 9.0);
        }
    }

    #[test]
    fn normalized_key_examples() {
        assert_eq!(normalized_name_key("  Le  Bistrot "), "le bistrot");
        assert_eq!(normalized_name_key("LE BISTROT"), "le bistrot");
    }
}
