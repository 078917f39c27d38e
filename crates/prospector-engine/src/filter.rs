//! User-selected predicates over a result set.

use std::collections::HashMap;

use prospector_core::SearchResult;

use crate::heuristic::HeuristicScore;

/// Conjunctive result predicates.
///
/// `max_rating` keeps businesses rated *at most* that value — the tool
/// surfaces underperformers, not top performers. `min_score` applies to
/// the attached 0–10 heuristic score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub max_rating: Option<f64>,
    pub no_website_only: bool,
    pub min_score: Option<f64>,
}

impl Filters {
    /// True when no predicate is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max_rating.is_none() && !self.no_website_only && self.min_score.is_none()
    }

    /// Applies the predicates, returning the surviving results in order.
    /// The input is never mutated. A result without a rating passes any
    /// `max_rating` bound; a result missing from `scores` passes
    /// `min_score`.
    #[must_use]
    pub fn apply(
        &self,
        results: &[SearchResult],
        scores: &HashMap<String, HeuristicScore>,
    ) -> Vec<SearchResult> {
        results
            .iter()
            .filter(|r| {
                if let Some(max) = self.max_rating {
                    if r.business_data.rating.is_some_and(|rating| rating > max) {
                        return false;
                    }
                }
                if self.no_website_only && r.business_data.website.is_some() {
                    return false;
                }
                if let Some(min) = self.min_score {
                    if scores
                        .get(&r.source_id)
                        .is_some_and(|s| s.score < min)
                    {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use prospector_core::BusinessData;

    use super::*;
    use crate::aggregate::attach_scores;

    fn result(id: &str, rating: Option<f64>, website: Option<&str>) -> SearchResult {
        SearchResult {
            source_id: id.to_string(),
            business_data: BusinessData {
                name: format!("Business {id}"),
                rating,
                website: website.map(str::to_string),
                ..BusinessData::default()
            },
            location: None,
        }
    }

    #[test]
    fn predicates_are_conjunctive() {
        let results = vec![
            result("a", Some(3.0), None),
            result("b", Some(5.0), Some("https://x.fr")),
        ];
        let scores = attach_scores(&results);
        let filters = Filters {
            max_rating: Some(4.0),
            no_website_only: true,
            min_score: None,
        };
        let kept = filters.apply(&results, &scores);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].source_id, "a");
    }

    #[test]
    fn max_rating_keeps_underperformers() {
        let results = vec![result("low", Some(3.5), None), result("high", Some(4.8), None)];
        let scores = attach_scores(&results);
        let filters = Filters {
            max_rating: Some(4.0),
            ..Filters::default()
        };
        let kept = filters.apply(&results, &scores);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].source_id, "low");
    }

    #[test]
    fn unrated_result_passes_max_rating() {
        let results = vec![result("unrated", None, None)];
        let scores = attach_scores(&results);
        let filters = Filters {
            max_rating: Some(4.0),
            ..Filters::default()
        };
        assert_eq!(filters.apply(&results, &scores).len(), 1);
    }

    #[test]
    fn min_score_drops_low_heuristic_results() {
        // Rated well, with a website: heuristic score 5.
        let results = vec![
            result("standard", Some(4.8), Some("https://x.fr")),
            result("siteless", None, None), // score 9
        ];
        let scores = attach_scores(&results);
        let filters = Filters {
            min_score: Some(7.0),
            ..Filters::default()
        };
        let kept = filters.apply(&results, &scores);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].source_id, "siteless");
    }

    #[test]
    fn empty_filters_keep_everything_unchanged() {
        let results = vec![result("a", None, None), result("b", Some(5.0), None)];
        let scores = attach_scores(&results);
        let filters = Filters::default();
        assert!(filters.is_empty());
        assert_eq!(filters.apply(&results, &scores), results);
    }
}
