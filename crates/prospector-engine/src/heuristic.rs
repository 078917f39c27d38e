//! Rule-based fallback scoring for businesses.
//!
//! A deterministic, side-effect-free estimate of prospecting potential,
//! used when no AI analysis has been run and for quick client-side
//! ranking. Scores on 0–10; [`HeuristicScore::into_insight`] rescales to
//! the canonical 0–100 [`AiInsight`] scale.

use prospector_core::{AiInsight, BusinessData};

const MAX_SCORE: f64 = 10.0;
const TARGET_THRESHOLD: f64 = 7.0;

/// The local heuristic's verdict on a business, on the raw 0–10 scale.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicScore {
    pub score: f64,
    pub summary: String,
    pub suggested_offer: String,
    pub is_target: bool,
}

impl HeuristicScore {
    /// Converts to the canonical 0–100 [`AiInsight`].
    #[must_use]
    pub fn into_insight(self) -> AiInsight {
        AiInsight {
            score: self.score * 10.0,
            analysis_summary: self.summary,
            suggested_offer: self.suggested_offer,
            is_target: self.is_target,
        }
    }
}

/// Scores a business on 0–10.
///
/// Base 5, +3 without a website, +2 when the rating is below 4.0, +1 when
/// no rating is published, clamped to 10. The summary lists the triggered
/// reasons; the offer is picked by priority (site, reputation, SEO).
#[must_use]
pub fn score(business: &BusinessData) -> HeuristicScore {
    let mut value: f64 = 5.0;
    let mut reasons: Vec<&str> = Vec::new();

    let low_rating = business.rating.is_some_and(|r| r < 4.0);

    if business.website.is_none() {
        value += 3.0;
        reasons.push("Pas de site web");
    }
    if low_rating {
        value += 2.0;
        reasons.push("Note inférieure à 4");
    }
    if business.rating.is_none() {
        value += 1.0;
        reasons.push("Aucune note publiée");
    }

    let value = value.min(MAX_SCORE);

    let summary = if reasons.is_empty() {
        "Profil standard".to_string()
    } else {
        reasons.join(", ")
    };

    let suggested_offer = if business.website.is_none() {
        "Création Site Web"
    } else if low_rating {
        "Gestion e-réputation"
    } else {
        "Optimisation SEO"
    };

    HeuristicScore {
        score: value,
        summary,
        suggested_offer: suggested_offer.to_string(),
        is_target: value >= TARGET_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn business(rating: Option<f64>, website: Option<&str>) -> BusinessData {
        BusinessData {
            name: "Test".to_string(),
            rating,
            website: website.map(str::to_string),
            ..BusinessData::default()
        }
    }

    #[test]
    fn no_website_always_suggests_site_creation() {
        for rating in [None, Some(2.0), Some(4.5)] {
            let result = score(&business(rating, None));
            assert_eq!(result.suggested_offer, "Création Site Web");
        }
    }

    #[test]
    fn no_rating_with_website_scores_six_and_is_not_target() {
        let result = score(&business(None, Some("https://example.fr")));
        assert_eq!(result.score, 6.0);
        assert!(!result.is_target);
    }

    #[test]
    fn score_stays_within_bounds_for_every_input() {
        let cases = [
            business(None, None),
            business(Some(1.0), None),
            business(Some(3.9), Some("https://x.fr")),
            business(Some(5.0), Some("https://x.fr")),
            BusinessData::default(),
        ];
        for case in cases {
            let result = score(&case);
            assert!(
                (0.0..=10.0).contains(&result.score),
                "score {} out of range for {case:?}",
                result.score
            );
        }
    }

    #[test]
    fn siteless_low_rated_business_hits_the_ceiling() {
        let result = score(&business(Some(2.5), None));
        assert_eq!(result.score, 10.0);
        assert!(result.is_target);
        assert_eq!(result.summary, "Pas de site web, Note inférieure à 4");
    }

    #[test]
    fn well_rated_business_with_site_is_standard_profile() {
        let result = score(&business(Some(4.7), Some("https://x.fr")));
        assert_eq!(result.score, 5.0);
        assert_eq!(result.summary, "Profil standard");
        assert_eq!(result.suggested_offer, "Optimisation SEO");
        assert!(!result.is_target);
    }

    #[test]
    fn low_rating_with_site_suggests_reputation_management() {
        let result = score(&business(Some(3.2), Some("https://x.fr")));
        assert_eq!(result.score, 7.0);
        assert!(result.is_target);
        assert_eq!(result.suggested_offer, "Gestion e-réputation");
    }

    #[test]
    fn insight_conversion_rescales_to_hundred() {
        let insight = score(&business(None, None)).into_insight();
        assert_eq!(insight.score, 90.0);
        assert!((0.0..=100.0).contains(&insight.score));
        assert!(insight.is_target);
    }

    #[test]
    fn scoring_is_deterministic() {
        let b = business(Some(3.0), None);
        assert_eq!(score(&b), score(&b));
    }
}
