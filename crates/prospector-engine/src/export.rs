//! CSV export of a filtered result set.

use std::collections::HashMap;

use prospector_core::SearchResult;

use crate::heuristic::HeuristicScore;

const HEADER: &str = "Name,Address,Email,Phone,Website,Rating,Score";

/// Renders the results as CSV with the fixed column order
/// `Name, Address, Email, Phone, Website, Rating, Score`.
///
/// Every field is quoted; embedded quotes are escaped by doubling. The
/// score column carries the attached 0–10 heuristic score, blank when the
/// result has none.
#[must_use]
pub fn to_csv(results: &[SearchResult], scores: &HashMap<String, HeuristicScore>) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for result in results {
        let b = &result.business_data;
        let rating = b.rating.map(|r| r.to_string()).unwrap_or_default();
        let score = scores
            .get(&result.source_id)
            .map(|s| s.score.to_string())
            .unwrap_or_default();

        let fields = [
            b.name.as_str(),
            b.address.as_deref().unwrap_or(""),
            b.email.as_deref().unwrap_or(""),
            b.phone.as_deref().unwrap_or(""),
            b.website.as_deref().unwrap_or(""),
            rating.as_str(),
            score.as_str(),
        ];
        let row: Vec<String> = fields.iter().map(|f| quote(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Suggested file name for an export, embedding the query and locality.
#[must_use]
pub fn export_filename(query: &str, locality: &str) -> String {
    format!("prospects_{}_{}.csv", slug(query), slug(locality))
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn slug(s: &str) -> String {
    s.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}
