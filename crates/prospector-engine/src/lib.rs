//! In-memory prospecting logic: scoring, aggregation, filtering, export.
//!
//! Everything in this crate is pure and synchronous — no network, no
//! storage. The CLI wires these pieces between the Gemini adapters and the
//! prospect store.

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod heuristic;
pub mod session;

pub use aggregate::{aggregate, attach_scores, normalized_name_key};
pub use filter::Filters;
pub use heuristic::{score, HeuristicScore};
pub use session::{EnrichmentTracker, SearchGeneration};
