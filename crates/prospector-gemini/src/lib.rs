//! HTTP adapters for the Gemini `generateContent` API.
//!
//! Three adapters share one [`GeminiClient`]:
//! - [`search::search_all`] — Maps-grounded business search, three prompt
//!   strategies dispatched concurrently;
//! - [`enrich::find_email`] — web-search-grounded contact email discovery;
//! - [`analyze::analyze`] — schema-constrained deep analysis of a single
//!   business.
//!
//! The provider answers in free text; [`strip_code_fences`] and
//! [`first_email`] clean it up before parsing. Every failure mode
//! (network, quota, malformed JSON, empty candidates) surfaces as a typed
//! [`GeminiError`] — callers decide how to degrade.

pub mod analyze;
pub mod enrich;
pub mod search;

mod client;
mod error;
mod extract;
mod wire;

pub use client::{GeminiClient, GeminiConfig};
pub use error::GeminiError;
pub use extract::{first_email, strip_code_fences};
pub use search::SearchStrategy;
