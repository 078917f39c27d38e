//! Shared domain types and configuration for the prospector workspace.
//!
//! Everything a business prospect is made of lives here: the raw
//! [`BusinessData`] returned by a search, the [`AiInsight`] attached by an
//! analysis, the ephemeral [`SearchResult`] and the persisted [`Prospect`].
//! Application configuration is read from environment variables via
//! [`load_app_config`].

mod app_config;
mod config;
mod types;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{AiInsight, BusinessData, Location, Prospect, SearchResult, UserStatus};

/// Errors produced while loading application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
