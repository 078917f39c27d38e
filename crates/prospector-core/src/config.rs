use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid. No variable is
/// strictly required: the API keys degrade features when absent and
/// everything else has a default.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let gemini_api_key = lookup("GEMINI_API_KEY").ok();
    let maps_api_key = lookup("PROSPECTOR_MAPS_API_KEY").ok();

    let gemini_base_url = or_default(
        "PROSPECTOR_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );
    let search_model = or_default("PROSPECTOR_SEARCH_MODEL", "gemini-2.5-flash");
    let analysis_model = or_default("PROSPECTOR_ANALYSIS_MODEL", "gemini-3-flash-preview");
    let request_timeout_secs = parse_u64("PROSPECTOR_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PROSPECTOR_USER_AGENT", "prospector/0.1 (lead-prospecting)");
    let store_path = PathBuf::from(or_default("PROSPECTOR_STORE_PATH", "./data/prospects"));
    let log_level = or_default("PROSPECTOR_LOG_LEVEL", "info");
    let enrich_concurrency = parse_usize("PROSPECTOR_ENRICH_CONCURRENCY", "3")?;
    if enrich_concurrency == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PROSPECTOR_ENRICH_CONCURRENCY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        gemini_api_key,
        maps_api_key,
        gemini_base_url,
        search_model,
        analysis_model,
        request_timeout_secs,
        user_agent,
        store_path,
        log_level,
        enrich_concurrency,
    })
}
