use std::path::PathBuf;

/// Application configuration, resolved from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    /// Gemini API key. AI commands fail with a clear message without it.
    pub gemini_api_key: Option<String>,
    /// Google Maps key for the live-map hand-off. Optional; absence falls
    /// back to a plain coordinate listing.
    pub maps_api_key: Option<String>,
    pub gemini_base_url: String,
    /// Model used for grounded search and email discovery.
    pub search_model: String,
    /// Model used for schema-constrained deep analysis.
    pub analysis_model: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub store_path: PathBuf,
    pub log_level: String,
    /// Upper bound on concurrent email-enrichment requests.
    pub enrich_concurrency: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "maps_api_key",
                &self.maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_base_url", &self.gemini_base_url)
            .field("search_model", &self.search_model)
            .field("analysis_model", &self.analysis_model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("store_path", &self.store_path)
            .field("log_level", &self.log_level)
            .field("enrich_concurrency", &self.enrich_concurrency)
            .finish()
    }
}
