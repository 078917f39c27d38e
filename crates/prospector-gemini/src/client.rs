//! HTTP client for the Gemini `generateContent` API.
//!
//! Wraps `reqwest` with Gemini-specific error handling, API key
//! management and typed response deserialization. Every call is attempted
//! exactly once — there is no retry policy; a transient provider failure
//! surfaces as a [`GeminiError`] for the caller to degrade.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::wire::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_SEARCH_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_ANALYSIS_MODEL: &str = "gemini-3-flash-preview";

/// Connection settings for a [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    /// Model used for grounded search and email discovery.
    pub search_model: String,
    /// Model used for schema-constrained deep analysis.
    pub analysis_model: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl GeminiConfig {
    /// Production defaults with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            search_model: DEFAULT_SEARCH_MODEL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            timeout_secs: 30,
            user_agent: "prospector/0.1 (lead-prospecting)".to_string(),
        }
    }
}

/// Client for the Gemini `generateContent` API.
///
/// Use [`GeminiClient::new`] for production or point `base_url` at a mock
/// server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    search_model: String,
    analysis_model: String,
}

impl GeminiClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeminiError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.clone())
            .build()?;

        // Normalise: no trailing slash, so the path join below stays
        // predictable for both production and mock-server URLs.
        let trimmed = config.base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|e| GeminiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url,
            search_model: config.search_model.clone(),
            analysis_model: config.analysis_model.clone(),
        })
    }

    pub(crate) fn search_model(&self) -> &str {
        &self.search_model
    }

    pub(crate) fn analysis_model(&self) -> &str {
        &self.analysis_model
    }

    /// Sends one `generateContent` request and returns the first
    /// candidate's text.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Http`] on network failure.
    /// - [`GeminiError::Api`] on a non-2xx status (quota, bad key, ...).
    /// - [`GeminiError::Deserialize`] if the body is not a valid response.
    /// - [`GeminiError::EmptyResponse`] if no candidate carries text.
    pub(crate) async fn generate(
        &self,
        model: &str,
        context: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiError> {
        let url = self.build_url(model);
        tracing::debug!(model, context, "sending Gemini request");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
                context: context.to_string(),
                source: e,
            })?;

        parsed
            .first_text()
            .ok_or_else(|| GeminiError::EmptyResponse(context.to_string()))
    }

    /// Builds `{base}/v1beta/models/{model}:generateContent`.
    fn build_url(&self, model: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("v1beta/models/{model}:generateContent"));
        url
    }
}
