use thiserror::Error;

/// Errors returned by the Gemini adapters.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status; `message` carries the
    /// provider's error text when the envelope could be parsed.
    #[error("Gemini API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body (or the model's JSON payload) could not be
    /// deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A 2xx response carried no candidate text to work with.
    #[error("empty Gemini response for {0}")]
    EmptyResponse(String),

    /// Client construction was given an unusable base URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
