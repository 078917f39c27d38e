//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Only the subset this tool speaks is modeled: text parts in, text parts
//! out, the `googleMaps`/`googleSearch` grounding tools, and the
//! JSON-schema output constraint. Model goes in the URL path; auth in the
//! `x-goog-api-key` header.

use serde::{Deserialize, Serialize};

/// Top-level request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single-turn user prompt with no tools or output constraint.
    pub(crate) fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(text.into()),
                }],
            }],
            tools: Vec::new(),
            generation_config: None,
        }
    }

    pub(crate) fn with_tool(mut self, tool: ToolConfig) -> Self {
        self.tools.push(tool);
        self
    }

    /// Constrains the response to JSON matching `schema`. Mutually
    /// exclusive with grounding tools on the target models.
    pub(crate) fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
        });
        self
    }
}

/// A content entry (user/model turn).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A part within a content entry. Non-text parts (grounding metadata)
/// deserialize with `text: None` and are skipped.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A grounding-tool entry in `tools[]`, e.g. `{"googleMaps": {}}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ToolConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    google_maps: Option<EmptyToolParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    google_search: Option<EmptyToolParams>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmptyToolParams {}

impl ToolConfig {
    pub(crate) fn google_maps() -> Self {
        Self {
            google_maps: Some(EmptyToolParams {}),
            google_search: None,
        }
    }

    pub(crate) fn google_search() -> Self {
        Self {
            google_maps: None,
            google_search: Some(EmptyToolParams {}),
        }
    }
}

/// Output constraints (`responseMimeType` + `responseSchema`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// Top-level response body.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, `None` when the
    /// response carries no usable text.
    pub(crate) fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let content = candidate.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<Content>,
}

/// Non-2xx error envelope: `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_camel_case() {
        let req = GenerateContentRequest::prompt("Bonjour")
            .with_tool(ToolConfig::google_maps())
            .with_json_schema(serde_json::json!({"type": "object"}));

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Bonjour");
        assert!(json["tools"][0]["googleMaps"].is_object());
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "object");
    }

    #[test]
    fn plain_prompt_omits_tools_and_generation_config() {
        let json = serde_json::to_value(GenerateContentRequest::prompt("x")).unwrap();
        assert!(json.get("tools").is_none());
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn google_search_tool_serializes_under_its_own_key() {
        let json = serde_json::to_value(ToolConfig::google_search()).unwrap();
        assert!(json["googleSearch"].is_object());
        assert!(json.get("googleMaps").is_none());
    }

    #[test]
    fn first_text_joins_parts_of_the_first_candidate() {
        let resp: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "[{\"name\":"}, {"text": " \"X\"}]"}]
                }
            }]
        }))
        .unwrap();
        assert_eq!(resp.first_text().as_deref(), Some("[{\"name\": \"X\"}]"));
    }

    #[test]
    fn first_text_is_none_for_empty_candidates() {
        let resp: GenerateContentResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(resp.first_text().is_none());

        let resp: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"content": {"parts": []}}]
        }))
        .unwrap();
        assert!(resp.first_text().is_none());
    }

    #[test]
    fn non_text_parts_are_skipped() {
        let resp: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": ""}}, {"text": "ok"}]
                }
            }]
        }))
        .unwrap();
        assert_eq!(resp.first_text().as_deref(), Some("ok"));
    }

    #[test]
    fn error_envelope_deserializes() {
        let err: ErrorResponse = serde_json::from_value(serde_json::json!({
            "error": {"message": "API key not valid."}
        }))
        .unwrap();
        assert_eq!(err.error.message, "API key not valid.");
    }
}
