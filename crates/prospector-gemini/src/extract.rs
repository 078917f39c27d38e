//! Cleanup of the model's free-text output.

use regex::Regex;

/// Strips Markdown code-fence markers the model wraps JSON in, returning
/// the trimmed payload.
///
/// The model is told to answer with bare JSON but regularly fences it
/// anyway (```` ```json ... ``` ````); fences can appear with or without
/// the language tag.
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// First email-shaped token in `text`, if any.
///
/// The enrichment prompt asks for an email or the literal `null`; a
/// response without an email pattern therefore reads as "none found".
#[must_use]
pub fn first_email(text: &str) -> Option<String> {
    let re = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .expect("valid email regex");
    re.find(text).map(|m| m.as_str().to_string())
}
