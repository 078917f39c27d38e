//! Contact email discovery for a single business.

use prospector_core::BusinessData;

use crate::client::GeminiClient;
use crate::error::GeminiError;
use crate::extract::first_email;
use crate::wire::{GenerateContentRequest, ToolConfig};

/// Asks the provider to find a public contact email for `business`.
///
/// One web-search-grounded prompt, attempted exactly once. The model is
/// told to answer with the bare address or the literal `null`; the
/// response is scanned for the first email-shaped token. `Ok(None)` means
/// "not found" — a transient provider hiccup that still returns 2xx text
/// is indistinguishable from a genuinely absent email, which is why
/// callers allow manual re-invocation per business.
///
/// # Errors
///
/// - [`GeminiError::Http`] / [`GeminiError::Api`] on provider failure.
/// - [`GeminiError::EmptyResponse`] when no candidate text came back.
pub async fn find_email(
    client: &GeminiClient,
    business: &BusinessData,
) -> Result<Option<String>, GeminiError> {
    let request =
        GenerateContentRequest::prompt(prompt(business)).with_tool(ToolConfig::google_search());

    let context = format!("find_email(\"{}\")", business.name);
    let text = client
        .generate(client.search_model(), &context, &request)
        .await?;

    let email = first_email(&text);
    if email.is_none() {
        tracing::debug!(business = %business.name, "no public email found");
    }
    Ok(email)
}

fn prompt(business: &BusinessData) -> String {
    let mut context = String::new();
    if let Some(address) = &business.address {
        context.push_str(&format!("Adresse : {address}\n"));
    }
    if let Some(website) = &business.website {
        context.push_str(&format!("Site web : {website}\n"));
    }

    format!(
        r#"Cherche sur le web l'adresse e-mail de contact publique de cette entreprise :
Nom : {name}
{context}
Réponds UNIQUEMENT par l'adresse e-mail trouvée, sans texte autour.
Si aucune adresse e-mail publique n'existe, réponds exactement : null"#,
        name = business.name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_known_context_lines() {
        let business = BusinessData {
            name: "Chez Marcel".to_string(),
            address: Some("3 rue des Halles, Lyon".to_string()),
            website: Some("https://chez-marcel.fr".to_string()),
            ..BusinessData::default()
        };
        let p = prompt(&business);
        assert!(p.contains("Nom : Chez Marcel"));
        assert!(p.contains("Adresse : 3 rue des Halles, Lyon"));
        assert!(p.contains("Site web : https://chez-marcel.fr"));
    }

    #[test]
    fn prompt_omits_unknown_context_lines() {
        let business = BusinessData {
            name: "Chez Marcel".to_string(),
            ..BusinessData::default()
        };
        let p = prompt(&business);
        assert!(!p.contains("Adresse :"));
        assert!(!p.contains("Site web :"));
    }
}
