//! Schema-constrained deep analysis of a single business.

use prospector_core::{AiInsight, BusinessData};
use serde::Deserialize;

use crate::client::GeminiClient;
use crate::error::GeminiError;
use crate::extract::strip_code_fences;
use crate::wire::GenerateContentRequest;

/// The schema-validated payload the model must produce.
#[derive(Debug, Deserialize)]
struct InsightPayload {
    score: f64,
    analysis_summary: String,
    suggested_offer: String,
    is_target: bool,
}

/// Runs a deep commercial analysis of `business`, scored on 0–100.
///
/// The response is constrained by a JSON schema, so no grounding tool is
/// attached (the two are mutually exclusive on the target models). Any
/// failure is the typed error — there is deliberately no zero-score
/// sentinel that could be mistaken for a genuine low score.
///
/// # Errors
///
/// - [`GeminiError::Http`] / [`GeminiError::Api`] on provider failure.
/// - [`GeminiError::Deserialize`] when the payload violates the schema.
/// - [`GeminiError::EmptyResponse`] when no candidate text came back.
pub async fn analyze(
    client: &GeminiClient,
    business: &BusinessData,
) -> Result<AiInsight, GeminiError> {
    let request =
        GenerateContentRequest::prompt(prompt(business)).with_json_schema(insight_schema());

    let context = format!("analyze(\"{}\")", business.name);
    let text = client
        .generate(client.analysis_model(), &context, &request)
        .await?;

    let payload: InsightPayload = serde_json::from_str(strip_code_fences(&text).as_str())
        .map_err(|e| GeminiError::Deserialize {
            context,
            source: e,
        })?;

    Ok(AiInsight {
        score: payload.score.clamp(0.0, 100.0),
        analysis_summary: payload.analysis_summary,
        suggested_offer: payload.suggested_offer,
        is_target: payload.is_target,
    })
}

fn prompt(business: &BusinessData) -> String {
    format!(
        r#"Agis comme un expert en développement commercial et stratégie digitale.
Analyse cette entreprise :
Nom : {name}
Site Web : {website}
Note : {rating}
Adresse : {address}

Tâche :
1. Détermine si c'est une bonne cible pour une agence de marketing digital / développement web.
2. Donne un score de 0 à 100 (100 = prospect idéal).
3. Rédige un résumé de l'analyse en 2 phrases.
4. Suggère une approche commerciale ("Icebreaker") ou une offre spécifique.

Réponds en JSON uniquement."#,
        name = business.name,
        website = business.website.as_deref().unwrap_or("Non renseigné"),
        rating = business
            .rating
            .map_or_else(|| "N/A".to_string(), |r| r.to_string()),
        address = business.address.as_deref().unwrap_or("N/A"),
    )
}

fn insight_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "score": { "type": "number" },
            "analysis_summary": { "type": "string" },
            "suggested_offer": { "type": "string" },
            "is_target": { "type": "boolean" }
        },
        "required": ["score", "analysis_summary", "suggested_offer", "is_target"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_renders_fallbacks_for_unknown_fields() {
        let business = BusinessData {
            name: "Chez Marcel".to_string(),
            ..BusinessData::default()
        };
        let p = prompt(&business);
        assert!(p.contains("Site Web : Non renseigné"));
        assert!(p.contains("Note : N/A"));
        assert!(p.contains("Adresse : N/A"));
    }

    #[test]
    fn schema_requires_all_insight_fields() {
        let schema = insight_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert_eq!(schema["properties"]["score"]["type"], "number");
        assert_eq!(schema["properties"]["is_target"]["type"], "boolean");
    }

    #[test]
    fn payload_deserializes_from_schema_shaped_json() {
        let payload: InsightPayload = serde_json::from_str(
            r#"{"score": 85, "analysis_summary": "Bonne cible.", "suggested_offer": "Site vitrine", "is_target": true}"#,
        )
        .unwrap();
        assert_eq!(payload.score, 85.0);
        assert!(payload.is_target);
    }
}
