//! Maps-grounded business search.
//!
//! One query is fanned out as three differently-framed prompts to widen
//! result volume and diversity; each asks the model to verify candidates
//! against Google Maps and answer with a strict JSON array. Grounding
//! tools and schema-constrained output are mutually exclusive on the
//! target models, so the array shape is enforced by prompt and repaired
//! by [`strip_code_fences`] on the way back.

use futures::future::join_all;
use prospector_core::{BusinessData, Location};
use serde::Deserialize;

use crate::client::GeminiClient;
use crate::error::GeminiError;
use crate::extract::strip_code_fences;

/// One prompt framing of the same `(query, locality)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Low-rated or siteless businesses — the tool's main quarry.
    Underperformers,
    /// The best-known businesses of the locality.
    Popular,
    /// Neighborhood businesses off the beaten track.
    Nearby,
}

impl SearchStrategy {
    pub const ALL: [SearchStrategy; 3] = [
        SearchStrategy::Underperformers,
        SearchStrategy::Popular,
        SearchStrategy::Nearby,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SearchStrategy::Underperformers => "underperformers",
            SearchStrategy::Popular => "popular",
            SearchStrategy::Nearby => "nearby",
        }
    }

    fn angle(self) -> &'static str {
        match self {
            SearchStrategy::Underperformers => {
                "Privilégie les entreprises mal notées ou sans site web."
            }
            SearchStrategy::Popular => {
                "Privilégie les entreprises les plus connues et les plus populaires."
            }
            SearchStrategy::Nearby => {
                "Privilégie les entreprises de proximité et de quartier, hors des sentiers battus."
            }
        }
    }

    fn prompt(self, query: &str, locality: &str) -> String {
        format!(
            r#"Tu es un assistant de prospection. Cherche des entreprises correspondant à cette requête : "{query} à {locality}".
{angle}
Utilise Google Maps pour vérifier leur existence.

IMPORTANT : Une fois les résultats trouvés, génère UNIQUEMENT un tableau JSON strict (sans Markdown, sans texte autour).
Chaque objet du tableau doit avoir cette structure :
{{
  "name": "Nom de l'entreprise",
  "address": "Adresse complète",
  "rating": 4.5 (nombre ou null),
  "website": "URL du site (ou null)",
  "phone": "Numéro de téléphone (ou null)",
  "latitude": 48.85 (nombre ou null),
  "longitude": 2.35 (nombre ou null)
}}

Trouve au moins 5 résultats pertinents."#,
            angle = self.angle(),
        )
    }
}

/// One entry of the model's JSON array.
#[derive(Debug, Deserialize)]
struct RawBusiness {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

/// Runs a single prompt strategy.
///
/// The top-level payload must be a JSON array; individual entries that do
/// not fit the expected object shape, or lack a name, are skipped with a
/// warning rather than failing the batch.
///
/// # Errors
///
/// - [`GeminiError::Http`] / [`GeminiError::Api`] on provider failure.
/// - [`GeminiError::Deserialize`] when the payload is not a JSON array.
/// - [`GeminiError::EmptyResponse`] when no candidate text came back.
pub async fn search_strategy(
    client: &GeminiClient,
    strategy: SearchStrategy,
    query: &str,
    locality: &str,
) -> Result<Vec<(BusinessData, Option<Location>)>, GeminiError> {
    let request = crate::wire::GenerateContentRequest::prompt(strategy.prompt(query, locality))
        .with_tool(crate::wire::ToolConfig::google_maps());

    let context = format!("search({}, \"{query}\")", strategy.label());
    let text = client
        .generate(client.search_model(), &context, &request)
        .await?;

    parse_businesses(&text, strategy)
}

/// Dispatches all strategies concurrently for one `(query, locality)`
/// pair and returns each strategy's outcome. The caller decides how to
/// degrade failed strategies; typically they are logged and skipped.
pub async fn search_all(
    client: &GeminiClient,
    query: &str,
    locality: &str,
) -> Vec<(
    SearchStrategy,
    Result<Vec<(BusinessData, Option<Location>)>, GeminiError>,
)> {
    let futures = SearchStrategy::ALL
        .iter()
        .map(|&strategy| async move {
            (
                strategy,
                search_strategy(client, strategy, query, locality).await,
            )
        });
    join_all(futures).await
}

fn parse_businesses(
    text: &str,
    strategy: SearchStrategy,
) -> Result<Vec<(BusinessData, Option<Location>)>, GeminiError> {
    let cleaned = strip_code_fences(text);

    let entries: Vec<serde_json::Value> =
        serde_json::from_str(&cleaned).map_err(|e| GeminiError::Deserialize {
            context: format!("search({}) array", strategy.label()),
            source: e,
        })?;

    let total = entries.len();
    let businesses: Vec<(BusinessData, Option<Location>)> = entries
        .into_iter()
        .filter_map(|value| serde_json::from_value::<RawBusiness>(value).ok())
        .filter_map(convert)
        .collect();

    if businesses.len() < total {
        tracing::warn!(
            strategy = strategy.label(),
            skipped = total - businesses.len(),
            "skipped malformed search entries"
        );
    }

    Ok(businesses)
}

/// Boundary normalization: empty strings become `None`, out-of-range
/// coordinates become an absent location, nameless entries are dropped.
fn convert(raw: RawBusiness) -> Option<(BusinessData, Option<Location>)> {
    let name = non_empty(raw.name)?;
    let location = match (raw.latitude, raw.longitude) {
        (Some(lat), Some(lng)) => Location::checked(lat, lng),
        _ => None,
    };

    Some((
        BusinessData {
            name,
            rating: raw.rating,
            user_rating_count: None,
            phone: non_empty(raw.phone),
            website: non_empty(raw.website),
            address: non_empty(raw.address),
            email: None,
            place_id: None,
        },
        location,
    ))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
