//! The explore flow: search a locality, score and filter the candidates,
//! optionally enrich/analyze them, then print, export or save.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Args;
use futures::stream::{self, StreamExt};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use prospector_core::{AiInsight, AppConfig, Prospect, SearchResult};
use prospector_engine::{
    aggregate, export, filter::Filters, heuristic::HeuristicScore, EnrichmentTracker,
    SearchGeneration,
};
use prospector_gemini::{analyze, enrich, search, GeminiClient, GeminiConfig};
use prospector_store::ProspectStore;

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Trade or keyword to search for (e.g. "boulangerie")
    query: String,
    /// Locality to search in (e.g. "Lyon")
    #[arg(long)]
    city: String,
    /// Keep only businesses rated at most this value
    #[arg(long)]
    max_rating: Option<f64>,
    /// Keep only businesses without a website
    #[arg(long)]
    no_website_only: bool,
    /// Keep only businesses with a local score of at least this value (0-10)
    #[arg(long)]
    min_score: Option<f64>,
    /// Keep at most this many results
    #[arg(long)]
    limit: Option<usize>,
    /// Discover a public contact email for each kept result
    #[arg(long)]
    enrich: bool,
    /// Run a deep AI analysis on each kept result
    #[arg(long)]
    analyze: bool,
    /// Write the kept results to a CSV file (a directory gets a generated
    /// file name embedding the query and city)
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,
    /// Save every kept result to the CRM
    #[arg(long)]
    save: bool,
}

/// Runs the full explore pipeline for one search.
///
/// # Errors
///
/// Returns an error on invalid input, a missing API key, or a failed
/// export/save. Provider failures inside the pipeline degrade to warnings.
pub(crate) async fn run_search(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let query = args.query.trim().to_string();
    let city = args.city.trim().to_string();
    if query.is_empty() || city.is_empty() {
        anyhow::bail!("query and --city must not be empty");
    }

    let Some(api_key) = config.gemini_api_key.as_deref() else {
        anyhow::bail!("GEMINI_API_KEY is not set; the search command needs it");
    };
    let client = build_client(config, api_key)?;

    let generation = SearchGeneration::new();
    let this_search = generation.begin();

    println!("searching \"{query}\" in {city}...");
    let outcomes = search::search_all(&client, &query, &city).await;

    // A batch from a superseded search must not clobber newer results.
    if !generation.is_current(this_search) {
        tracing::info!("search superseded before results arrived, discarding");
        return Ok(());
    }

    let mut batches = Vec::new();
    let mut failed_strategies = 0usize;
    for (strategy, outcome) in outcomes {
        match outcome {
            Ok(batch) => {
                tracing::debug!(
                    strategy = strategy.label(),
                    count = batch.len(),
                    "search strategy completed"
                );
                batches.push(batch);
            }
            Err(e) => {
                failed_strategies += 1;
                tracing::warn!(
                    strategy = strategy.label(),
                    error = %e,
                    "search strategy failed"
                );
            }
        }
    }

    if failed_strategies == search::SearchStrategy::ALL.len() {
        println!("all search strategies failed — check your network, API key or quota");
        return Ok(());
    }

    let mut results = aggregate::aggregate(batches);
    if let Some(limit) = args.limit {
        results.truncate(limit);
    }
    let scores = aggregate::attach_scores(&results);

    let filters = Filters {
        max_rating: args.max_rating,
        no_website_only: args.no_website_only,
        min_score: args.min_score,
    };
    let mut results = filters.apply(&results, &scores);

    if results.is_empty() {
        println!("no results for \"{query}\" in {city}");
        return Ok(());
    }

    if args.enrich {
        let emails = enrich_all(config, &client, &results).await;
        for result in &mut results {
            if let Some(email) = emails.get(&result.source_id) {
                result.business_data.email = Some(email.clone());
            }
        }
    }

    let mut insights: HashMap<String, AiInsight> = HashMap::new();
    if args.analyze {
        for result in &results {
            match analyze::analyze(&client, &result.business_data).await {
                Ok(insight) => {
                    insights.insert(result.source_id.clone(), insight);
                }
                Err(e) => {
                    tracing::warn!(business = %result.business_data.name, error = %e, "analysis failed");
                    println!("analysis failed for {}: {e}", result.business_data.name);
                }
            }
        }
    }

    print_results(&results, &scores, &insights);
    print_map_handoff(config, &results);

    if let Some(path) = args.export {
        let path = resolve_export_path(&path, &query, &city);
        std::fs::write(&path, export::to_csv(&results, &scores))?;
        println!("exported {} results to {}", results.len(), path.display());
    }

    if args.save {
        let store = ProspectStore::open(&config.store_path)?;
        let mut saved = 0usize;
        for result in &results {
            let insight = insights.get(&result.source_id).cloned().or_else(|| {
                scores
                    .get(&result.source_id)
                    .cloned()
                    .map(HeuristicScore::into_insight)
            });
            let prospect = Prospect::new(
                result.business_data.clone(),
                result.location,
                insight,
            );
            store.upsert(&prospect)?;
            saved += 1;
        }
        println!("saved {saved} prospects to the CRM");
    }

    Ok(())
}

fn build_client(config: &AppConfig, api_key: &str) -> anyhow::Result<GeminiClient> {
    let gemini_config = GeminiConfig {
        api_key: api_key.to_string(),
        base_url: config.gemini_base_url.clone(),
        search_model: config.search_model.clone(),
        analysis_model: config.analysis_model.clone(),
        timeout_secs: config.request_timeout_secs,
        user_agent: config.user_agent.clone(),
    };
    Ok(GeminiClient::new(&gemini_config)?)
}

/// Discovers emails for all results with bounded concurrency. Failures
/// degrade to "not found"; the tracker refuses duplicate in-flight
/// requests for the same result.
async fn enrich_all(
    config: &AppConfig,
    client: &GeminiClient,
    results: &[SearchResult],
) -> HashMap<String, String> {
    let tracker = EnrichmentTracker::new();
    let tracker = &tracker;

    stream::iter(results.iter())
        .map(|result| async move {
            if !tracker.begin(&result.source_id) {
                return None;
            }
            let outcome = enrich::find_email(client, &result.business_data).await;
            tracker.finish(&result.source_id);
            match outcome {
                Ok(Some(email)) => Some((result.source_id.clone(), email)),
                Ok(None) => None,
                Err(e) => {
                    tracing::warn!(
                        business = %result.business_data.name,
                        error = %e,
                        "email enrichment failed"
                    );
                    None
                }
            }
        })
        .buffer_unordered(config.enrich_concurrency)
        .filter_map(|outcome| async move { outcome })
        .collect()
        .await
}

fn print_results(
    results: &[SearchResult],
    scores: &HashMap<String, HeuristicScore>,
    insights: &HashMap<String, AiInsight>,
) {
    println!();
    println!(
        "{:<32}{:<8}{:<26}{:<8}{:<8}OFFER",
        "NAME", "RATING", "WEBSITE", "SCORE", "AI"
    );
    for result in results {
        let b = &result.business_data;
        let rating = b
            .rating
            .map_or_else(|| "\u{2014}".to_string(), |r| format!("{r:.1}"));
        let website = b.website.as_deref().unwrap_or("no site");
        let score = scores
            .get(&result.source_id)
            .map_or_else(String::new, |s| format!("{}/10", s.score));
        let (ai, offer) = insights.get(&result.source_id).map_or_else(
            || {
                let offer = scores
                    .get(&result.source_id)
                    .map_or_else(String::new, |s| s.suggested_offer.clone());
                ("\u{2014}".to_string(), offer)
            },
            |i| (format!("{}/100", i.score), i.suggested_offer.clone()),
        );
        println!(
            "{:<32}{:<8}{:<26}{:<8}{:<8}{}",
            truncate(&b.name, 30),
            rating,
            truncate(website, 24),
            score,
            ai,
            offer
        );
        if let Some(email) = &b.email {
            println!("    email: {email}");
        }
    }
    println!();
}

/// The map hand-off: with a Maps key each result gets a live embed URL;
/// without one, a plain coordinate listing stands in.
fn print_map_handoff(config: &AppConfig, results: &[SearchResult]) {
    match config.maps_api_key.as_deref() {
        Some(key) => {
            for result in results {
                println!(
                    "map: {}",
                    maps_embed_url(key, &result.business_data.name, result.business_data.address.as_deref())
                );
            }
        }
        None => {
            for result in results {
                if let Some(location) = result.location {
                    println!(
                        "{}: {:.4}, {:.4}",
                        result.business_data.name, location.lat, location.lng
                    );
                }
            }
        }
    }
}

fn maps_embed_url(key: &str, name: &str, address: Option<&str>) -> String {
    let query = match address {
        Some(address) => format!("{name} {address}"),
        None => name.to_string(),
    };
    format!(
        "https://www.google.com/maps/embed/v1/place?key={key}&q={}",
        utf8_percent_encode(&query, NON_ALPHANUMERIC)
    )
}

fn resolve_export_path(path: &Path, query: &str, city: &str) -> PathBuf {
    if path.is_dir() {
        path.join(export::export_filename(query, city))
    } else {
        path.to_path_buf()
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}\u{2026}")
    }
}
