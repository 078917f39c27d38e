//! CRM command handlers: the persisted prospect list.

use clap::Subcommand;
use prospector_core::{AppConfig, Prospect, UserStatus};
use prospector_store::ProspectStore;

/// Sub-commands available under `crm`.
#[derive(Debug, Subcommand)]
pub(crate) enum CrmCommands {
    /// Show saved prospects
    List {
        /// Sort order: "score" (AI score, descending) or "date" (newest first)
        #[arg(long, default_value = "score")]
        sort: String,
    },
    /// Set the status of a prospect (new, contacted, signed or ignored)
    Status { id: String, status: String },
    /// Delete a prospect
    Remove { id: String },
}

/// Dispatches a `crm` sub-command against the configured store.
///
/// # Errors
///
/// Returns an error when the store cannot be opened or written, or on an
/// unknown sort order / status value.
pub(crate) fn run(config: &AppConfig, command: &CrmCommands) -> anyhow::Result<()> {
    let store = ProspectStore::open(&config.store_path)?;
    match command {
        CrmCommands::List { sort } => run_list(&store, sort),
        CrmCommands::Status { id, status } => {
            let status: UserStatus = status
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            store.update_status(id, status)?;
            println!("status of {id} set to {status}");
            Ok(())
        }
        CrmCommands::Remove { id } => {
            store.remove(id)?;
            println!("prospect {id} removed");
            Ok(())
        }
    }
}

fn run_list(store: &ProspectStore, sort: &str) -> anyhow::Result<()> {
    let order = SortOrder::parse(sort)?;
    let prospects = sorted(store.list(), order);

    if prospects.is_empty() {
        println!("no prospects saved; run `prospector search ... --save` first");
        return Ok(());
    }

    println!(
        "{:<38}{:<28}{:<9}{:<11}OFFER",
        "ID", "NAME", "SCORE", "STATUS"
    );
    for p in &prospects {
        let score = p
            .ai_insight
            .as_ref()
            .map_or_else(|| "\u{2014}".to_string(), |i| format!("{}/100", i.score));
        let offer = p
            .ai_insight
            .as_ref()
            .map_or("", |i| i.suggested_offer.as_str());
        println!(
            "{:<38}{:<28}{:<9}{:<11}{}",
            p.id,
            &p.business_data.name,
            score,
            p.user_status,
            offer
        );
        let website = p.business_data.website.as_deref().unwrap_or("no site");
        let phone = p.business_data.phone.as_deref().unwrap_or("no phone");
        println!("{:<38}{website} \u{2022} {phone}", "");
    }
    println!("\n{} prospects", prospects.len());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortOrder {
    Score,
    Date,
}

impl SortOrder {
    fn parse(s: &str) -> anyhow::Result<Self> {
        match s {
            "score" => Ok(SortOrder::Score),
            "date" => Ok(SortOrder::Date),
            other => anyhow::bail!("unknown sort order '{other}' (expected score or date)"),
        }
    }
}

/// Sorts prospects for display: by AI score (insightless prospects count
/// as 0) or by creation date, both descending.
fn sorted(mut prospects: Vec<Prospect>, order: SortOrder) -> Vec<Prospect> {
    match order {
        SortOrder::Score => prospects.sort_by(|a, b| {
            let score = |p: &Prospect| p.ai_insight.as_ref().map_or(0.0, |i| i.score);
            score(b)
                .partial_cmp(&score(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortOrder::Date => prospects.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    prospects
}
