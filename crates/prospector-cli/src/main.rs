mod crm;
mod explore;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prospector")]
#[command(about = "AI-assisted local business prospecting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search businesses in a locality and explore the results
    Search(explore::SearchArgs),
    /// Manage the saved prospect list
    Crm {
        #[command(subcommand)]
        command: crm::CrmCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = prospector_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search(args) => explore::run_search(&config, args).await,
        Commands::Crm { command } => crm::run(&config, &command),
    }
}
