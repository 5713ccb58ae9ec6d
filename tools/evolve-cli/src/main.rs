//! # Evolve CLI
//!
//! Command-line client for the self-learning agents backend.
//!
//! - `evolve health` - reachability and service status
//! - `evolve dashboard [--json]` - aggregated overview
//! - `evolve agent|training|goal|anomaly|collab|prompt|evolution ...` - resource views and writes
//!
//! The backend address comes from `--api-url`, `EVOLVE_API_URL` or a `.env` file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use evolve_client::{ApiClient, ClientConfig, API_URL_ENV, DEFAULT_API_URL};
use evolve_dashboard::Actions;
use tracing::debug;

mod commands;
mod display;

use commands::{
    AgentCommand, AnomalyCommand, CollabCommand, EvolutionCommand, GoalCommand, PromptCommand,
    TrainingCommand,
};

#[derive(Parser)]
#[command(name = "evolve")]
#[command(about = "Evolve CLI - Self-learning agents dashboard and management")]
#[command(version = evolve_core::VERSION)]
#[command(propagate_version = true)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "EVOLVE_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the backend is reachable
    Health,
    /// Aggregated dashboard overview
    Dashboard {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Latest performance readings and system statistics
    Performance,
    /// Agent management
    Agent {
        #[command(subcommand)]
        action: AgentCommand,
    },
    /// Training sessions
    Training {
        #[command(subcommand)]
        action: TrainingCommand,
    },
    /// Evolution history and triggers
    Evolution {
        #[command(subcommand)]
        action: EvolutionCommand,
    },
    /// Agent goals
    Goal {
        #[command(subcommand)]
        action: GoalCommand,
    },
    /// Detected anomalies
    Anomaly {
        #[command(subcommand)]
        action: AnomalyCommand,
    },
    /// Multi-agent collaborations
    Collab {
        #[command(subcommand)]
        action: CollabCommand,
    },
    /// Prompt templates
    Prompt {
        #[command(subcommand)]
        action: PromptCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;
    debug!(build = evolve_core::BUILD_INFO, api_url = %cli.api_url, "Starting");

    let config = ClientConfig::new(&cli.api_url).context("Invalid --api-url")?;
    let client = ApiClient::new(config).context("Failed to create API client")?;
    let actions = Actions::new(client);

    match cli.command {
        Commands::Health => commands::overview::health(&actions).await,
        Commands::Dashboard { json } => commands::overview::dashboard(&actions, json).await,
        Commands::Performance => commands::overview::performance(&actions).await,
        Commands::Agent { action } => commands::agent::handle_command(action, &actions).await,
        Commands::Training { action } => {
            commands::training::handle_command(action, &actions).await
        }
        Commands::Evolution { action } => {
            commands::evolution::handle_command(action, &actions).await
        }
        Commands::Goal { action } => commands::goal::handle_command(action, &actions).await,
        Commands::Anomaly { action } => commands::anomaly::handle_command(action, &actions).await,
        Commands::Collab { action } => commands::collab::handle_command(action, &actions).await,
        Commands::Prompt { action } => commands::prompt::handle_command(action, &actions).await,
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    Ok(())
}
