use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use evolve_core::Anomaly;
use evolve_dashboard::Actions;

use crate::display;

#[derive(Subcommand)]
pub enum AnomalyCommand {
    /// List anomalies
    List {
        /// Include resolved anomalies
        #[arg(long)]
        all: bool,
    },
    /// Mark an anomaly resolved
    Resolve {
        #[arg(value_name = "ANOMALY_ID")]
        id: String,
    },
}

pub async fn handle_command(command: AnomalyCommand, actions: &Actions) -> Result<()> {
    match command {
        AnomalyCommand::List { all } => {
            let anomalies = actions
                .client()
                .anomalies()
                .await
                .context("Failed to load anomalies")?;
            print_anomalies(&anomalies, all);
        }
        AnomalyCommand::Resolve { id } => {
            let applied = actions.resolve_anomaly(&id).await?;
            display::success(&format!("Anomaly {id} resolved"));
            display::stale(applied.stale);
            print_anomalies(&applied.refreshed, false);
        }
    }
    Ok(())
}

fn print_anomalies(anomalies: &[Anomaly], include_resolved: bool) {
    let shown: Vec<&Anomaly> = anomalies
        .iter()
        .filter(|a| include_resolved || a.is_open())
        .collect();
    if shown.is_empty() {
        println!("{}", "No open anomalies".green());
        return;
    }

    println!("{:<12} {:<8} {:<14} {:<16} {}", "ID", "SEVERITY", "STATUS", "AGENT", "TITLE");
    for anomaly in shown {
        println!(
            "{:<12} {:<8} {:<14} {:<16} {}",
            anomaly.id,
            display::severity(anomaly.severity),
            anomaly.status.as_str(),
            anomaly.agent.as_deref().unwrap_or("-"),
            anomaly.headline()
        );
        if let Some(description) = anomaly.description.as_deref().filter(|d| !d.is_empty()) {
            println!("{:>13}{}", "", description.bright_black());
        }
    }
}
