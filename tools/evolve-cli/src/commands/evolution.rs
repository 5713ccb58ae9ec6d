use anyhow::{Context, Result};
use clap::Subcommand;
use evolve_core::evolution::latest_generation;
use evolve_core::EvolutionEvent;
use evolve_dashboard::Actions;

use crate::display;

#[derive(Subcommand)]
pub enum EvolutionCommand {
    /// Show evolution history
    History,
    /// Start an evolution round
    Trigger {
        /// Evolve a single agent instead of the whole population
        #[arg(long)]
        agent: Option<String>,
    },
}

pub async fn handle_command(command: EvolutionCommand, actions: &Actions) -> Result<()> {
    match command {
        EvolutionCommand::History => {
            let history = actions
                .client()
                .evolution_history()
                .await
                .context("Failed to load evolution history")?;
            print_history(&history);
        }
        EvolutionCommand::Trigger { agent } => {
            let applied = actions.trigger_evolution(agent.as_deref()).await?;
            display::success("Evolution triggered");
            if let Some(count) = applied.response.agents_count {
                display::kv("agents", &count.to_string());
            }
            if let Some(duration) = &applied.response.estimated_duration {
                display::kv("estimated duration", duration);
            }
            display::stale(applied.stale);
            print_history(&applied.refreshed);
        }
    }
    Ok(())
}

fn print_history(history: &[EvolutionEvent]) {
    let Some(latest) = latest_generation(history) else {
        display::info("No evolution history yet");
        return;
    };

    display::section(&format!("Generation {}", latest.generation));
    display::labeled("Accuracy", &format!("{:.1}%", latest.accuracy));
    display::labeled("Efficiency", &format!("{:.1}%", latest.efficiency));
    display::labeled("Agents", &latest.agents.to_string());

    println!();
    println!("{:>10} {:>10} {:>10} {:>8}", "GEN", "ACCURACY", "EFFICIENCY", "AGENTS");
    for event in history {
        println!(
            "{:>10} {:>9.1}% {:>9.1}% {:>8}",
            event.generation, event.accuracy, event.efficiency, event.agents
        );
    }
}
