use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use evolve_core::{Collaboration, NewCollaboration};
use evolve_dashboard::views::filter_collaborations;
use evolve_dashboard::Actions;

use crate::display;

#[derive(Subcommand)]
pub enum CollabCommand {
    /// List collaborations
    List {
        /// Only collaborations whose name or description contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Create a collaboration between agents
    Create {
        name: String,
        /// Comma-separated agent ids
        #[arg(long)]
        members: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

pub async fn handle_command(command: CollabCommand, actions: &Actions) -> Result<()> {
    match command {
        CollabCommand::List { search } => {
            let collaborations = actions
                .client()
                .collaborations()
                .await
                .context("Failed to load collaborations")?;
            let shown = filter_collaborations(&collaborations, search.as_deref().unwrap_or_default());
            print_collaborations(&shown);
        }
        CollabCommand::Create {
            name,
            members,
            description,
        } => {
            let request = NewCollaboration::from_member_list(name, &members, description);
            let applied = actions.create_collaboration(&request).await?;
            display::success(&format!(
                "Collaboration {} created with {} agents",
                applied.response.id.as_deref().unwrap_or("-").bold(),
                request.agent_ids.len()
            ));
            display::stale(applied.stale);
            let all: Vec<&Collaboration> = applied.refreshed.iter().collect();
            print_collaborations(&all);
        }
    }
    Ok(())
}

fn print_collaborations(collaborations: &[&Collaboration]) {
    if collaborations.is_empty() {
        println!("{}", "No collaborations found".yellow());
        return;
    }

    for collaboration in collaborations {
        println!(
            "  {} {} [{}]",
            collaboration.name.bold(),
            collaboration.id.bright_black(),
            collaboration.status.as_deref().unwrap_or("active")
        );
        display::kv("agents", &collaboration.agents.join(", "));
        display::kv("tasks", &collaboration.tasks.to_string());
        display::kv("efficiency", &format!("{:.1}%", collaboration.efficiency));
        if !collaboration.description.is_empty() {
            display::kv("description", &collaboration.description);
        }
    }
}
