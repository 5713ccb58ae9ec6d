use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use evolve_core::{Agent, AgentCategory, AgentStatus, AgentUpdate, NewAgent, TrainingFeedback};
use evolve_dashboard::views::search_agents;
use evolve_dashboard::Actions;

use crate::display;

#[derive(Subcommand)]
pub enum AgentCommand {
    /// List agents
    List {
        /// Only agents whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Show agent details
    Show {
        #[arg(value_name = "AGENT_ID")]
        id: String,
    },
    /// Show an agent's conversation history
    History {
        #[arg(value_name = "AGENT_ID")]
        id: String,
    },
    /// Create a new agent
    Create {
        name: String,
        /// Classification, Generation, Analysis, Extraction, Orchestrator or Tooling
        #[arg(long = "type", default_value = "Analysis")]
        agent_type: AgentCategory,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Update an agent's name, type or description
    Update {
        #[arg(value_name = "AGENT_ID")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        agent_type: Option<AgentCategory>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Mark an agent active
    Resume {
        #[arg(value_name = "AGENT_ID")]
        id: String,
    },
    /// Mark an agent paused
    Pause {
        #[arg(value_name = "AGENT_ID")]
        id: String,
    },
    /// Flip an agent between active and paused
    Toggle {
        #[arg(value_name = "AGENT_ID")]
        id: String,
    },
    /// Delete an agent
    Delete {
        #[arg(value_name = "AGENT_ID")]
        id: String,
    },
    /// Send a message to an agent
    Interact {
        #[arg(value_name = "AGENT_ID")]
        id: String,
        input: String,
    },
    /// Rate an agent's answer to an input
    Feedback {
        #[arg(value_name = "AGENT_ID")]
        id: String,
        input: String,
        /// Mark the answer as wrong (default: correct)
        #[arg(long)]
        incorrect: bool,
    },
}

pub async fn handle_command(command: AgentCommand, actions: &Actions) -> Result<()> {
    match command {
        AgentCommand::List { search } => list_agents(actions, search.as_deref()).await,
        AgentCommand::Show { id } => show_agent(actions, &id).await,
        AgentCommand::History { id } => show_history(actions, &id).await,
        AgentCommand::Create {
            name,
            agent_type,
            description,
        } => {
            let agent = NewAgent::new(name, agent_type).with_description(description);
            let applied = actions.create_agent(&agent).await?;
            display::success(&format!("Agent {} created", agent.name.bold()));
            display::stale(applied.stale);
            print_roster(&applied.refreshed);
            Ok(())
        }
        AgentCommand::Update {
            id,
            name,
            agent_type,
            description,
        } => {
            let update = AgentUpdate {
                name,
                agent_type,
                description,
                status: None,
            };
            let applied = actions.update_agent(&id, &update).await?;
            display::success(&format!("Agent {id} updated"));
            display::stale(applied.stale);
            print_roster(&applied.refreshed);
            Ok(())
        }
        AgentCommand::Resume { id } => set_status(actions, &id, AgentStatus::Active).await,
        AgentCommand::Pause { id } => set_status(actions, &id, AgentStatus::Paused).await,
        AgentCommand::Toggle { id } => {
            let agent = actions
                .client()
                .agent(&id)
                .await
                .with_context(|| format!("Failed to load agent {id}"))?;
            let applied = actions.toggle_agent(&agent).await?;
            display::success(&format!(
                "Agent {} is now {}",
                agent.name,
                display::agent_status(&agent.status.toggled())
            ));
            display::stale(applied.stale);
            print_roster(&applied.refreshed);
            Ok(())
        }
        AgentCommand::Delete { id } => {
            let applied = actions.delete_agent(&id).await?;
            display::success(&format!("Agent {id} deleted"));
            display::stale(applied.stale);
            print_roster(&applied.refreshed);
            Ok(())
        }
        AgentCommand::Interact { id, input } => {
            let applied = actions.interact(&id, &input).await?;
            let reply = applied.response.response.as_deref().unwrap_or("(no response)");
            println!("{} {}", "agent>".bright_cyan().bold(), reply);
            display::stale(applied.stale);
            display::info(&format!(
                "{} messages in history",
                applied.refreshed.history.len()
            ));
            Ok(())
        }
        AgentCommand::Feedback {
            id,
            input,
            incorrect,
        } => {
            let feedback = TrainingFeedback::new(id, input, !incorrect);
            actions.submit_feedback(&feedback).await?;
            let verdict = if incorrect { "incorrect" } else { "correct" };
            display::success(&format!("Feedback recorded as {verdict}"));
            Ok(())
        }
    }
}

async fn set_status(actions: &Actions, id: &str, status: AgentStatus) -> Result<()> {
    let applied = actions.set_agent_status(id, status.clone()).await?;
    display::success(&format!(
        "Agent {id} is now {}",
        display::agent_status(&status)
    ));
    display::stale(applied.stale);
    print_roster(&applied.refreshed);
    Ok(())
}

fn print_roster(agents: &[Agent]) {
    let refs: Vec<&Agent> = agents.iter().collect();
    print_agents(&refs);
}

fn print_agents(agents: &[&Agent]) {
    if agents.is_empty() {
        println!("{}", "No agents found".yellow());
        return;
    }

    println!("{} agents found:", agents.len());
    println!(
        "{:<24} {:<24} {:<14} {:<8} {:>6} {:>8}",
        "ID", "NAME", "TYPE", "STATUS", "TASKS", "ACCURACY"
    );
    for agent in agents {
        let accuracy = format!("{:.1}%", agent.accuracy_pct());
        println!(
            "{:<24} {:<24} {:<14} {:<8} {:>6} {:>8}",
            agent.id,
            agent.name.bold(),
            agent.agent_type,
            display::agent_status(&agent.status),
            agent.tasks,
            if agent.is_weak() {
                accuracy.yellow()
            } else {
                accuracy.normal()
            }
        );
    }
}

async fn list_agents(actions: &Actions, search: Option<&str>) -> Result<()> {
    let agents = actions
        .client()
        .agents()
        .await
        .context("Failed to load agents")?;
    let matches = search_agents(&agents, search.unwrap_or_default());
    print_agents(&matches);
    Ok(())
}

async fn show_agent(actions: &Actions, id: &str) -> Result<()> {
    let agent = actions
        .client()
        .agent(id)
        .await
        .with_context(|| format!("Failed to load agent {id}"))?;

    display::section(&agent.label());
    display::labeled("ID", &agent.id);
    display::labeled("Status", agent.status.as_str());
    display::labeled("Tasks", &agent.tasks.to_string());
    display::labeled("Accuracy", &format!("{:.1}%", agent.accuracy_pct()));
    if let Some(last_active) = &agent.last_active {
        display::labeled("Last active", last_active.as_str());
    }
    if let Some(description) = agent.description.as_deref().filter(|d| !d.is_empty()) {
        display::labeled("Description", description);
    }
    Ok(())
}

async fn show_history(actions: &Actions, id: &str) -> Result<()> {
    let history = actions
        .client()
        .agent_history(id)
        .await
        .with_context(|| format!("Failed to load history for {id}"))?;

    if history.is_empty() {
        display::info("No conversation yet");
    }
    for entry in history {
        let role = if entry.role == "user" {
            entry.role.bright_blue()
        } else {
            entry.role.bright_cyan()
        };
        println!("{:>8}> {}", role, entry.content);
    }
    Ok(())
}
