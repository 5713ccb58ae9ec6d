use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use evolve_core::StartTraining;
use evolve_dashboard::views::agent_label;
use evolve_dashboard::{Actions, TrainingBoard};

use crate::display;

#[derive(Subcommand)]
pub enum TrainingCommand {
    /// List training sessions
    List,
    /// Start training an agent
    Start {
        #[arg(value_name = "AGENT_ID")]
        agent_id: String,
        #[arg(long, default_value_t = 10)]
        epochs: u32,
    },
    /// Stop a running session
    Stop {
        #[arg(value_name = "SESSION_ID")]
        session_id: String,
    },
}

pub async fn handle_command(command: TrainingCommand, actions: &Actions) -> Result<()> {
    match command {
        TrainingCommand::List => {
            let board = actions
                .training_board()
                .await
                .context("Failed to load training sessions")?;
            print_board(&board);
        }
        TrainingCommand::Start { agent_id, epochs } => {
            let applied = actions
                .start_training(&StartTraining::new(agent_id, epochs))
                .await?;
            display::success(&format!(
                "Training started (session {})",
                applied.response.session_id.as_deref().unwrap_or("-").bold()
            ));
            display::stale(applied.stale);
            print_board(&applied.refreshed);
        }
        TrainingCommand::Stop { session_id } => {
            let applied = actions.stop_training(&session_id).await?;
            display::success(&format!("Session {session_id} stopped"));
            display::stale(applied.stale);
            print_board(&applied.refreshed);
        }
    }
    Ok(())
}

fn print_board(board: &TrainingBoard) {
    if board.sessions.is_empty() {
        println!("{}", "No training sessions".yellow());
        return;
    }

    println!("{:<16} {:<32} {:<12} {:>6}  {}", "SESSION", "AGENT", "STATUS", "EPOCHS", "STARTED");
    for session in &board.sessions {
        let agent = session
            .agent
            .as_deref()
            .map(|id| agent_label(&board.agents, id))
            .unwrap_or_else(|| "-".to_string());
        let status = session.status.label();
        println!(
            "{:<16} {:<32} {:<12} {:>6}  {}",
            session.id,
            agent,
            if session.is_in_progress() {
                status.bright_green()
            } else {
                status.normal()
            },
            session.duration,
            session
                .timestamp
                .as_ref()
                .map(|ts| ts.to_string())
                .unwrap_or_default()
                .bright_black()
        );
    }
}
