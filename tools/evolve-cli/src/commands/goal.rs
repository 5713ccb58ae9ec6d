use anyhow::Result;
use clap::Subcommand;
use colored::*;
use evolve_core::goal::DEFAULT_DAYS_UNTIL_TARGET;
use evolve_core::{Goal, NewGoal, Priority};
use evolve_dashboard::views::{agent_label, partition_goals};
use evolve_dashboard::{Actions, GoalBoard};

use crate::display;

#[derive(Subcommand)]
pub enum GoalCommand {
    /// List goals with the summary
    List,
    /// Create a goal for an agent
    Create {
        #[arg(value_name = "AGENT_ID")]
        agent_id: String,
        /// Goal title
        name: String,
        #[arg(long, default_value = "accuracy")]
        metric: String,
        #[arg(long)]
        target: f64,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = DEFAULT_DAYS_UNTIL_TARGET)]
        days: u32,
    },
    /// Record the current value of a goal's metric
    Progress {
        #[arg(value_name = "GOAL_ID")]
        id: String,
        value: f64,
    },
    /// Delete a goal
    Delete {
        #[arg(value_name = "GOAL_ID")]
        id: String,
    },
}

pub async fn handle_command(command: GoalCommand, actions: &Actions) -> Result<()> {
    match command {
        GoalCommand::List => print_board(&actions.goal_board().await),
        GoalCommand::Create {
            agent_id,
            name,
            metric,
            target,
            priority,
            description,
            days,
        } => {
            let goal = NewGoal::new(agent_id, name, metric, target, priority)
                .with_description(description)
                .with_days_until_target(days);
            let applied = actions.create_goal(&goal).await?;
            display::success(&format!(
                "Goal {} created with {} priority",
                goal.goal_name.bold(),
                priority
            ));
            display::stale(applied.stale);
            print_board(&applied.refreshed);
        }
        GoalCommand::Progress { id, value } => {
            let applied = actions.update_goal_progress(&id, value).await?;
            display::success(&format!("Progress for goal {id} set to {value}"));
            display::stale(applied.stale);
            print_board(&applied.refreshed);
        }
        GoalCommand::Delete { id } => {
            let applied = actions.delete_goal(&id).await?;
            display::success(&format!("Goal {id} deleted"));
            display::stale(applied.stale);
            print_board(&applied.refreshed);
        }
    }
    Ok(())
}

fn print_board(board: &GoalBoard) {
    display::section("Goals");
    match &board.summary {
        Some(summary) => {
            display::labeled(
                "Summary",
                &format!(
                    "{} active, {} completed, {} total",
                    summary.active_goals, summary.completed_goals, summary.total_goals
                ),
            );
            display::labeled("Average progress", &display::progress_bar(summary.average_progress));
        }
        None => display::warning("Goal summary unavailable"),
    }

    let partition = partition_goals(&board.goals);
    print_goals("Active", &partition.active, &board.agents);
    print_goals("Completed", &partition.completed, &board.agents);
}

fn print_goals(title: &str, goals: &[&Goal], agents: &[evolve_core::Agent]) {
    println!();
    println!(" {} ({})", title.bright_white().bold(), goals.len());
    for goal in goals {
        let priority = match goal.priority_label() {
            Priority::High => "high".bright_red(),
            Priority::Medium => "medium".yellow(),
            Priority::Low => "low".bright_blue(),
        };
        let agent = goal
            .agent_id
            .as_deref()
            .map(|id| agent_label(agents, id))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<10} {:<28} {:<8} {}",
            goal.id,
            goal.goal_name.bold(),
            priority,
            display::progress_bar(goal.progress())
        );
        println!(
            "{:>13}{} {} / {} {}",
            "",
            agent.bright_black(),
            goal.current_value,
            goal.target_value,
            goal.metric_name.bright_black()
        );
    }
}
