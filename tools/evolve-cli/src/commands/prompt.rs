use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use colored::*;
use evolve_core::{Prompt, PromptCategory, PromptDraft};
use evolve_dashboard::views::{filter_prompts, parse_category_filter};
use evolve_dashboard::Actions;

use crate::display;

#[derive(Subcommand)]
pub enum PromptCommand {
    /// List prompt templates
    List {
        #[arg(long)]
        search: Option<String>,
        /// Category name, or "all"
        #[arg(long)]
        category: Option<String>,
    },
    /// Create a prompt template
    Create {
        name: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value = "analysis")]
        category: PromptCategory,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a prompt template; omitted fields keep their value
    Update {
        #[arg(value_name = "PROMPT_ID")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<PromptCategory>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a prompt template
    Delete {
        #[arg(value_name = "PROMPT_ID")]
        id: String,
    },
    /// Show starter texts for a category
    Suggest {
        #[arg(default_value = "analysis")]
        category: PromptCategory,
    },
}

pub async fn handle_command(command: PromptCommand, actions: &Actions) -> Result<()> {
    match command {
        PromptCommand::List { search, category } => {
            let category = parse_category_filter(category.as_deref())?;
            let prompts = actions
                .client()
                .prompts()
                .await
                .context("Failed to load prompts")?;
            let shown = filter_prompts(&prompts, search.as_deref().unwrap_or_default(), category);
            print_prompts(&shown);
        }
        PromptCommand::Create {
            name,
            content,
            category,
            description,
        } => {
            let draft = PromptDraft {
                name,
                content,
                category,
                description,
            };
            let applied = actions.create_prompt(&draft).await?;
            display::success(&format!("Prompt {} created", draft.name.bold()));
            display::stale(applied.stale);
            print_all(&applied.refreshed);
        }
        PromptCommand::Update {
            id,
            name,
            content,
            category,
            description,
        } => {
            let prompts = actions
                .client()
                .prompts()
                .await
                .context("Failed to load prompts")?;
            let existing = prompts
                .iter()
                .find(|p| p.id == id)
                .ok_or_else(|| anyhow!("Prompt {id} not found"))?;

            let mut draft = PromptDraft::from(existing);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(content) = content {
                draft.content = content;
            }
            if let Some(category) = category {
                draft.category = category;
            }
            if let Some(description) = description {
                draft.description = description;
            }

            let applied = actions.update_prompt(&id, &draft).await?;
            display::success(&format!("Prompt {id} updated"));
            display::stale(applied.stale);
            print_all(&applied.refreshed);
        }
        PromptCommand::Delete { id } => {
            let applied = actions.delete_prompt(&id).await?;
            display::success(&format!("Prompt {id} deleted"));
            display::stale(applied.stale);
            print_all(&applied.refreshed);
        }
        PromptCommand::Suggest { category } => {
            display::section(&format!("{category} prompts"));
            for suggestion in category.suggestions() {
                display::info(suggestion);
            }
        }
    }
    Ok(())
}

fn print_all(prompts: &[Prompt]) {
    let all: Vec<&Prompt> = prompts.iter().collect();
    print_prompts(&all);
}

fn print_prompts(prompts: &[&Prompt]) {
    if prompts.is_empty() {
        println!("{}", "No prompts found".yellow());
        return;
    }

    for prompt in prompts {
        println!(
            "  {} {} [{}]",
            prompt.name.bold(),
            prompt.id.bright_black(),
            prompt.category
        );
        if let Some(description) = prompt.description.as_deref().filter(|d| !d.is_empty()) {
            display::kv("description", description);
        }
        display::kv("content", &prompt.content);
    }
}
