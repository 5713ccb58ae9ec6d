//! Per-view derivations: labels, searches and filters.

use evolve_core::{Agent, Collaboration, Goal, Prompt, PromptCategory, Result};

/// `"{name} ({agent_type})"` for a known agent, else the raw id.
pub fn agent_label(agents: &[Agent], id: &str) -> String {
    agents
        .iter()
        .find(|agent| agent.id == id)
        .map(Agent::label)
        .unwrap_or_else(|| id.to_string())
}

fn matches_text(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Case-insensitive name search. An empty query matches everything.
pub fn search_agents<'a>(agents: &'a [Agent], query: &str) -> Vec<&'a Agent> {
    let needle = query.trim().to_lowercase();
    agents
        .iter()
        .filter(|agent| matches_text(&agent.name, &needle))
        .collect()
}

#[derive(Debug, Default)]
pub struct GoalPartition<'a> {
    pub active: Vec<&'a Goal>,
    pub completed: Vec<&'a Goal>,
}

pub fn partition_goals(goals: &[Goal]) -> GoalPartition<'_> {
    GoalPartition {
        active: goals.iter().filter(|goal| goal.is_active()).collect(),
        completed: goals.iter().filter(|goal| goal.is_completed()).collect(),
    }
}

/// `"all"` (or nothing) means no category filter.
pub fn parse_category_filter(raw: Option<&str>) -> Result<Option<PromptCategory>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

/// Matches `query` against name, description and content, then `category`.
pub fn filter_prompts<'a>(
    prompts: &'a [Prompt],
    query: &str,
    category: Option<PromptCategory>,
) -> Vec<&'a Prompt> {
    let needle = query.trim().to_lowercase();
    prompts
        .iter()
        .filter(|prompt| {
            matches_text(&prompt.name, &needle)
                || prompt
                    .description
                    .as_deref()
                    .is_some_and(|d| matches_text(d, &needle))
                || matches_text(&prompt.content, &needle)
        })
        .filter(|prompt| category.map_or(true, |c| prompt.category == c))
        .collect()
}

pub fn filter_collaborations<'a>(
    collaborations: &'a [Collaboration],
    query: &str,
) -> Vec<&'a Collaboration> {
    let needle = query.trim().to_lowercase();
    collaborations
        .iter()
        .filter(|c| matches_text(&c.name, &needle) || matches_text(&c.description, &needle))
        .collect()
}
