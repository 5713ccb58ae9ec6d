//! Display utilities for the CLI

use colored::*;
use evolve_core::{AgentStatus, Reading, Severity};

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// Print a success message
pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("  {} {}", "→".bright_blue(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message.yellow());
}

/// Warn that a write landed but the data shown after it could not be reloaded
pub fn stale(stale: bool) {
    if stale {
        warning("Change saved, but the refreshed data could not be loaded");
    }
}

/// Print a labeled value
pub fn labeled(label: &str, value: &str) {
    println!("  {}: {}", label.bright_white(), value.bright_cyan());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("      {}: {}", key, value.bright_cyan());
}

/// Reading with its unit; placeholders are dimmed and marked.
pub fn reading(label: &str, reading: Reading, unit: &str) {
    let value = format!("{:.1}{}", reading.value, unit);
    if reading.placeholder {
        println!(
            "  {}: {} {}",
            label.bright_white(),
            value.bright_black(),
            "(no data)".bright_black()
        );
    } else {
        labeled(label, &value);
    }
}

pub fn agent_status(status: &AgentStatus) -> ColoredString {
    if status.is_active() {
        status.as_str().bright_green()
    } else {
        status.as_str().yellow()
    }
}

pub fn severity(severity: Severity) -> ColoredString {
    let label = severity.to_string();
    match severity {
        Severity::High => label.bright_red(),
        Severity::Medium => label.yellow(),
        Severity::Low => label.bright_blue(),
        Severity::Unknown => label.bright_black(),
    }
}

/// Ten-cell progress bar for a percentage.
pub fn progress_bar(pct: f64) -> String {
    let filled = (pct.clamp(0.0, 100.0) / 10.0).round() as usize;
    format!("[{}{}] {:>5.1}%", "█".repeat(filled), "░".repeat(10 - filled), pct)
}

/// Pretty JSON for responses the CLI does not interpret.
pub fn json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}
