//! Health, dashboard and performance views

use anyhow::{bail, Context, Result};
use colored::*;
use evolve_core::timestamp::Timestamp;
use evolve_core::MetricSeries;
use evolve_dashboard::{Actions, Dashboard, DashboardSnapshot};

use crate::display;

pub async fn health(actions: &Actions) -> Result<()> {
    let probe = actions.client().probe().await;
    display::section("Backend Health");
    display::labeled("URL", actions.client().config().base_url());

    if !probe.success {
        let reason = match (probe.status, probe.error) {
            (Some(status), _) => format!("HTTP {status}"),
            (None, Some(error)) => error,
            (None, None) => "unknown error".to_string(),
        };
        bail!("Backend unreachable: {reason}");
    }

    display::success("Backend reachable");
    match actions.client().health().await {
        Ok(health) => {
            display::kv("status", &health.status);
            if let Some(service) = &health.service {
                display::kv("service", service);
            }
            if let Some(version) = &health.version {
                display::kv("version", version);
            }
        }
        Err(e) => display::warning(&format!("Health payload unreadable: {e}")),
    }
    Ok(())
}

fn stamp(ts: Option<&Timestamp>) -> String {
    ts.map(|ts| ts.to_string()).unwrap_or_else(|| "-".to_string())
}

pub async fn dashboard(actions: &Actions, json: bool) -> Result<()> {
    let dashboard = Dashboard::new(actions.client().clone());
    dashboard.refresh().await.context("Dashboard refresh failed")?;
    let snapshot = dashboard.current()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&*snapshot)?);
        return Ok(());
    }

    print_snapshot(&snapshot);
    Ok(())
}

fn print_snapshot(snapshot: &DashboardSnapshot) {
    display::section(&format!("Evolve Dashboard ({})", snapshot.today));
    if snapshot.is_degraded() {
        display::warning(&format!(
            "{} source(s) failed to load, figures may be incomplete",
            snapshot.degraded_sources
        ));
    }

    let agents = snapshot.agents;
    display::labeled(
        "Agents",
        &format!(
            "{} total, {} active, {} paused, {} below target",
            agents.total, agents.active, agents.paused, agents.weak
        ),
    );
    display::labeled(
        "Training",
        &format!(
            "{} sessions, {} in progress",
            snapshot.sessions.total, snapshot.sessions.in_progress
        ),
    );
    let anomalies = snapshot.anomalies;
    display::labeled(
        "Anomalies",
        &format!(
            "{} open, {} investigating, {} resolved today",
            anomalies.open, anomalies.investigating, anomalies.resolved_today
        ),
    );
    display::labeled("Active goals", &snapshot.active_goals.to_string());
    display::reading("System health", snapshot.system_health, "%");
    for series in MetricSeries::ALL {
        display::reading(&series.to_string(), snapshot.readings.get(series), series.unit());
    }

    display::section("Top Agents");
    if snapshot.top_agents.is_empty() {
        display::info("No agents yet");
    }
    for agent in &snapshot.top_agents {
        println!(
            "  {:<28} {:>6.1}%  {}",
            agent.label(),
            agent.accuracy_pct(),
            display::agent_status(&agent.status)
        );
    }

    display::section("Recent Training");
    if snapshot.recent_sessions.is_empty() {
        display::info("No training sessions");
    }
    for session in &snapshot.recent_sessions {
        println!(
            "  {:<14} {:<16} {:<12} {}",
            session.id,
            session.agent.as_deref().unwrap_or("-"),
            session.status.label(),
            stamp(session.timestamp.as_ref()).bright_black()
        );
    }

    display::section("Recent Anomalies");
    if snapshot.recent_anomalies.is_empty() {
        display::info("No anomalies");
    }
    for anomaly in &snapshot.recent_anomalies {
        println!(
            "  {:<8} {:<32} {:<14} {}",
            display::severity(anomaly.severity),
            anomaly.headline(),
            anomaly.status.as_str(),
            stamp(anomaly.timestamp.as_ref()).bright_black()
        );
    }
}

pub async fn performance(actions: &Actions) -> Result<()> {
    let client = actions.client();
    let metrics = client
        .performance_metrics()
        .await
        .context("Failed to load performance metrics")?;

    display::section("Performance");
    for series in MetricSeries::ALL {
        let points = metrics.series(series).len();
        display::reading(&series.to_string(), metrics.latest(series), series.unit());
        display::kv("points", &points.to_string());
    }

    match client.system_performance().await {
        Ok(system) => {
            display::section("System");
            for (key, value) in &system {
                display::kv(key, &value.to_string());
            }
        }
        Err(e) => display::warning(&format!("System statistics unavailable: {e}")),
    }
    Ok(())
}
