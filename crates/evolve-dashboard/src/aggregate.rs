//! One aggregation pass: fetch the six collections concurrently, tolerate any
//! subset failing, and derive the dashboard snapshot.

use crate::source::DashboardSource;
use crate::stats::{
    agent_counts, anomaly_counts, latest_readings, recent_anomalies, recent_sessions,
    session_counts, top_agents, AgentCounts, AnomalyCounts, LatestReadings, SessionCounts,
};
use chrono::NaiveDate;
use evolve_core::{
    Agent, Anomaly, EvolveError, Goal, GoalsSummary, PerformanceMetrics, Reading, Result,
    TrainingSession,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Length caps for the ranked lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardLimits {
    pub top_agents: usize,
    pub recent_sessions: usize,
    pub recent_anomalies: usize,
}

impl Default for DashboardLimits {
    fn default() -> Self {
        Self {
            top_agents: 5,
            recent_sessions: 5,
            recent_anomalies: 6,
        }
    }
}

/// Raw collections from one pass. A failed fetch leaves its slot empty.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub agents: Vec<Agent>,
    pub training_sessions: Vec<TrainingSession>,
    pub performance_metrics: Option<PerformanceMetrics>,
    pub goals_summary: Option<GoalsSummary>,
    pub goals: Vec<Goal>,
    pub anomalies: Vec<Anomaly>,
    /// Number of fetches that failed in this pass.
    pub failed: usize,
}

impl DashboardData {
    pub const SOURCES: usize = 6;

    pub fn all_failed(&self) -> bool {
        self.failed == Self::SOURCES
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub today: NaiveDate,
    pub agents: AgentCounts,
    pub sessions: SessionCounts,
    pub anomalies: AnomalyCounts,
    pub readings: LatestReadings,
    pub system_health: Reading,
    pub active_goals: u64,
    pub top_agents: Vec<Agent>,
    pub recent_sessions: Vec<TrainingSession>,
    pub recent_anomalies: Vec<Anomaly>,
    /// Sources that failed while this snapshot was built.
    pub degraded_sources: usize,
}

impl DashboardSnapshot {
    pub fn derive(data: &DashboardData, today: NaiveDate, limits: DashboardLimits) -> Self {
        let readings = latest_readings(data.performance_metrics.as_ref());
        Self {
            today,
            agents: agent_counts(&data.agents),
            sessions: session_counts(&data.training_sessions),
            anomalies: anomaly_counts(&data.anomalies, today),
            system_health: readings.system_health(),
            readings,
            active_goals: data
                .goals_summary
                .as_ref()
                .map_or(0, |summary| summary.active_goals),
            top_agents: top_agents(&data.agents, limits.top_agents),
            recent_sessions: recent_sessions(&data.training_sessions, limits.recent_sessions),
            recent_anomalies: recent_anomalies(&data.anomalies, limits.recent_anomalies),
            degraded_sources: data.failed,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded_sources > 0
    }
}

fn settle<T>(resource: &'static str, result: Result<T>, failed: &mut usize) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(resource, error = %e, "Dashboard fetch failed, using empty value");
            *failed += 1;
            None
        }
    }
}

/// Issues all six reads at once and waits for every one of them.
pub async fn fetch_all<S: DashboardSource + ?Sized>(source: &S) -> DashboardData {
    let (agents, sessions, metrics, summary, goals, anomalies) = tokio::join!(
        source.agents(),
        source.training_sessions(),
        source.performance_metrics(),
        source.goals_summary(),
        source.goals(),
        source.anomalies(),
    );

    let mut failed = 0;
    DashboardData {
        agents: settle("agents", agents, &mut failed).unwrap_or_default(),
        training_sessions: settle("training_sessions", sessions, &mut failed).unwrap_or_default(),
        performance_metrics: settle("performance_metrics", metrics, &mut failed),
        goals_summary: settle("goals_summary", summary, &mut failed),
        goals: settle("goals", goals, &mut failed).unwrap_or_default(),
        anomalies: settle("anomalies", anomalies, &mut failed).unwrap_or_default(),
        failed,
    }
}

/// Runs one full pass. Fails only when every source failed.
#[instrument(skip_all, fields(today = %today))]
pub async fn aggregate<S: DashboardSource + ?Sized>(
    source: &S,
    today: NaiveDate,
    limits: DashboardLimits,
) -> Result<DashboardSnapshot> {
    let started = Instant::now();
    let data = fetch_all(source).await;
    if data.all_failed() {
        warn!("Every dashboard source failed");
        return Err(EvolveError::BackendUnavailable);
    }

    let snapshot = DashboardSnapshot::derive(&data, today, limits);
    debug!(elapsed_ms = started.elapsed().as_millis() as u64, "Dashboard pass complete");
    info!(
        agents = snapshot.agents.total,
        sessions = snapshot.sessions.total,
        anomalies = snapshot.anomalies.total,
        degraded = snapshot.degraded_sources,
        "Dashboard snapshot built"
    );
    Ok(snapshot)
}
