//! Pure derivations over fetched collections
//!
//! Nothing here touches the network; every function is a plain fold or sort
//! over what one aggregation pass fetched.

use chrono::NaiveDate;
use evolve_core::performance::latest_reading;
use evolve_core::timestamp::newest_first;
use evolve_core::{Agent, Anomaly, MetricSeries, PerformanceMetrics, Reading, TrainingSession};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCounts {
    pub total: usize,
    pub active: usize,
    pub paused: usize,
    pub weak: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounts {
    pub total: usize,
    pub in_progress: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyCounts {
    pub total: usize,
    pub open: usize,
    pub investigating: usize,
    pub resolved_today: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatestReadings {
    pub accuracy: Reading,
    pub latency: Reading,
    pub stability: Reading,
    pub efficiency: Reading,
}

impl LatestReadings {
    pub fn get(&self, series: MetricSeries) -> Reading {
        match series {
            MetricSeries::Accuracy => self.accuracy,
            MetricSeries::Latency => self.latency,
            MetricSeries::Stability => self.stability,
            MetricSeries::Efficiency => self.efficiency,
        }
    }

    /// Rounded latest accuracy, shown as overall system health.
    pub fn system_health(&self) -> Reading {
        self.accuracy.rounded()
    }
}

pub fn agent_counts(agents: &[Agent]) -> AgentCounts {
    let active = agents.iter().filter(|a| a.is_active()).count();
    AgentCounts {
        total: agents.len(),
        active,
        paused: agents.len() - active,
        weak: agents.iter().filter(|a| a.is_weak()).count(),
    }
}

pub fn session_counts(sessions: &[TrainingSession]) -> SessionCounts {
    SessionCounts {
        total: sessions.len(),
        in_progress: sessions.iter().filter(|s| s.is_in_progress()).count(),
    }
}

/// `today` is the caller's calendar day.
pub fn anomaly_counts(anomalies: &[Anomaly], today: NaiveDate) -> AnomalyCounts {
    AnomalyCounts {
        total: anomalies.len(),
        open: anomalies.iter().filter(|a| a.is_open()).count(),
        investigating: anomalies.iter().filter(|a| a.is_investigating()).count(),
        resolved_today: anomalies.iter().filter(|a| a.resolved_on(today)).count(),
    }
}

pub fn latest_readings(metrics: Option<&PerformanceMetrics>) -> LatestReadings {
    LatestReadings {
        accuracy: latest_reading(metrics, MetricSeries::Accuracy),
        latency: latest_reading(metrics, MetricSeries::Latency),
        stability: latest_reading(metrics, MetricSeries::Stability),
        efficiency: latest_reading(metrics, MetricSeries::Efficiency),
    }
}

/// Highest accuracy first; equal accuracies keep their input order.
pub fn top_agents(agents: &[Agent], limit: usize) -> Vec<Agent> {
    let mut ranked = agents.to_vec();
    ranked.sort_by(|a, b| b.accuracy.total_cmp(&a.accuracy));
    ranked.truncate(limit);
    ranked
}

/// Newest first; ties and undated sessions keep their input order.
pub fn recent_sessions(sessions: &[TrainingSession], limit: usize) -> Vec<TrainingSession> {
    let mut recent = sessions.to_vec();
    recent.sort_by(|a, b| newest_first(a.timestamp.as_ref(), b.timestamp.as_ref()));
    recent.truncate(limit);
    recent
}

pub fn recent_anomalies(anomalies: &[Anomaly], limit: usize) -> Vec<Anomaly> {
    let mut recent = anomalies.to_vec();
    recent.sort_by(|a, b| newest_first(a.timestamp.as_ref(), b.timestamp.as_ref()));
    recent.truncate(limit);
    recent
}
