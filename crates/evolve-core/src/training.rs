//! Training session types

use crate::agent::AgentId;
use crate::de::null_as_default;
use crate::error::{EvolveError, Result};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEARNING_RATE: f64 = 0.001;
pub const DEFAULT_BATCH_SIZE: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }

    /// Display form, e.g. `in progress`.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSession {
    pub id: String,
    #[serde(default, alias = "agent_id")]
    pub agent: Option<AgentId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SessionStatus,
    /// Epoch count.
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: u32,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

impl TrainingSession {
    pub fn is_in_progress(&self) -> bool {
        self.status == SessionStatus::InProgress
    }
}

/// Body of `POST /training/start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartTraining {
    pub agent_id: AgentId,
    pub epochs: u32,
    pub learning_rate: f64,
    pub batch_size: u32,
}

impl StartTraining {
    pub fn new(agent_id: impl Into<AgentId>, epochs: u32) -> Self {
        Self {
            agent_id: agent_id.into(),
            epochs,
            learning_rate: DEFAULT_LEARNING_RATE,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.agent_id.trim().is_empty() {
            return Err(EvolveError::validation(
                "agent_id",
                "please select an agent to train",
            ));
        }
        if self.epochs == 0 {
            return Err(EvolveError::validation(
                "epochs",
                "epochs must be a positive number",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingMetrics {
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response of `POST /training/start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingStarted {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub agent_id: Option<AgentId>,
    #[serde(default)]
    pub training_metrics: Option<TrainingMetrics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_status_wire_names() {
        let session: TrainingSession = serde_json::from_value(serde_json::json!({
            "id": "s-1",
            "agent": "a-1",
            "status": "in_progress",
            "duration": 10,
            "timestamp": "2025-03-14T09:00:00"
        }))
        .unwrap();

        assert!(session.is_in_progress());
        assert_eq!(session.status.label(), "in progress");
        assert_eq!(session.duration, 10);
    }

    #[test]
    fn test_unknown_session_status_decodes() {
        let status: SessionStatus = serde_json::from_str("\"queued\"").unwrap();
        assert_eq!(status, SessionStatus::Unknown);
    }

    #[test]
    fn test_start_training_defaults_and_validation() {
        let request = StartTraining::new("a-1", 10);
        assert_eq!(request.learning_rate, DEFAULT_LEARNING_RATE);
        assert_eq!(request.batch_size, DEFAULT_BATCH_SIZE);
        assert!(request.validate().is_ok());

        assert!(StartTraining::new("", 10).validate().is_err());
        assert!(StartTraining::new("a-1", 0).validate().is_err());
    }

    #[test]
    fn test_start_reply_without_session_id() {
        let started: TrainingStarted =
            serde_json::from_value(serde_json::json!({"status": "started"})).unwrap();
        assert_eq!(started.status.as_deref(), Some("started"));
        assert!(started.session_id.is_none());

        let started: TrainingStarted =
            serde_json::from_value(serde_json::json!({"session_id": "s-9"})).unwrap();
        assert_eq!(started.session_id.as_deref(), Some("s-9"));
    }
}
