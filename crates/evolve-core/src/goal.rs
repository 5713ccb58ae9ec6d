//! Goal types and the priority scale
//!
//! The backend stores priority on a 1-10 scale; the client works with three
//! labels. Writes use fixed points (3, 6, 9) and reads use breakpoints
//! (<= 4 low, >= 8 high), so values inside a bucket collapse on read.

use crate::agent::AgentId;
use crate::de::null_as_default;
use crate::error::{EvolveError, Result};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored priority assumed when the backend omits one.
pub const DEFAULT_PRIORITY_SCALE: i64 = 5;
pub const DEFAULT_DAYS_UNTIL_TARGET: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Integer written to the backend for this label.
    pub fn to_scale(self) -> i64 {
        match self {
            Self::Low => 3,
            Self::Medium => 6,
            Self::High => 9,
        }
    }

    /// Label shown for a stored integer.
    pub fn from_scale(value: i64) -> Self {
        if value >= 8 {
            Self::High
        } else if value <= 4 {
            Self::Low
        } else {
            Self::Medium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = EvolveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(EvolveError::validation(
                "priority",
                format!("expected low, medium or high, got '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    Completed,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    #[serde(default)]
    pub agent_id: Option<AgentId>,
    #[serde(default, alias = "title", deserialize_with = "null_as_default")]
    pub goal_name: String,
    #[serde(default)]
    pub goal_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metric_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_value: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_value: f64,
    #[serde(default)]
    pub progress_percentage: Option<f64>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: GoalStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Goal {
    /// Progress in percent, clamped to `[0, 100]`. Falls back to
    /// `current / target` when the backend did not report a percentage.
    pub fn progress(&self) -> f64 {
        let raw = match self.progress_percentage {
            Some(pct) => pct,
            None if self.target_value > 0.0 => self.current_value / self.target_value * 100.0,
            None => 0.0,
        };
        if raw.is_nan() {
            return 0.0;
        }
        raw.clamp(0.0, 100.0)
    }

    pub fn priority_label(&self) -> Priority {
        Priority::from_scale(self.priority.unwrap_or(DEFAULT_PRIORITY_SCALE))
    }

    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == GoalStatus::Completed
    }
}

/// Response of `GET /goals/summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalsSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_goals: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed_goals: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_goals: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_progress: f64,
}

/// Body of `POST /goals`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    pub agent_id: AgentId,
    pub goal_type: String,
    pub goal_name: String,
    pub description: String,
    pub target_value: f64,
    pub metric_name: String,
    pub priority: i64,
    pub days_until_target: u32,
}

impl NewGoal {
    pub fn new(
        agent_id: impl Into<AgentId>,
        goal_name: impl Into<String>,
        metric_name: impl Into<String>,
        target_value: f64,
        priority: Priority,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            goal_type: "objective".to_string(),
            goal_name: goal_name.into().trim().to_string(),
            description: String::new(),
            target_value,
            metric_name: metric_name.into().trim().to_string(),
            priority: priority.to_scale(),
            days_until_target: DEFAULT_DAYS_UNTIL_TARGET,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    pub fn with_goal_type(mut self, goal_type: impl Into<String>) -> Self {
        self.goal_type = goal_type.into();
        self
    }

    pub fn with_days_until_target(mut self, days: u32) -> Self {
        self.days_until_target = days;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.agent_id.trim().is_empty() {
            return Err(EvolveError::validation("agent_id", "please select an agent"));
        }
        if self.goal_name.trim().is_empty() {
            return Err(EvolveError::validation("goal_name", "goal title is required"));
        }
        if self.metric_name.trim().is_empty() {
            return Err(EvolveError::validation("metric_name", "metric name is required"));
        }
        if !(self.target_value.is_finite() && self.target_value > 0.0) {
            return Err(EvolveError::validation(
                "target_value",
                "target value must be positive",
            ));
        }
        Ok(())
    }
}

/// Body of `PATCH /goals/{id}/progress`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgressUpdate {
    pub current_value: f64,
}
