//! Agent types

use crate::de::null_as_default;
use crate::error::{EvolveError, Result};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type AgentId = String;

/// Accuracy below this percentage marks an agent as weak.
pub const WEAK_ACCURACY_THRESHOLD: f64 = 93.0;

/// Operational status. Only `active` is distinguished; every other value the
/// backend reports is shown as paused but kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentStatus {
    Active,
    #[default]
    Paused,
    Other(String),
}

impl AgentStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Status an agent moves to when toggled from the roster.
    pub fn toggled(&self) -> Self {
        if self.is_active() {
            Self::Paused
        } else {
            Self::Active
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for AgentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => Self::Active,
            "paused" => Self::Paused,
            _ => Self::Other(value),
        }
    }
}

impl From<AgentStatus> for String {
    fn from(value: AgentStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AgentCategory {
    Classification,
    Generation,
    Analysis,
    Extraction,
    Orchestrator,
    Tooling,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AgentCategory {
    pub const ALL: [AgentCategory; 6] = [
        Self::Classification,
        Self::Generation,
        Self::Analysis,
        Self::Extraction,
        Self::Orchestrator,
        Self::Tooling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classification => "Classification",
            Self::Generation => "Generation",
            Self::Analysis => "Analysis",
            Self::Extraction => "Extraction",
            Self::Orchestrator => "Orchestrator",
            Self::Tooling => "Tooling",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AgentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentCategory {
    type Err = EvolveError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EvolveError::validation("agent_type", format!("unknown category '{s}'")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub agent_type: AgentCategory,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AgentStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accuracy: f64,
    #[serde(default, rename = "lastActive", alias = "last_active")]
    pub last_active: Option<Timestamp>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Agent {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_weak(&self) -> bool {
        self.accuracy < WEAK_ACCURACY_THRESHOLD
    }

    /// Accuracy clamped to the displayable percentage range.
    pub fn accuracy_pct(&self) -> f64 {
        self.accuracy.clamp(0.0, 100.0)
    }

    /// `"{name} ({agent_type})"`, the label used wherever an agent is referenced.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.agent_type)
    }
}

/// Body of `POST /agents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAgent {
    pub name: String,
    pub agent_type: AgentCategory,
    pub description: String,
    pub config: serde_json::Value,
}

impl NewAgent {
    pub fn new(name: impl Into<String>, agent_type: AgentCategory) -> Self {
        Self {
            name: name.into().trim().to_string(),
            agent_type,
            description: String::new(),
            config: serde_json::Value::Object(Default::default()),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(EvolveError::validation("name", "agent name required"));
        }
        Ok(())
    }
}

/// Body of `PATCH /agents/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<AgentCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,
}

impl AgentUpdate {
    pub fn status(status: AgentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.agent_type.is_none()
            && self.description.is_none()
            && self.status.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(EvolveError::validation("update", "nothing to change"));
        }
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(EvolveError::validation("name", "agent name required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRequest {
    pub input: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One line of an agent's conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentHistoryEntry {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

/// Body of `POST /training/feedback`. `label` is 1 for a correct answer, 0 otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingFeedback {
    pub agent_id: AgentId,
    pub input_text: String,
    pub label: u8,
}

impl TrainingFeedback {
    pub fn new(agent_id: impl Into<AgentId>, input_text: impl Into<String>, correct: bool) -> Self {
        Self {
            agent_id: agent_id.into(),
            input_text: input_text.into(),
            label: u8::from(correct),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.agent_id.is_empty() {
            return Err(EvolveError::validation("agent_id", "select an agent first"));
        }
        if self.input_text.trim().is_empty() {
            return Err(EvolveError::validation(
                "input_text",
                "send a message first before giving feedback",
            ));
        }
        Ok(())
    }
}
