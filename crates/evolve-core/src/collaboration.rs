//! Multi-agent collaborations

use crate::agent::AgentId;
use crate::de::null_as_default;
use crate::error::{EvolveError, Result};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaboration {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, alias = "agent_ids", deserialize_with = "null_as_default")]
    pub agents: Vec<AgentId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub efficiency: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Body of `POST /collaborations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCollaboration {
    pub name: String,
    pub agent_ids: Vec<AgentId>,
    pub description: String,
}

impl NewCollaboration {
    /// Builds a request from a comma-separated member list.
    pub fn from_member_list(
        name: impl Into<String>,
        members: &str,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            agent_ids: parse_member_list(members),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(EvolveError::validation("name", "collaboration name required"));
        }
        if self.agent_ids.is_empty() {
            return Err(EvolveError::validation("agent_ids", "at least one agent id required"));
        }
        Ok(())
    }
}

pub fn parse_member_list(members: &str) -> Vec<AgentId> {
    members
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Response of `POST /collaborations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborationCreated {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_list_is_trimmed() {
        assert_eq!(parse_member_list(" a-1, a-2 ,,a-3 "), vec!["a-1", "a-2", "a-3"]);
        assert!(parse_member_list(" , ").is_empty());
    }

    #[test]
    fn test_new_collaboration_validation() {
        assert!(NewCollaboration::from_member_list("Team", "a-1", "").validate().is_ok());
        assert!(NewCollaboration::from_member_list(" ", "a-1", "").validate().is_err());
        assert!(NewCollaboration::from_member_list("Team", "", "").validate().is_err());
    }

    #[test]
    fn test_created_reply_without_id() {
        let created: CollaborationCreated =
            serde_json::from_value(serde_json::json!({"status": "created"})).unwrap();
        assert!(created.id.is_none());
    }
}
