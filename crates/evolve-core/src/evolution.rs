//! Evolution history

use crate::agent::AgentId;
use crate::de::null_as_default;
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// One generation of the evolution history. The backend appends these in
/// generation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionEvent {
    pub generation: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accuracy: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub efficiency: f64,
    /// Number of agents taking part in the generation.
    #[serde(default, alias = "agents_count", deserialize_with = "null_as_default")]
    pub agents: u64,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

/// Body of `POST /evolution/trigger`; `None` evolves the whole population.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionTrigger {
    pub agent_id: Option<AgentId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionTriggered {
    #[serde(default)]
    pub agents_count: Option<u64>,
    #[serde(default)]
    pub estimated_duration: Option<String>,
}

/// Most recent generation, which is the last one appended.
pub fn latest_generation(history: &[EvolutionEvent]) -> Option<&EvolutionEvent> {
    history.last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_body_always_carries_agent_id() {
        let body = serde_json::to_value(EvolutionTrigger::default()).unwrap();
        assert_eq!(body, serde_json::json!({ "agent_id": null }));
    }

    #[test]
    fn test_latest_generation_is_last_entry() {
        let history: Vec<EvolutionEvent> = serde_json::from_value(serde_json::json!([
            { "generation": 1, "accuracy": 80.0, "efficiency": 70.0, "agents": 4 },
            { "generation": 2, "accuracy": 84.0, "efficiency": 72.5, "agents": 5 }
        ]))
        .unwrap();

        assert_eq!(latest_generation(&history).unwrap().generation, 2);
        assert!(latest_generation(&[]).is_none());
    }
}
