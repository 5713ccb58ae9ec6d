//! Resource fetchers
//!
//! One method per backend endpoint. Validation of request bodies is the
//! caller's job; these only move JSON.

use crate::client::ApiClient;
use evolve_core::error::json_kind;
use evolve_core::*;
use serde_json::Value;

/// Write responses the client does not interpret further.
pub type Ack = Value;

impl ApiClient {
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get(endpoints::HEALTH).await
    }

    // Agents

    pub async fn agents(&self) -> Result<Vec<Agent>> {
        self.get_list(endpoints::AGENTS).await
    }

    pub async fn agent(&self, id: &str) -> Result<Agent> {
        self.get(&endpoints::agent(id)).await
    }

    pub async fn agent_history(&self, id: &str) -> Result<Vec<AgentHistoryEntry>> {
        self.get_list(&endpoints::agent_history(id)).await
    }

    pub async fn create_agent(&self, agent: &NewAgent) -> Result<Ack> {
        self.post(endpoints::AGENTS, agent).await
    }

    pub async fn update_agent(&self, id: &str, update: &AgentUpdate) -> Result<Ack> {
        self.patch(&endpoints::agent(id), update).await
    }

    pub async fn delete_agent(&self, id: &str) -> Result<Ack> {
        self.delete(&endpoints::agent(id)).await
    }

    pub async fn interact(&self, id: &str, input: &str) -> Result<InteractionReply> {
        let body = InteractionRequest {
            input: input.to_string(),
        };
        self.post(&endpoints::agent_interact(id), &body).await
    }

    pub async fn submit_feedback(&self, feedback: &TrainingFeedback) -> Result<Ack> {
        self.post(endpoints::TRAINING_FEEDBACK, feedback).await
    }

    // Training

    pub async fn training_sessions(&self) -> Result<Vec<TrainingSession>> {
        self.get_list(endpoints::TRAINING_SESSIONS).await
    }

    pub async fn start_training(&self, request: &StartTraining) -> Result<TrainingStarted> {
        self.post(endpoints::TRAINING_START, request).await
    }

    pub async fn stop_training(&self, session_id: &str) -> Result<Ack> {
        self.post_empty(&endpoints::training_stop(session_id)).await
    }

    // Performance

    pub async fn performance_metrics(&self) -> Result<PerformanceMetrics> {
        self.get(endpoints::PERFORMANCE_METRICS).await
    }

    pub async fn system_performance(&self) -> Result<SystemPerformance> {
        self.get(endpoints::PERFORMANCE_SYSTEM).await
    }

    // Evolution

    pub async fn evolution_history(&self) -> Result<Vec<EvolutionEvent>> {
        self.get_list(endpoints::EVOLUTION_HISTORY).await
    }

    pub async fn trigger_evolution(&self, agent_id: Option<&str>) -> Result<EvolutionTriggered> {
        let body = EvolutionTrigger {
            agent_id: agent_id.map(str::to_string),
        };
        self.post(endpoints::EVOLUTION_TRIGGER, &body).await
    }

    // Goals

    pub async fn goals(&self) -> Result<Vec<Goal>> {
        self.get_list(endpoints::GOALS).await
    }

    pub async fn goals_summary(&self) -> Result<GoalsSummary> {
        self.get(endpoints::GOALS_SUMMARY).await
    }

    pub async fn create_goal(&self, goal: &NewGoal) -> Result<Ack> {
        self.post(endpoints::GOALS, goal).await
    }

    pub async fn update_goal_progress(&self, id: &str, current_value: f64) -> Result<Ack> {
        let body = GoalProgressUpdate { current_value };
        self.patch(&endpoints::goal_progress(id), &body).await
    }

    pub async fn delete_goal(&self, id: &str) -> Result<Ack> {
        self.delete(&endpoints::goal(id)).await
    }

    // Anomalies

    /// Accepts both the bare list and the `{ alerts: [...] }` envelope.
    pub async fn anomalies(&self) -> Result<Vec<Anomaly>> {
        let value: Value = self.get(endpoints::ANOMALIES).await?;
        let envelope = value.get("alerts").is_some_and(Value::is_array);
        if !value.is_array() && !envelope {
            return Err(EvolveError::UnexpectedShape {
                endpoint: endpoints::ANOMALIES.to_string(),
                expected: "array or alerts envelope",
                found: json_kind(&value),
            });
        }
        let feed: AnomalyFeed = serde_json::from_value(value)?;
        Ok(feed.into_alerts())
    }

    pub async fn resolve_anomaly(&self, id: &str) -> Result<Ack> {
        self.patch_empty(&endpoints::anomaly_resolve(id)).await
    }

    // Collaborations

    pub async fn collaborations(&self) -> Result<Vec<Collaboration>> {
        self.get_list(endpoints::COLLABORATIONS).await
    }

    pub async fn create_collaboration(
        &self,
        collaboration: &NewCollaboration,
    ) -> Result<CollaborationCreated> {
        self.post(endpoints::COLLABORATIONS, collaboration).await
    }

    // Prompts

    pub async fn prompts(&self) -> Result<Vec<Prompt>> {
        self.get_list(endpoints::PROMPTS).await
    }

    pub async fn create_prompt(&self, draft: &PromptDraft) -> Result<Ack> {
        self.post(endpoints::PROMPTS, draft).await
    }

    pub async fn update_prompt(&self, id: &str, draft: &PromptDraft) -> Result<Ack> {
        self.patch(&endpoints::prompt(id), draft).await
    }

    pub async fn delete_prompt(&self, id: &str) -> Result<Ack> {
        self.delete(&endpoints::prompt(id)).await
    }
}
