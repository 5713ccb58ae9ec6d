//! Write flows
//!
//! Each flow validates locally, issues one write, then re-reads the collection
//! the write touched plus the ones coupled to it. The fresh data is handed
//! back with the write response. Validation and write errors go straight to
//! the caller. A failed re-read only marks the result stale, since the write
//! has already landed.

use evolve_client::{Ack, ApiClient};
use evolve_core::{
    Agent, AgentHistoryEntry, AgentStatus, AgentUpdate, Anomaly, Collaboration,
    CollaborationCreated, EvolutionEvent, EvolutionTriggered, EvolveError, Goal, GoalsSummary,
    InteractionReply, NewAgent, NewCollaboration, NewGoal, Prompt, PromptDraft, Result,
    StartTraining, TrainingFeedback, TrainingSession, TrainingStarted,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Write response plus the collections re-read after it.
#[derive(Debug, Clone, Serialize)]
pub struct Applied<T, R> {
    pub response: T,
    pub refreshed: R,
    /// Set when the write succeeded but the follow-up read did not. `refreshed`
    /// then holds whatever could be loaded, possibly nothing.
    pub stale: bool,
}

impl<T, R: Default> Applied<T, R> {
    fn reloaded(response: T, what: &'static str, reread: Result<R>) -> Self {
        match reread {
            Ok(refreshed) => Self {
                response,
                refreshed,
                stale: false,
            },
            Err(e) => {
                warn!(reload = what, error = %e, "Write applied but reload failed");
                Self {
                    response,
                    refreshed: R::default(),
                    stale: true,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TrainingBoard {
    pub sessions: Vec<TrainingSession>,
    pub agents: Vec<Agent>,
}

/// Goal view data. Each part loads independently.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoalBoard {
    pub summary: Option<GoalsSummary>,
    pub goals: Vec<Goal>,
    pub agents: Vec<Agent>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Conversation {
    pub agents: Vec<Agent>,
    pub history: Vec<AgentHistoryEntry>,
}

fn require_id(field: &'static str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(EvolveError::validation(field, "id required"));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Actions {
    client: ApiClient,
}

impl Actions {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // Agents

    #[instrument(skip_all, fields(name = %agent.name))]
    pub async fn create_agent(&self, agent: &NewAgent) -> Result<Applied<Ack, Vec<Agent>>> {
        agent.validate()?;
        let response = self.client.create_agent(agent).await?;
        info!("Agent created");
        let reread = self.client.agents().await;
        Ok(Applied::reloaded(response, "agents", reread))
    }

    #[instrument(skip(self, update))]
    pub async fn update_agent(
        &self,
        id: &str,
        update: &AgentUpdate,
    ) -> Result<Applied<Ack, Vec<Agent>>> {
        require_id("agent_id", id)?;
        update.validate()?;
        let response = self.client.update_agent(id, update).await?;
        let reread = self.client.agents().await;
        Ok(Applied::reloaded(response, "agents", reread))
    }

    pub async fn set_agent_status(
        &self,
        id: &str,
        status: AgentStatus,
    ) -> Result<Applied<Ack, Vec<Agent>>> {
        self.update_agent(id, &AgentUpdate::status(status)).await
    }

    /// Flips an agent between active and paused.
    pub async fn toggle_agent(&self, agent: &Agent) -> Result<Applied<Ack, Vec<Agent>>> {
        self.set_agent_status(&agent.id, agent.status.toggled()).await
    }

    #[instrument(skip(self))]
    pub async fn delete_agent(&self, id: &str) -> Result<Applied<Ack, Vec<Agent>>> {
        require_id("agent_id", id)?;
        let response = self.client.delete_agent(id).await?;
        info!("Agent deleted");
        let reread = self.client.agents().await;
        Ok(Applied::reloaded(response, "agents", reread))
    }

    #[instrument(skip(self, input))]
    pub async fn interact(
        &self,
        id: &str,
        input: &str,
    ) -> Result<Applied<InteractionReply, Conversation>> {
        require_id("agent_id", id)?;
        if input.trim().is_empty() {
            return Err(EvolveError::validation("input", "message required"));
        }
        let response = self.client.interact(id, input.trim()).await?;
        let reread = tokio::try_join!(self.client.agents(), self.client.agent_history(id))
            .map(|(agents, history)| Conversation { agents, history });
        Ok(Applied::reloaded(response, "conversation", reread))
    }

    #[instrument(skip_all, fields(agent_id = %feedback.agent_id, label = feedback.label))]
    pub async fn submit_feedback(
        &self,
        feedback: &TrainingFeedback,
    ) -> Result<Applied<Ack, Vec<Agent>>> {
        feedback.validate()?;
        let response = self.client.submit_feedback(feedback).await?;
        let reread = self.client.agents().await;
        Ok(Applied::reloaded(response, "agents", reread))
    }

    // Training

    pub async fn training_board(&self) -> Result<TrainingBoard> {
        let (sessions, agents) =
            tokio::try_join!(self.client.training_sessions(), self.client.agents())?;
        Ok(TrainingBoard { sessions, agents })
    }

    #[instrument(skip_all, fields(agent_id = %request.agent_id, epochs = request.epochs))]
    pub async fn start_training(
        &self,
        request: &StartTraining,
    ) -> Result<Applied<TrainingStarted, TrainingBoard>> {
        request.validate()?;
        let response = self.client.start_training(request).await?;
        info!(session_id = ?response.session_id, "Training started");
        let reread = self.training_board().await;
        Ok(Applied::reloaded(response, "training board", reread))
    }

    #[instrument(skip(self))]
    pub async fn stop_training(&self, session_id: &str) -> Result<Applied<Ack, TrainingBoard>> {
        require_id("session_id", session_id)?;
        let response = self.client.stop_training(session_id).await?;
        info!("Training stopped");
        let reread = self.training_board().await;
        Ok(Applied::reloaded(response, "training board", reread))
    }

    // Goals

    /// Summary, goals and agents. A failing part is logged and left empty.
    pub async fn goal_board(&self) -> GoalBoard {
        self.load_goal_board().await.0
    }

    /// Goal board plus whether any part failed to load.
    async fn load_goal_board(&self) -> (GoalBoard, bool) {
        let (summary, goals, agents) = tokio::join!(
            self.client.goals_summary(),
            self.client.goals(),
            self.client.agents()
        );
        let partial = summary.is_err() || goals.is_err() || agents.is_err();
        let board = GoalBoard {
            summary: summary
                .inspect_err(|e| warn!(error = %e, "Failed to load goal summary"))
                .ok(),
            goals: goals
                .inspect_err(|e| warn!(error = %e, "Failed to load goals"))
                .unwrap_or_default(),
            agents: agents
                .inspect_err(|e| warn!(error = %e, "Failed to load agents"))
                .unwrap_or_default(),
        };
        (board, partial)
    }

    async fn after_goal_write(&self, response: Ack) -> Applied<Ack, GoalBoard> {
        let (refreshed, stale) = self.load_goal_board().await;
        Applied {
            response,
            refreshed,
            stale,
        }
    }

    #[instrument(skip_all, fields(agent_id = %goal.agent_id, priority = goal.priority))]
    pub async fn create_goal(&self, goal: &NewGoal) -> Result<Applied<Ack, GoalBoard>> {
        goal.validate()?;
        let response = self.client.create_goal(goal).await?;
        info!(goal = %goal.goal_name, "Goal created");
        Ok(self.after_goal_write(response).await)
    }

    #[instrument(skip(self))]
    pub async fn update_goal_progress(
        &self,
        id: &str,
        current_value: f64,
    ) -> Result<Applied<Ack, GoalBoard>> {
        require_id("goal_id", id)?;
        if !current_value.is_finite() {
            return Err(EvolveError::validation("current_value", "must be a number"));
        }
        let response = self.client.update_goal_progress(id, current_value).await?;
        Ok(self.after_goal_write(response).await)
    }

    #[instrument(skip(self))]
    pub async fn delete_goal(&self, id: &str) -> Result<Applied<Ack, GoalBoard>> {
        require_id("goal_id", id)?;
        let response = self.client.delete_goal(id).await?;
        info!("Goal deleted");
        Ok(self.after_goal_write(response).await)
    }

    // Prompts

    #[instrument(skip_all, fields(name = %draft.name))]
    pub async fn create_prompt(&self, draft: &PromptDraft) -> Result<Applied<Ack, Vec<Prompt>>> {
        draft.validate()?;
        let response = self.client.create_prompt(draft).await?;
        let reread = self.client.prompts().await;
        Ok(Applied::reloaded(response, "prompts", reread))
    }

    #[instrument(skip(self, draft))]
    pub async fn update_prompt(
        &self,
        id: &str,
        draft: &PromptDraft,
    ) -> Result<Applied<Ack, Vec<Prompt>>> {
        require_id("prompt_id", id)?;
        draft.validate()?;
        let response = self.client.update_prompt(id, draft).await?;
        let reread = self.client.prompts().await;
        Ok(Applied::reloaded(response, "prompts", reread))
    }

    #[instrument(skip(self))]
    pub async fn delete_prompt(&self, id: &str) -> Result<Applied<Ack, Vec<Prompt>>> {
        require_id("prompt_id", id)?;
        let response = self.client.delete_prompt(id).await?;
        let reread = self.client.prompts().await;
        Ok(Applied::reloaded(response, "prompts", reread))
    }

    // Collaborations

    #[instrument(skip_all, fields(name = %collaboration.name, members = collaboration.agent_ids.len()))]
    pub async fn create_collaboration(
        &self,
        collaboration: &NewCollaboration,
    ) -> Result<Applied<CollaborationCreated, Vec<Collaboration>>> {
        collaboration.validate()?;
        let response = self.client.create_collaboration(collaboration).await?;
        info!(id = ?response.id, "Collaboration created");
        let reread = self.client.collaborations().await;
        Ok(Applied::reloaded(response, "collaborations", reread))
    }

    // Anomalies

    #[instrument(skip(self))]
    pub async fn resolve_anomaly(&self, id: &str) -> Result<Applied<Ack, Vec<Anomaly>>> {
        require_id("anomaly_id", id)?;
        let response = self.client.resolve_anomaly(id).await?;
        info!("Anomaly resolved");
        let reread = self.client.anomalies().await;
        Ok(Applied::reloaded(response, "anomalies", reread))
    }

    // Evolution

    #[instrument(skip(self))]
    pub async fn trigger_evolution(
        &self,
        agent_id: Option<&str>,
    ) -> Result<Applied<EvolutionTriggered, Vec<EvolutionEvent>>> {
        let agent_id = agent_id.map(str::trim).filter(|id| !id.is_empty());
        let response = self.client.trigger_evolution(agent_id).await?;
        info!(agents = ?response.agents_count, "Evolution triggered");
        let reread = self.client.evolution_history().await;
        Ok(Applied::reloaded(response, "evolution history", reread))
    }
}
