//! # Evolve Core
//!
//! Core types for the Evolve client of the self-learning agents platform.
//!
//! ## What lives here
//! - Entity types as the backend emits them (agents, training sessions,
//!   metric series, goals, anomalies, evolution history, prompts, collaborations)
//! - Request bodies with local validation
//! - The priority scale mapping and timestamp helpers
//! - The shared error type and endpoint paths
//!
//! Nothing in this crate performs I/O.

mod de;

pub mod agent;
pub mod anomaly;
pub mod collaboration;
pub mod error;
pub mod evolution;
pub mod goal;
pub mod performance;
pub mod prompt;
pub mod system;
pub mod timestamp;
pub mod training;

pub use agent::{
    Agent, AgentCategory, AgentHistoryEntry, AgentId, AgentStatus, AgentUpdate,
    InteractionReply, InteractionRequest, NewAgent, TrainingFeedback, WEAK_ACCURACY_THRESHOLD,
};
pub use anomaly::{Anomaly, AnomalyFeed, AnomalyStatus, Severity};
pub use collaboration::{Collaboration, CollaborationCreated, NewCollaboration};
pub use error::{EvolveError, Result};
pub use evolution::{EvolutionEvent, EvolutionTrigger, EvolutionTriggered};
pub use goal::{Goal, GoalProgressUpdate, GoalStatus, GoalsSummary, NewGoal, Priority};
pub use performance::{MetricPoint, MetricSeries, PerformanceMetrics, Reading, SystemPerformance};
pub use prompt::{Prompt, PromptCategory, PromptDraft};
pub use system::HealthStatus;
pub use timestamp::Timestamp;
pub use training::{SessionStatus, StartTraining, TrainingMetrics, TrainingSession, TrainingStarted};

/// Current Evolve version for compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build information for logs and the CLI banner
pub const BUILD_INFO: &str = concat!(
    "Evolve ",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARGO_PKG_NAME"),
    ")"
);

/// Backend endpoint paths, relative to the configured base URL
pub mod endpoints {
    use std::borrow::Cow;

    pub const HEALTH: &str = "/health";

    pub const AGENTS: &str = "/agents";
    pub const TRAINING_FEEDBACK: &str = "/training/feedback";
    pub const TRAINING_SESSIONS: &str = "/training/sessions";
    pub const TRAINING_START: &str = "/training/start";

    pub const PERFORMANCE_METRICS: &str = "/performance/metrics";
    pub const PERFORMANCE_SYSTEM: &str = "/performance/system";

    pub const EVOLUTION_HISTORY: &str = "/evolution/history";
    pub const EVOLUTION_TRIGGER: &str = "/evolution/trigger";

    pub const GOALS: &str = "/goals";
    pub const GOALS_SUMMARY: &str = "/goals/summary";

    pub const ANOMALIES: &str = "/anomalies";
    pub const COLLABORATIONS: &str = "/collaborations";
    pub const PROMPTS: &str = "/prompts";

    /// Ids become single path segments, so `/`, `?` and `#` are escaped.
    fn segment(id: &str) -> Cow<'_, str> {
        urlencoding::encode(id)
    }

    pub fn agent(id: &str) -> String {
        format!("{AGENTS}/{}", segment(id))
    }

    pub fn agent_history(id: &str) -> String {
        format!("{AGENTS}/{}/history", segment(id))
    }

    pub fn agent_interact(id: &str) -> String {
        format!("{AGENTS}/{}/interact", segment(id))
    }

    pub fn training_stop(session_id: &str) -> String {
        format!("/training/stop/{}", segment(session_id))
    }

    pub fn goal(id: &str) -> String {
        format!("{GOALS}/{}", segment(id))
    }

    pub fn goal_progress(id: &str) -> String {
        format!("{GOALS}/{}/progress", segment(id))
    }

    pub fn anomaly_resolve(id: &str) -> String {
        format!("{ANOMALIES}/{}/resolve", segment(id))
    }

    pub fn prompt(id: &str) -> String {
        format!("{PROMPTS}/{}", segment(id))
    }

}
