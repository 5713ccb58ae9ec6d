pub mod agent;
pub mod anomaly;
pub mod collab;
pub mod evolution;
pub mod goal;
pub mod overview;
pub mod prompt;
pub mod training;

pub use agent::AgentCommand;
pub use anomaly::AnomalyCommand;
pub use collab::CollabCommand;
pub use evolution::EvolutionCommand;
pub use goal::GoalCommand;
pub use prompt::PromptCommand;
pub use training::TrainingCommand;
