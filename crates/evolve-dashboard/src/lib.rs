//! # Evolve Dashboard
//!
//! Aggregation and write flows on top of [`evolve_client::ApiClient`].
//!
//! - [`aggregate`] fetches the six dashboard collections concurrently and
//!   derives counts, latest readings and ranked lists. Any subset of the
//!   fetches may fail; only a total failure is an error.
//! - [`Dashboard`] sequences refresh passes so an older pass never overwrites
//!   a newer one.
//! - [`Actions`] runs validate, write, re-read for every mutating flow.

pub mod actions;
pub mod aggregate;
pub mod refresh;
pub mod source;
pub mod stats;
pub mod views;

pub use actions::{Actions, Applied, Conversation, GoalBoard, TrainingBoard};
pub use aggregate::{aggregate, fetch_all, DashboardData, DashboardLimits, DashboardSnapshot};
pub use refresh::{Dashboard, DashboardState, RefreshOutcome};
pub use source::DashboardSource;
pub use stats::{AgentCounts, AnomalyCounts, LatestReadings, SessionCounts};
