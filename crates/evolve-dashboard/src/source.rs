//! Where an aggregation pass gets its data from

use async_trait::async_trait;
use evolve_client::ApiClient;
use evolve_core::{Agent, Anomaly, Goal, GoalsSummary, PerformanceMetrics, Result, TrainingSession};

/// The six reads behind the dashboard. Each may fail independently.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn agents(&self) -> Result<Vec<Agent>>;
    async fn training_sessions(&self) -> Result<Vec<TrainingSession>>;
    async fn performance_metrics(&self) -> Result<PerformanceMetrics>;
    async fn goals_summary(&self) -> Result<GoalsSummary>;
    async fn goals(&self) -> Result<Vec<Goal>>;
    async fn anomalies(&self) -> Result<Vec<Anomaly>>;
}

#[async_trait]
impl DashboardSource for ApiClient {
    async fn agents(&self) -> Result<Vec<Agent>> {
        ApiClient::agents(self).await
    }

    async fn training_sessions(&self) -> Result<Vec<TrainingSession>> {
        ApiClient::training_sessions(self).await
    }

    async fn performance_metrics(&self) -> Result<PerformanceMetrics> {
        ApiClient::performance_metrics(self).await
    }

    async fn goals_summary(&self) -> Result<GoalsSummary> {
        ApiClient::goals_summary(self).await
    }

    async fn goals(&self) -> Result<Vec<Goal>> {
        ApiClient::goals(self).await
    }

    async fn anomalies(&self) -> Result<Vec<Anomaly>> {
        ApiClient::anomalies(self).await
    }
}

#[async_trait]
impl<S: DashboardSource + ?Sized> DashboardSource for std::sync::Arc<S> {
    async fn agents(&self) -> Result<Vec<Agent>> {
        (**self).agents().await
    }

    async fn training_sessions(&self) -> Result<Vec<TrainingSession>> {
        (**self).training_sessions().await
    }

    async fn performance_metrics(&self) -> Result<PerformanceMetrics> {
        (**self).performance_metrics().await
    }

    async fn goals_summary(&self) -> Result<GoalsSummary> {
        (**self).goals_summary().await
    }

    async fn goals(&self) -> Result<Vec<Goal>> {
        (**self).goals().await
    }

    async fn anomalies(&self) -> Result<Vec<Anomaly>> {
        (**self).anomalies().await
    }
}
