//! BDD Tests for dashboard aggregation and write flows

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::{Json, Router};
use chrono::NaiveDate;
use cucumber::{given, then, when, World};
use evolve_client::{ApiClient, ClientConfig, EvolveError};
use evolve_core::{AgentCategory, NewAgent, NewCollaboration, NewGoal, Priority, StartTraining};
use evolve_dashboard::{
    Actions, Dashboard, DashboardLimits, DashboardSnapshot, GoalBoard, TrainingBoard,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// In-memory backend answering the dashboard endpoints.
#[derive(Debug, Default)]
struct StubData {
    collections: HashMap<String, Vec<Value>>,
    failing: HashSet<String>,
    failing_reads: HashSet<String>,
    writes: Vec<(Method, String, Value)>,
}

type Stub = Arc<Mutex<StubData>>;

const LISTS: [&str; 4] = ["/agents", "/training/sessions", "/goals", "/anomalies"];

async fn handle(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().to_string();
    let mut data = stub.lock();

    if data.failing.contains(&path) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!("boom")));
    }

    if method == Method::GET {
        if data.failing_reads.contains(&path) {
            return (StatusCode::SERVICE_UNAVAILABLE, Json(json!("unavailable")));
        }
        return match path.as_str() {
            "/performance/metrics" => (StatusCode::OK, Json(json!({}))),
            "/goals/summary" => {
                let total = data.collections.get("/goals").map_or(0, Vec::len);
                let summary = json!({ "active_goals": total, "total_goals": total });
                (StatusCode::OK, Json(summary))
            }
            list if LISTS.contains(&list) => {
                let items = data.collections.get(list).cloned().unwrap_or_default();
                (StatusCode::OK, Json(Value::Array(items)))
            }
            _ => (StatusCode::NOT_FOUND, Json(json!("not found"))),
        };
    }

    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    data.writes.push((method, path.clone(), payload.clone()));

    let reply = match path.as_str() {
        "/goals" => {
            let count = data.collections.get("/goals").map_or(0, Vec::len);
            let mut goal = payload;
            goal["id"] = json!(format!("g-{count}"));
            goal["status"] = json!("active");
            data.collections
                .entry("/goals".to_string())
                .or_default()
                .push(goal);
            json!({ "status": "created" })
        }
        "/training/start" => {
            let session = json!({
                "id": "s-1",
                "agent": payload["agent_id"],
                "status": "in_progress",
                "duration": payload["epochs"],
                "timestamp": "2025-03-14T09:00:00"
            });
            data.collections
                .entry("/training/sessions".to_string())
                .or_default()
                .push(session);
            json!({ "status": "started", "session_id": "s-1", "agent_id": payload["agent_id"] })
        }
        "/collaborations" => json!({ "id": "c-1" }),
        _ => json!({ "status": "ok" }),
    };
    (StatusCode::OK, Json(reply))
}

#[derive(Debug, World)]
#[world(init = Self::new)]
struct DashboardWorld {
    stub: Stub,
    client: Option<ApiClient>,
    today: NaiveDate,
    limits: DashboardLimits,
    snapshot: Option<Arc<DashboardSnapshot>>,
    goal_board: Option<GoalBoard>,
    training_board: Option<TrainingBoard>,
    agents: Option<Vec<String>>,
    stale: Option<bool>,
    last_error: Option<EvolveError>,
}

impl DashboardWorld {
    fn new() -> Self {
        Self {
            stub: Arc::default(),
            client: None,
            today: NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
            limits: DashboardLimits::default(),
            snapshot: None,
            goal_board: None,
            training_board: None,
            agents: None,
            stale: None,
            last_error: None,
        }
    }

    async fn client(&mut self) -> ApiClient {
        if self.client.is_none() {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind stub backend");
            let addr = listener.local_addr().expect("stub address");
            let router = Router::new()
                .fallback(handle)
                .with_state(Arc::clone(&self.stub));
            tokio::spawn(async move {
                axum::serve(listener, router).await.expect("stub backend");
            });
            self.connect(&format!("http://{addr}"));
        }
        self.client.clone().expect("client configured")
    }

    fn connect(&mut self, url: &str) {
        let config = ClientConfig::new(url).expect("valid URL");
        self.client = Some(ApiClient::new(config).expect("client"));
    }

    fn push(&self, collection: &str, item: Value) {
        self.stub
            .lock()
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(item);
    }

    fn snapshot(&self) -> &DashboardSnapshot {
        self.snapshot
            .as_deref()
            .unwrap_or_else(|| panic!("no snapshot, error: {:?}", self.last_error))
    }

    fn record<T>(&mut self, result: evolve_client::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.last_error = Some(err);
                None
            }
        }
    }
}

#[given(expr = "today is {string}")]
async fn given_today(world: &mut DashboardWorld, day: String) {
    world.today = day.parse().expect("ISO date");
}

#[given(regex = r#"^the backend has an? (\w+) agent "([^"]*)" with accuracy (\d+)$"#)]
async fn given_agent(world: &mut DashboardWorld, status: String, id: String, accuracy: i64) {
    world.push(
        "/agents",
        json!({
            "id": id,
            "name": id,
            "agent_type": "Analysis",
            "status": status,
            "tasks": 0,
            "accuracy": accuracy as f64
        }),
    );
}

#[given(expr = "the backend has a resolved anomaly {string} stamped {string}")]
async fn given_resolved_anomaly(world: &mut DashboardWorld, id: String, stamp: String) {
    world.push(
        "/anomalies",
        json!({ "id": id, "status": "resolved", "severity": "low", "timestamp": stamp }),
    );
}

#[given(expr = "the backend has an investigating anomaly {string}")]
async fn given_investigating_anomaly(world: &mut DashboardWorld, id: String) {
    world.push(
        "/anomalies",
        json!({ "id": id, "status": "investigating", "severity": "high" }),
    );
}

#[given(expr = "the {string} endpoint is failing")]
async fn given_failing_endpoint(world: &mut DashboardWorld, path: String) {
    world.stub.lock().failing.insert(path);
}

#[given(expr = "the backend cannot list {string}")]
async fn given_failing_read(world: &mut DashboardWorld, path: String) {
    world.stub.lock().failing_reads.insert(path);
}

#[given(expr = "the dashboard shows the top {int} agents")]
async fn given_top_limit(world: &mut DashboardWorld, limit: usize) {
    world.limits.top_agents = limit;
}

#[given("no backend is listening")]
async fn given_no_backend(world: &mut DashboardWorld) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind free port");
    let addr = listener.local_addr().expect("free address");
    drop(listener);
    world.connect(&format!("http://{addr}"));
}

#[when("the dashboard refreshes")]
async fn when_refresh(world: &mut DashboardWorld) {
    let dashboard = Dashboard::with_limits(world.client().await, world.limits);
    let result = dashboard.refresh_for(world.today).await;
    if let Some(outcome) = world.record(result) {
        assert!(outcome.is_committed());
        world.snapshot = dashboard.snapshot();
    }
}

#[when(expr = "I create a {string} priority goal {string} for agent {string}")]
async fn when_create_goal(world: &mut DashboardWorld, priority: String, name: String, agent: String) {
    let priority: Priority = priority.parse().expect("priority label");
    let goal = NewGoal::new(agent, name, "accuracy", 99.0, priority);
    let actions = Actions::new(world.client().await);
    let result = actions.create_goal(&goal).await;
    if let Some(applied) = world.record(result) {
        world.stale = Some(applied.stale);
        world.goal_board = Some(applied.refreshed);
    }
}

#[when(expr = "I create a goal for agent {string} with target {int}")]
async fn when_create_goal_with_target(world: &mut DashboardWorld, agent: String, target: i64) {
    let goal = NewGoal::new(agent, "Untargeted", "accuracy", target as f64, Priority::Medium);
    let actions = Actions::new(world.client().await);
    let result = actions.create_goal(&goal).await;
    world.goal_board = world.record(result).map(|applied| applied.refreshed);
}

#[when(expr = "I start training agent {string} for {int} epochs")]
async fn when_start_training(world: &mut DashboardWorld, agent: String, epochs: u32) {
    let actions = Actions::new(world.client().await);
    let result = actions.start_training(&StartTraining::new(agent, epochs)).await;
    if let Some(applied) = world.record(result) {
        world.stale = Some(applied.stale);
        world.training_board = Some(applied.refreshed);
    }
}

#[when(expr = "I create an agent {string}")]
async fn when_create_agent(world: &mut DashboardWorld, name: String) {
    let actions = Actions::new(world.client().await);
    let result = actions
        .create_agent(&NewAgent::new(name, AgentCategory::Analysis))
        .await;
    if let Some(applied) = world.record(result) {
        world.stale = Some(applied.stale);
        world.agents = Some(applied.refreshed.into_iter().map(|agent| agent.id).collect());
    }
}

#[when(expr = "I create a collaboration {string} with members {string}")]
async fn when_create_collaboration(world: &mut DashboardWorld, name: String, members: String) {
    let request = NewCollaboration::from_member_list(name, &members, "");
    let actions = Actions::new(world.client().await);
    let result = actions.create_collaboration(&request).await;
    world.record(result);
}

#[then(expr = "the dashboard shows {int} agents, {int} active, {int} paused and {int} weak")]
async fn then_agent_counts(
    world: &mut DashboardWorld,
    total: usize,
    active: usize,
    paused: usize,
    weak: usize,
) {
    let counts = world.snapshot().agents;
    assert_eq!(
        (counts.total, counts.active, counts.paused, counts.weak),
        (total, active, paused, weak)
    );
}

#[then(expr = "the dashboard shows {int} open anomalies")]
async fn then_open_anomalies(world: &mut DashboardWorld, open: usize) {
    assert_eq!(world.snapshot().anomalies.open, open);
}

#[then(expr = "{int} dashboard source is degraded")]
async fn then_degraded(world: &mut DashboardWorld, degraded: usize) {
    assert_eq!(world.snapshot().degraded_sources, degraded);
}

#[then(expr = "{int} anomaly was resolved today")]
async fn then_resolved_today(world: &mut DashboardWorld, resolved: usize) {
    assert_eq!(world.snapshot().anomalies.resolved_today, resolved);
}

#[then(expr = "system health reads {int} as a placeholder")]
async fn then_placeholder_health(world: &mut DashboardWorld, value: i64) {
    let health = world.snapshot().system_health;
    assert!(health.placeholder);
    assert_eq!(health.value, value as f64);
}

#[then(expr = "the top agents are {string}")]
async fn then_top_agents(world: &mut DashboardWorld, expected: String) {
    let ids: Vec<&str> = world
        .snapshot()
        .top_agents
        .iter()
        .map(|agent| agent.id.as_str())
        .collect();
    assert_eq!(ids.join(","), expected);
}

#[then("the refresh fails because the backend is unavailable")]
async fn then_backend_unavailable(world: &mut DashboardWorld) {
    assert!(
        matches!(world.last_error, Some(EvolveError::BackendUnavailable)),
        "got {:?}",
        world.last_error
    );
}

#[then(expr = "the backend received a goal with priority {int}")]
async fn then_goal_priority(world: &mut DashboardWorld, priority: i64) {
    let data = world.stub.lock();
    let (_, _, body) = data
        .writes
        .iter()
        .find(|(method, path, _)| *method == Method::POST && path == "/goals")
        .expect("goal was posted");
    assert_eq!(body["priority"], json!(priority));
}

#[then(expr = "the goal board lists {int} goals")]
async fn then_goal_board(world: &mut DashboardWorld, count: usize) {
    let board = world.goal_board.as_ref().expect("goal board");
    assert_eq!(board.goals.len(), count);
    assert_eq!(board.summary.as_ref().map(|s| s.active_goals), Some(count as u64));
}

#[then(expr = "the training board lists {int} sessions and {int} agents")]
async fn then_training_board(world: &mut DashboardWorld, sessions: usize, agents: usize) {
    let board = world.training_board.as_ref().expect("training board");
    assert_eq!(board.sessions.len(), sessions);
    assert_eq!(board.agents.len(), agents);
    assert!(board.sessions[0].is_in_progress());
}

#[then(expr = "the write is rejected for {string}")]
async fn then_rejected(world: &mut DashboardWorld, field: String) {
    match world.last_error.as_ref() {
        Some(EvolveError::Validation { field: f, .. }) => assert_eq!(*f, field),
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[then("the backend received no writes")]
async fn then_no_writes(world: &mut DashboardWorld) {
    assert!(world.stub.lock().writes.is_empty());
}

#[then(expr = "the write succeeds with {int} recorded write")]
async fn then_write_succeeds(world: &mut DashboardWorld, count: usize) {
    assert!(world.last_error.is_none(), "got {:?}", world.last_error);
    assert_eq!(world.stub.lock().writes.len(), count);
}

#[then("the refreshed data is marked stale")]
async fn then_stale(world: &mut DashboardWorld) {
    assert_eq!(world.stale, Some(true));
}

#[then("the refreshed data is current")]
async fn then_current(world: &mut DashboardWorld) {
    assert_eq!(world.stale, Some(false));
}

#[then("the refreshed agent list is empty")]
async fn then_no_agents(world: &mut DashboardWorld) {
    assert_eq!(world.agents.as_ref().map(Vec::len), Some(0));
}

#[then(expr = "the write fails with status {int}")]
async fn then_write_fails(world: &mut DashboardWorld, status: u16) {
    let error = world.last_error.as_ref().expect("write error");
    assert_eq!(error.status(), Some(status));
}

#[tokio::main]
async fn main() {
    DashboardWorld::cucumber().run_and_exit("tests/features").await;
}
