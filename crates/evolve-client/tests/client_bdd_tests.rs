//! BDD Tests for the Evolve client

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use cucumber::{given, then, when, World};
use evolve_client::{ApiClient, ClientConfig, ConnectionProbe, EvolveError};
use serde_json::{json, Value};

#[derive(Debug, World)]
#[world(init = Self::new)]
struct ClientWorld {
    client: Option<ApiClient>,
    fetched: Option<usize>,
    last_error: Option<EvolveError>,
    probe: Option<ConnectionProbe>,
}

impl ClientWorld {
    fn new() -> Self {
        Self {
            client: None,
            fetched: None,
            last_error: None,
            probe: None,
        }
    }

    fn client(&self) -> &ApiClient {
        self.client.as_ref().expect("no backend configured")
    }

    async fn serve(&mut self, router: Router) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub backend");
        });
        self.connect(&format!("http://{addr}"));
    }

    fn connect(&mut self, url: &str) {
        let config = ClientConfig::new(url).expect("valid URL");
        self.client = Some(ApiClient::new(config).expect("client"));
    }

    fn record<T>(&mut self, result: evolve_client::Result<Vec<T>>) {
        match result {
            Ok(items) => self.fetched = Some(items.len()),
            Err(err) => self.last_error = Some(err),
        }
    }
}

fn agents(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "id": format!("agent-{i}"),
                    "name": format!("Agent {i}"),
                    "agent_type": "Analysis",
                    "status": "active",
                    "accuracy": 95.0
                })
            })
            .collect(),
    )
}

#[given(expr = "a backend serving {int} agents")]
async fn given_backend_serving_agents(world: &mut ClientWorld, count: usize) {
    let roster = agents(count);
    let router = Router::new()
        .route("/agents", get(move || async move { Json(roster) }))
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }));
    world.serve(router).await;
}

#[given(expr = "a backend wrapping {int} anomalies in an alerts envelope")]
async fn given_backend_wrapping_anomalies(world: &mut ClientWorld, count: usize) {
    let alerts: Vec<Value> = (0..count)
        .map(|i| json!({ "id": format!("an-{i}"), "status": "investigating" }))
        .collect();
    let body = json!({ "total_alerts": count, "alerts": alerts });
    let router = Router::new().route("/anomalies", get(move || async move { Json(body) }));
    world.serve(router).await;
}

#[given(expr = "a backend that rejects every request with status {int} and body {string}")]
async fn given_backend_rejecting(world: &mut ClientWorld, status: u16, body: String) {
    let status = StatusCode::from_u16(status).expect("valid status");
    let router = Router::new().fallback(move || async move { (status, body) });
    world.serve(router).await;
}

#[given("a backend answering the roster with an object")]
async fn given_backend_answering_object(world: &mut ClientWorld) {
    let router = Router::new().route(
        "/agents",
        get(|| async { Json(json!({ "agents": [] })) }),
    );
    world.serve(router).await;
}

#[given("no backend is listening")]
async fn given_no_backend(world: &mut ClientWorld) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind free port");
    let addr = listener.local_addr().expect("free address");
    drop(listener);
    world.connect(&format!("http://{addr}"));
}

#[when("I fetch the agent roster")]
async fn when_fetch_roster(world: &mut ClientWorld) {
    let result = world.client().agents().await;
    world.record(result);
}

#[when("I fetch the anomalies")]
async fn when_fetch_anomalies(world: &mut ClientWorld) {
    let result = world.client().anomalies().await;
    world.record(result);
}

#[when("I probe the backend")]
async fn when_probe(world: &mut ClientWorld) {
    world.probe = Some(world.client().probe().await);
}

#[then(expr = "I should receive {int} agents")]
async fn then_receive_agents(world: &mut ClientWorld, expected: usize) {
    assert_eq!(world.fetched, Some(expected), "error: {:?}", world.last_error);
}

#[then(expr = "I should receive {int} anomalies")]
async fn then_receive_anomalies(world: &mut ClientWorld, expected: usize) {
    assert_eq!(world.fetched, Some(expected), "error: {:?}", world.last_error);
}

#[then(expr = "the request should fail with status {int} and body {string}")]
async fn then_fail_with_status(world: &mut ClientWorld, status: u16, body: String) {
    match world.last_error.as_ref() {
        Some(EvolveError::Http { status: s, body: b }) => {
            assert_eq!(*s, status);
            assert_eq!(b, &body);
        }
        other => panic!("expected an HTTP error, got {other:?}"),
    }
}

#[then("the request should fail with an unexpected shape")]
async fn then_fail_with_shape(world: &mut ClientWorld) {
    assert!(
        matches!(world.last_error, Some(EvolveError::UnexpectedShape { .. })),
        "got {:?}",
        world.last_error
    );
}

#[then(expr = "the probe should succeed with status {int}")]
async fn then_probe_succeeds(world: &mut ClientWorld, status: u16) {
    let probe = world.probe.as_ref().expect("no probe");
    assert!(probe.success);
    assert_eq!(probe.status, Some(status));
}

#[then("the probe should fail with a transport error message")]
async fn then_probe_fails(world: &mut ClientWorld) {
    let probe = world.probe.as_ref().expect("no probe");
    assert!(!probe.success);
    assert!(probe.status.is_none());
    assert!(probe.error.as_deref().is_some_and(|e| !e.is_empty()));
}

#[tokio::main]
async fn main() {
    ClientWorld::cucumber().run_and_exit("tests/features").await;
}
