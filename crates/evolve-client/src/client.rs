//! Remote service client
//!
//! Every call is a fresh round trip: no retries, no timeout, no caching.
//! Non-2xx answers become [`EvolveError::Http`] with the status and the raw
//! body text; transport failures become [`EvolveError::Transport`].

use crate::config::ClientConfig;
use evolve_core::error::json_kind;
use evolve_core::{endpoints, EvolveError, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Outcome of the reachability check against `/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProbe {
    pub success: bool,
    pub status: Option<u16>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| EvolveError::Transport {
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends `body` (if any) as JSON and decodes the JSON answer.
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_with_headers(method, path, body, HeaderMap::new())
            .await
    }

    /// Like [`request`](Self::request), with extra headers merged over the
    /// JSON content-type default.
    #[instrument(skip_all, fields(method = %method, path = %path))]
    pub async fn request_with_headers<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: HeaderMap,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut merged = HeaderMap::new();
        merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        merged.extend(headers);

        let mut request = self
            .http
            .request(method, self.config.url(path))
            .headers(merged);
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Backend rejected request");
            return Err(EvolveError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(status = status.as_u16(), bytes = text.len(), "Backend answered");
        decode_body(&text)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::POST, path, None::<&()>).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::PATCH, path, None::<&()>).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, None::<&()>).await
    }

    /// GET an endpoint that must answer with a JSON array.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let value: serde_json::Value = self.get(path).await?;
        if !value.is_array() {
            return Err(EvolveError::UnexpectedShape {
                endpoint: path.to_string(),
                expected: "array",
                found: json_kind(&value),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Reachability check; reports rather than returns failures.
    #[instrument(skip(self))]
    pub async fn probe(&self) -> ConnectionProbe {
        match self.http.get(self.config.url(endpoints::HEALTH)).send().await {
            Ok(response) => ConnectionProbe {
                success: response.status().is_success(),
                status: Some(response.status().as_u16()),
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "Backend unreachable");
                ConnectionProbe {
                    success: false,
                    status: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

fn transport_error(error: reqwest::Error) -> EvolveError {
    EvolveError::Transport {
        reason: error.to_string(),
    }
}

/// An empty body decodes as JSON `null`.
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    if text.trim().is_empty() {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use reqwest::header::HeaderName;
    use serde_json::{json, Value};
    use tokio_test::{assert_err, assert_ok};

    async fn serve(router: Router) -> ApiClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        ApiClient::new(ClientConfig::new(format!("http://{addr}")).unwrap()).unwrap()
    }

    async fn unreachable_client() -> ApiClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        ApiClient::new(ClientConfig::new(format!("http://{addr}")).unwrap()).unwrap()
    }

    async fn echo_headers(headers: AxumHeaders) -> Json<Value> {
        let pick = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Json(json!({
            "content_type": pick("content-type"),
            "trace": pick("x-trace"),
        }))
    }

    #[tokio::test]
    async fn test_json_header_is_merged_with_caller_headers() {
        let client = serve(Router::new().route("/echo", post(echo_headers))).await;

        let mut extra = HeaderMap::new();
        extra.insert(
            HeaderName::from_static("x-trace"),
            HeaderValue::from_static("pass-7"),
        );
        let echoed: Value = assert_ok!(
            client
                .request_with_headers(Method::POST, "/echo", Some(&json!({})), extra)
                .await
        );

        assert_eq!(echoed["content_type"], "application/json");
        assert_eq!(echoed["trace"], "pass-7");
    }

    #[tokio::test]
    async fn test_caller_content_type_wins() {
        let client = serve(Router::new().route("/echo", post(echo_headers))).await;

        let mut extra = HeaderMap::new();
        extra.insert(CONTENT_TYPE, HeaderValue::from_static("application/merge-patch+json"));
        let echoed: Value = client
            .request_with_headers(Method::POST, "/echo", None::<&()>, extra)
            .await
            .unwrap();

        assert_eq!(echoed["content_type"], "application/merge-patch+json");
    }

    #[tokio::test]
    async fn test_non_success_carries_status_and_body() {
        let router = Router::new().route(
            "/agents/{id}",
            get(|| async { (StatusCode::NOT_FOUND, "Agent not found") }),
        );
        let client = serve(router).await;

        let error = assert_err!(client.get::<Value>("/agents/missing").await);
        match error {
            EvolveError::Http { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "Agent not found");
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_endpoint_rejects_non_array() {
        let router = Router::new().route("/agents", get(|| async { Json(json!({ "agents": [] })) }));
        let client = serve(router).await;

        let error = assert_err!(client.get_list::<Value>("/agents").await);
        assert!(matches!(
            error,
            EvolveError::UnexpectedShape { expected: "array", found: "object", .. }
        ));
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_decode_error() {
        let router = Router::new().route("/goals", get(|| async { "{not json" }));
        let client = serve(router).await;

        let error = assert_err!(client.get::<Value>("/goals").await);
        assert!(matches!(error, EvolveError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_empty_body_decodes_as_null() {
        let router = Router::new().route("/goals/{id}", delete(|| async { StatusCode::NO_CONTENT }));
        let client = serve(router).await;

        let value: Value = assert_ok!(client.delete("/goals/g-1").await);
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        let client = unreachable_client().await;

        let error = assert_err!(client.get::<Value>("/agents").await);
        assert!(matches!(error, EvolveError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_probe_reports_status_without_failing() {
        let router = Router::new().route(
            "/health",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let client = serve(router).await;

        let probe = client.probe().await;
        assert!(!probe.success);
        assert_eq!(probe.status, Some(503));
        assert_eq!(probe.error, None);
    }

    #[tokio::test]
    async fn test_probe_reports_transport_error() {
        let client = unreachable_client().await;

        let probe = client.probe().await;
        assert!(!probe.success);
        assert_eq!(probe.status, None);
        assert!(probe.error.is_some());
    }
}
