//! Shared helpers for API integration tests.
//!
//! Builds the full application router (same middleware stack as
//! `main.rs`) over an in-memory store and a scripted gateway double, and
//! provides the usual request/body helpers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use atelier_api::config::ServerConfig;
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_core::types::ProjectId;
use atelier_db::models::project::Project;
use atelier_db::models::status::ProjectStatus;
use atelier_db::{MemoryStore, ProjectStore};
use atelier_gateway::{ChatMessage, GatewayError, ModelGateway};

/// Scripted gateway double.
pub enum MockGateway {
    /// Every call succeeds with this text.
    Replying(String),
    /// Every call fails with a provider error carrying this message.
    Failing(String),
    /// Calls never return, so projects stay `processing`.
    Hanging,
}

#[async_trait]
impl ModelGateway for MockGateway {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _max_tokens: u32,
    ) -> Result<String, GatewayError> {
        match self {
            MockGateway::Replying(text) => Ok(text.clone()),
            MockGateway::Failing(message) => Err(GatewayError::Provider {
                status: 500,
                message: message.clone(),
            }),
            MockGateway::Hanging => std::future::pending().await,
        }
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        environment: "test".to_string(),
        max_projects: None,
        credential_preview: None,
    }
}

/// Build the application router plus a handle on the backing store, so
/// tests can observe job state directly.
pub fn build_test_app(gateway: MockGateway) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let config = test_config();
    let state = AppState {
        store: store.clone(),
        gateway: Arc::new(gateway),
        config: Arc::new(config.clone()),
    };
    (build_app_router(state, &config), store)
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
    )
    .await
    .expect("response")
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("JSON body")
}

/// Parse the `projectId` out of a submit acknowledgement body.
pub fn project_id(body: &serde_json::Value) -> ProjectId {
    body["projectId"]
        .as_str()
        .expect("projectId field")
        .parse()
        .expect("valid project id")
}

/// Poll the store until the project leaves `processing`.
pub async fn wait_for_terminal(store: &MemoryStore, id: ProjectId) -> Project {
    for _ in 0..100 {
        if let Some(project) = store.get(id).await.expect("store read") {
            if project.status != ProjectStatus::Processing {
                return project;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("project {id} never reached a terminal state");
}
