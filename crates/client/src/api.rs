//! Typed reqwest client for the atelier HTTP API.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use atelier_core::types::ProjectId;
use atelier_db::models::project::Project;
use atelier_db::models::status::ProjectType;

use crate::poll::{poll_project, PollConfig, PollError};

/// Errors from the API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Polling a submitted job failed or timed out.
    #[error(transparent)]
    Poll(#[from] PollError),
}

/// Client for one atelier API server.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SubmitAck {
    #[serde(rename = "projectId")]
    project_id: ProjectId,
}

#[derive(Debug, Deserialize)]
struct ProjectEnvelope {
    project: Project,
}

#[derive(Debug, Deserialize)]
struct ProjectListEnvelope {
    projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
}

impl ApiClient {
    /// Create a client for the server at `base_url`
    /// (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Submit a prototype generation job; returns the new project id.
    pub async fn generate_prototype(
        &self,
        requirement: &str,
        title: Option<&str>,
    ) -> Result<ProjectId, ClientError> {
        self.submit(
            "prototype/generate",
            json!({ "requirement": requirement, "title": title }),
        )
        .await
    }

    /// Submit a data analysis job over pre-decoded file tables.
    pub async fn analyze_data(
        &self,
        files: Value,
        title: Option<&str>,
    ) -> Result<ProjectId, ClientError> {
        self.submit("data/analyze", json!({ "files": files, "title": title }))
            .await
    }

    /// Submit a code review job.
    pub async fn review_code(
        &self,
        code: &str,
        title: Option<&str>,
    ) -> Result<ProjectId, ClientError> {
        self.submit("code/review", json!({ "code": code, "title": title }))
            .await
    }

    /// Submit a design generation job.
    pub async fn generate_design(
        &self,
        requirement: &str,
        brand_settings: Value,
        title: Option<&str>,
    ) -> Result<ProjectId, ClientError> {
        self.submit(
            "design/generate",
            json!({
                "requirement": requirement,
                "brandSettings": brand_settings,
                "title": title,
            }),
        )
        .await
    }

    /// Fetch a project through its type-scoped detail endpoint.
    pub async fn get_project(
        &self,
        project_type: ProjectType,
        id: ProjectId,
    ) -> Result<Project, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/{}/{}", self.base_url, project_type, id))
            .send()
            .await?;
        let envelope: ProjectEnvelope = Self::parse_response(response).await?;
        Ok(envelope.project)
    }

    /// List projects, newest first, optionally filtered by type.
    pub async fn list_projects(
        &self,
        project_type: Option<ProjectType>,
        limit: Option<usize>,
    ) -> Result<Vec<Project>, ClientError> {
        let mut request = self.http.get(format!("{}/api/projects", self.base_url));
        if let Some(ty) = project_type {
            request = request.query(&[("type", ty.as_str())]);
        }
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let envelope: ProjectListEnvelope = Self::parse_response(request.send().await?).await?;
        Ok(envelope.projects)
    }

    /// Poll a submitted job until it reaches a terminal state.
    ///
    /// Resolves with the completed project, or fails with the stored error
    /// message (`failed`) or a timeout once the polling budget runs out.
    pub async fn wait_for(
        &self,
        project_type: ProjectType,
        id: ProjectId,
        config: &PollConfig,
    ) -> Result<Project, ClientError> {
        let project = poll_project(
            || async move {
                self.get_project(project_type, id)
                    .await
                    .map_err(|e| PollError::Fetch(e.to_string()))
            },
            config,
        )
        .await?;
        Ok(project)
    }

    async fn submit(&self, path: &str, body: Value) -> Result<ProjectId, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/{path}", self.base_url))
            .json(&body)
            .send()
            .await?;
        let ack: SubmitAck = Self::parse_response(response).await?;
        Ok(ack.project_id)
    }

    /// Decode a successful JSON response, or surface the server's error
    /// message from the `{"success": false, "message": ...}` envelope.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
