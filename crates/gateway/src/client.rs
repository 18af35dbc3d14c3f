//! HTTP client for the OpenRouter chat completions API.
//!
//! [`OpenRouterClient`] implements [`ModelGateway`], the seam the rest of
//! the platform programs against (and tests replace with doubles).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;

/// A single chat message in a completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    /// A user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Errors from the model gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No API credential is configured.
    #[error("no model API credential is configured")]
    MissingCredential,

    /// The provider returned a non-2xx response.
    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// The provider returned 2xx but no usable content.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// The HTTP request itself failed (network, DNS, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Boundary for outbound model calls.
///
/// One attempt per call. Errors propagate to the caller, which records
/// them on the owning project; nothing here retries or recovers.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send one chat completion request and return the assistant text.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, GatewayError>;
}

/// Client for the OpenRouter `/chat/completions` endpoint.
pub struct OpenRouterClient {
    http: reqwest::Client,
    config: GatewayConfig,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl OpenRouterClient {
    /// Create a new client from gateway configuration.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling).
    pub fn with_client(http: reqwest::Client, config: GatewayConfig) -> Self {
        Self { http, config }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

#[async_trait]
impl ModelGateway for OpenRouterClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, GatewayError> {
        if self.config.api_key.trim().is_empty() {
            return Err(GatewayError::MissingCredential);
        }

        let body = CompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens,
        };

        tracing::debug!(model = %self.config.model, max_tokens, "Requesting completion");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.app_title)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            // Prefer the provider's own error message when the body parses.
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .and_then(|error| error.message)
                .unwrap_or_else(|| format!("API request failed: {status}"));
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(GatewayError::EmptyResponse)
    }
}
