use crate::client::GatewayError;

/// Default OpenRouter API base URL.
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "anthropic/claude-3.5-sonnet";

/// Gateway configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// OpenRouter API key. Required; an empty value is a configuration
    /// error, not a silent default.
    pub api_key: String,
    /// Base API URL.
    pub api_url: String,
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Value for the `HTTP-Referer` attribution header.
    pub referer: String,
    /// Value for the `X-Title` attribution header.
    pub app_title: String,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Default                            |
    /// |-----------------------|------------------------------------|
    /// | `OPENROUTER_API_KEY`  | *(required)*                       |
    /// | `OPENROUTER_API_URL`  | `https://openrouter.ai/api/v1`     |
    /// | `OPENROUTER_MODEL`    | `anthropic/claude-3.5-sonnet`      |
    /// | `APP_URL`             | `http://localhost:3000`            |
    /// | `APP_TITLE`           | `Atelier Workbench`                |
    ///
    /// Fails with [`GatewayError::MissingCredential`] when the API key is
    /// unset or empty.
    pub fn from_env() -> Result<Self, GatewayError> {
        let api_key = std::env::var("OPENROUTER_API_KEY").unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(GatewayError::MissingCredential);
        }

        Ok(Self {
            api_key,
            api_url: std::env::var("OPENROUTER_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.into()),
            model: std::env::var("OPENROUTER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            referer: std::env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".into()),
            app_title: std::env::var("APP_TITLE").unwrap_or_else(|_| "Atelier Workbench".into()),
        })
    }

    /// Redacted preview of the API key for logs and diagnostics: first 10
    /// and last 4 characters. Never the full key.
    pub fn key_preview(&self) -> String {
        let key = &self.api_key;
        match (key.get(..10), key.get(key.len().saturating_sub(4)..)) {
            (Some(head), Some(tail)) if key.len() > 14 => format!("{head}...{tail}"),
            _ => "***".to_string(),
        }
    }
}
