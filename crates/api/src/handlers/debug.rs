//! Configuration introspection endpoint.
//!
//! Reports whether a model credential is configured and its redacted
//! preview. The full key is never exposed here or anywhere else.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use atelier_core::types::Timestamp;

use crate::state::AppState;

/// Response body for `GET /api/debug`.
#[derive(Debug, Serialize)]
pub struct DebugResponse {
    pub status: &'static str,
    pub environment: String,
    pub api_key: ApiKeyInfo,
    pub timestamp: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct ApiKeyInfo {
    pub configured: bool,
    pub preview: String,
}

/// GET /api/debug
pub async fn debug_info(State(state): State<AppState>) -> Json<DebugResponse> {
    let preview = state.config.credential_preview.clone();

    Json(DebugResponse {
        status: "ok",
        environment: state.config.environment.clone(),
        api_key: ApiKeyInfo {
            configured: preview.is_some(),
            preview: preview.unwrap_or_else(|| "not configured".to_string()),
        },
        timestamp: Utc::now(),
    })
}
