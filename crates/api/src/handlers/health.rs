//! Liveness probe.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use atelier_core::types::Timestamp;

use crate::state::AppState;

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: Timestamp,
    pub environment: String,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        environment: state.config.environment.clone(),
    })
}
