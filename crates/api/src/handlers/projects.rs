//! Handlers for the cross-type `/projects` listing.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use atelier_db::models::status::ProjectType;
use atelier_db::store::DEFAULT_LIST_LIMIT;

use crate::error::{AppError, AppResult};
use crate::response::ProjectListResponse;
use crate::state::AppState;

/// Query parameters for `GET /api/projects`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter to a single task type.
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<usize>,
}

/// GET /api/projects
///
/// List projects, newest first, optionally filtered by type.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ProjectListResponse>> {
    let filter = match query.project_type.as_deref() {
        Some(raw) => Some(
            raw.parse::<ProjectType>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
        ),
        None => None,
    };

    let projects = state
        .store
        .list(filter, query.limit.unwrap_or(DEFAULT_LIST_LIMIT))
        .await?;

    Ok(Json(ProjectListResponse {
        success: true,
        projects,
    }))
}
