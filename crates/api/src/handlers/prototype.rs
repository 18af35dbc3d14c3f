//! Handlers for the `/prototype` resource.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use atelier_core::types::ProjectId;
use atelier_db::models::project::NewProject;
use atelier_db::models::status::ProjectType;

use crate::error::AppResult;
use crate::jobs::JobInput;
use crate::response::ProjectResponse;
use crate::state::AppState;

use super::{find_by_type, require_min_len, submit, SubmitQuery};

/// Request body for `POST /api/prototype/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub requirement: String,
    pub title: Option<String>,
}

/// POST /api/prototype/generate
///
/// Validates the requirement, creates a `processing` project, and runs
/// prototype generation in the background (or inline with `?mode=sync`).
pub async fn generate(
    State(state): State<AppState>,
    Query(query): Query<SubmitQuery>,
    Json(body): Json<GenerateRequest>,
) -> AppResult<Response> {
    require_min_len("Requirement", &body.requirement)?;

    let new = NewProject {
        project_type: ProjectType::Prototype,
        title: body
            .title
            .unwrap_or_else(|| ProjectType::Prototype.default_title().to_string()),
        input_data: json!({ "requirement": body.requirement.clone() }),
    };
    let input = JobInput::Prototype {
        requirement: body.requirement,
    };

    submit(
        state,
        new,
        input,
        query.is_sync(),
        "Prototype generation task submitted",
        "Prototype generated",
    )
    .await
}

/// GET /api/prototype/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> AppResult<Json<ProjectResponse>> {
    find_by_type(&state, id, ProjectType::Prototype).await
}
