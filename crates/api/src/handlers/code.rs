//! Handlers for the `/code` resource.

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

/// Request body for `POST /api/code/review`.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub code: String,
    pub title: Option<String>,
}

/// POST /api/code/review
pub async fn review(
    State(state): State<AppState>,
    Query(query): Query<SubmitQuery>,
    Json(body): Json<ReviewRequest>,
) -> AppResult<Response> {
    require_min_len("Code", &body.code)?;

    let new = NewProject {
        project_type: ProjectType::Code,
        title: body
            .title
            .unwrap_or_else(|| ProjectType::Code.default_title().to_string()),
        input_data: json!({ "code": body.code.clone() }),
    };
    let input = JobInput::Code { code: body.code };

    submit(
        state,
        new,
        input,
        query.is_sync(),
        "Code review task submitted",
        "Code review complete",
    )
    .await
}

/// GET /api/code/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> AppResult<Json<ProjectResponse>> {
    find_by_type(&state, id, ProjectType::Code).await
}
