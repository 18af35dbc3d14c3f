//! Handlers for the `/design` resource.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use atelier_core::types::ProjectId;
use atelier_db::models::project::NewProject;
use atelier_db::models::status::ProjectType;

use crate::error::AppResult;
use crate::jobs::JobInput;
use crate::response::ProjectResponse;
use crate::state::AppState;

use super::{find_by_type, require_min_len, submit, SubmitQuery};

/// Request body for `POST /api/design/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub requirement: String,
    pub title: Option<String>,
    #[serde(rename = "brandSettings", default)]
    pub brand_settings: Value,
}

/// POST /api/design/generate
pub async fn generate(
    State(state): State<AppState>,
    Query(query): Query<SubmitQuery>,
    Json(body): Json<GenerateRequest>,
) -> AppResult<Response> {
    require_min_len("Design brief", &body.requirement)?;

    let brand_settings = if body.brand_settings.is_null() {
        json!({})
    } else {
        body.brand_settings
    };

    let new = NewProject {
        project_type: ProjectType::Design,
        title: body
            .title
            .unwrap_or_else(|| ProjectType::Design.default_title().to_string()),
        input_data: json!({
            "requirement": body.requirement,
            "brandSettings": brand_settings.clone(),
        }),
    };
    let input = JobInput::Design {
        requirement: body.requirement,
        brand_settings,
    };

    submit(
        state,
        new,
        input,
        query.is_sync(),
        "Design generation task submitted",
        "Design generation complete",
    )
    .await
}

/// GET /api/design/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> AppResult<Json<ProjectResponse>> {
    find_by_type(&state, id, ProjectType::Design).await
}
