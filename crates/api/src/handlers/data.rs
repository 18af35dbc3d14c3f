//! Handlers for the `/data` resource.
//!
//! Spreadsheets are decoded to JSON tables upstream; this service only
//! ever sees structured payloads and retains nothing beyond the project
//! record itself.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use atelier_core::error::CoreError;
use atelier_core::types::ProjectId;
use atelier_db::models::project::NewProject;
use atelier_db::models::status::ProjectType;

use crate::error::AppResult;
use crate::jobs::JobInput;
use crate::response::ProjectResponse;
use crate::state::AppState;

use super::{find_by_type, submit, SubmitQuery};

/// One uploaded file, decoded to JSON tables by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct FilePayload {
    pub name: String,
    /// Sheet-name to row-array mapping (or any table-shaped JSON).
    #[serde(default)]
    pub tables: Value,
}

/// Request body for `POST /api/data/analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub files: Vec<FilePayload>,
    pub title: Option<String>,
}

/// POST /api/data/analyze
///
/// Analyses the first file; the file count and names are recorded on the
/// project for reference.
pub async fn analyze(
    State(state): State<AppState>,
    Query(query): Query<SubmitQuery>,
    Json(body): Json<AnalyzeRequest>,
) -> AppResult<Response> {
    if body.files.is_empty() {
        return Err(CoreError::Validation("At least one data file is required".into()).into());
    }

    let filenames: Vec<&str> = body.files.iter().map(|f| f.name.as_str()).collect();
    let new = NewProject {
        project_type: ProjectType::Data,
        title: body
            .title
            .unwrap_or_else(|| ProjectType::Data.default_title().to_string()),
        input_data: json!({
            "fileCount": body.files.len(),
            "filenames": filenames,
        }),
    };
    let input = JobInput::Data {
        tables: body.files[0].tables.clone(),
        file_count: body.files.len(),
    };

    submit(
        state,
        new,
        input,
        query.is_sync(),
        "Data analysis task submitted",
        "Data analysis complete",
    )
    .await
}

/// GET /api/data/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> AppResult<Json<ProjectResponse>> {
    find_by_type(&state, id, ProjectType::Data).await
}
