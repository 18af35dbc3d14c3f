//! HTTP handlers, one module per resource, plus the shared submit and
//! lookup plumbing every task type goes through.

pub mod code;
pub mod data;
pub mod debug;
pub mod design;
pub mod health;
pub mod projects;
pub mod prototype;

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use atelier_core::error::CoreError;
use atelier_core::types::ProjectId;
use atelier_db::models::project::NewProject;
use atelier_db::models::status::{ProjectStatus, ProjectType};

use crate::error::{AppError, AppResult};
use crate::jobs::{self, JobInput};
use crate::response::{ProjectResponse, SubmitResponse, SyncSubmitResponse};
use crate::state::AppState;

/// Minimum length for free-text requirement and code inputs.
pub const MIN_INPUT_LEN: usize = 10;

/// Query parameters shared by all submit endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitQuery {
    /// `sync` awaits the model call inline; otherwise the endpoint
    /// acknowledges immediately and runs it in the background.
    pub mode: Option<String>,
}

impl SubmitQuery {
    pub fn is_sync(&self) -> bool {
        self.mode.as_deref() == Some("sync")
    }
}

/// Validate a free-text input field against [`MIN_INPUT_LEN`], measured
/// on the trimmed text.
pub(crate) fn require_min_len(field: &str, value: &str) -> AppResult<()> {
    if value.trim().chars().count() < MIN_INPUT_LEN {
        return Err(CoreError::Validation(format!(
            "{field} is too short; provide at least {MIN_INPUT_LEN} characters"
        ))
        .into());
    }
    Ok(())
}

/// Create the project record, then run the job in the requested mode.
///
/// Async mode responds with the project id before the background task
/// completes; sync mode awaits the same completion handler inline and
/// responds with the terminal project.
pub(crate) async fn submit(
    state: AppState,
    new: NewProject,
    input: JobInput,
    sync: bool,
    ack: &'static str,
    done: &'static str,
) -> AppResult<Response> {
    let project = state.store.create(new).await?;
    tracing::info!(
        project_id = %project.id,
        project_type = %project.project_type,
        "Job submitted",
    );

    if sync {
        jobs::run(state.clone(), project.id, input).await;
        let project = state
            .store
            .get(project.id)
            .await?
            .ok_or_else(|| AppError::InternalError("submitted project vanished".into()))?;

        // Failures come back in the same round trip, with the provider's
        // message. The failed record remains visible via the detail and
        // listing endpoints.
        if project.status == ProjectStatus::Failed {
            let message = project
                .output_data
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("job failed")
                .to_string();
            return Err(AppError::Upstream(message));
        }

        return Ok(Json(SyncSubmitResponse {
            success: true,
            project,
            message: done,
        })
        .into_response());
    }

    jobs::spawn(state, project.id, input);
    Ok(Json(SubmitResponse {
        success: true,
        project_id: project.id,
        message: ack,
    })
    .into_response())
}

/// Fetch a project and require it to match the route's task type.
pub(crate) async fn find_by_type(
    state: &AppState,
    id: ProjectId,
    expected: ProjectType,
) -> AppResult<Json<ProjectResponse>> {
    let project = state
        .store
        .get(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    if project.project_type != expected {
        return Err(AppError::BadRequest("Project type mismatch".into()));
    }

    Ok(Json(ProjectResponse {
        success: true,
        project,
    }))
}
