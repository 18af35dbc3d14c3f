//! Background job execution for submitted projects.
//!
//! Each submission produces exactly one completion handler run — the sole
//! writer of the project's terminal state. Gateway success stores the
//! extracted output as `completed`; any gateway failure stores
//! `{"error": ...}` as `failed`. Nothing escapes the spawned task: a
//! panic-free, error-free exit is guaranteed by catching every failure
//! path here.

use serde_json::{json, Value};

use atelier_core::types::ProjectId;
use atelier_db::models::status::{ProjectStatus, ProjectType};
use atelier_gateway::tasks;

use crate::state::AppState;

/// Typed work order carried from the submit handler to the completion
/// handler.
#[derive(Debug, Clone)]
pub enum JobInput {
    Prototype {
        requirement: String,
    },
    /// Tables of the first uploaded file; `file_count` is echoed into the
    /// output payload.
    Data {
        tables: Value,
        file_count: usize,
    },
    Code {
        code: String,
    },
    Design {
        requirement: String,
        brand_settings: Value,
    },
}

impl JobInput {
    pub fn project_type(&self) -> ProjectType {
        match self {
            JobInput::Prototype { .. } => ProjectType::Prototype,
            JobInput::Data { .. } => ProjectType::Data,
            JobInput::Code { .. } => ProjectType::Code,
            JobInput::Design { .. } => ProjectType::Design,
        }
    }
}

/// Launch the completion handler without blocking the caller. The HTTP
/// response is sent before this task necessarily finishes.
pub fn spawn(state: AppState, id: ProjectId, input: JobInput) {
    tokio::spawn(async move {
        run(state, id, input).await;
    });
}

/// Run one job to its terminal state. Called directly by synchronous
/// submissions and via [`spawn`] by asynchronous ones.
pub async fn run(state: AppState, id: ProjectId, input: JobInput) {
    let project_type = input.project_type();

    let outcome = match &input {
        JobInput::Prototype { requirement } => {
            tasks::generate_prototype(state.gateway.as_ref(), requirement).await
        }
        JobInput::Data { tables, file_count } => {
            tasks::analyze_data(state.gateway.as_ref(), tables)
                .await
                .map(|mut output| {
                    output["fileCount"] = json!(file_count);
                    output
                })
        }
        JobInput::Code { code } => tasks::review_code(state.gateway.as_ref(), code).await,
        JobInput::Design {
            requirement,
            brand_settings,
        } => tasks::generate_design(state.gateway.as_ref(), requirement, brand_settings).await,
    };

    let (output_data, status) = match outcome {
        Ok(output) => (output, ProjectStatus::Completed),
        Err(e) => {
            tracing::warn!(project_id = %id, %project_type, error = %e, "Model call failed");
            (json!({ "error": e.to_string() }), ProjectStatus::Failed)
        }
    };

    match state.store.update(id, output_data, status).await {
        Ok(_) => {
            tracing::info!(project_id = %id, %project_type, %status, "Job finished");
        }
        Err(e) => {
            tracing::error!(project_id = %id, error = %e, "Failed to record job outcome");
        }
    }
}
