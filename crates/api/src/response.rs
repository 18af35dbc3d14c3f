//! Typed response envelopes for the HTTP surface.
//!
//! Every success payload carries `success: true` plus its data fields.
//! Use these instead of ad-hoc `serde_json::json!` maps so the wire
//! contract is checked at compile time.

use serde::Serialize;

use atelier_core::types::ProjectId;
use atelier_db::models::project::Project;

/// Acknowledgement returned by asynchronous submissions: the job is
/// tracked, poll the project for the outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub project_id: ProjectId,
    pub message: &'static str,
}

/// Envelope for a single project record.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub success: bool,
    pub project: Project,
}

/// Envelope for project listings.
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub success: bool,
    pub projects: Vec<Project>,
}

/// Terminal result returned by synchronous submissions.
#[derive(Debug, Serialize)]
pub struct SyncSubmitResponse {
    pub success: bool,
    pub project: Project,
    pub message: &'static str,
}
