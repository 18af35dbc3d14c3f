//! Project entity model and DTOs.

use atelier_core::types::{ProjectId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::status::{ProjectStatus, ProjectType};

/// One tracked unit of work, from submission to its terminal state.
///
/// `input_data` is fixed at creation; `output_data` is written exactly
/// once, by the background completion handler, together with the terminal
/// status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub title: String,
    pub input_data: Value,
    pub output_data: Value,
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project record.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub project_type: ProjectType,
    pub title: String,
    pub input_data: Value,
}
