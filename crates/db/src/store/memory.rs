//! In-memory project store backed by an id-keyed map.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use atelier_core::types::ProjectId;

use crate::models::project::{NewProject, Project};
use crate::models::status::{ProjectStatus, ProjectType};

use super::{check_transition, object_or_empty, ProjectStore, StoreError, MAX_LIST_LIMIT};

/// Map-backed store, suitable for single-process deployments and tests.
///
/// Optionally bounded: when `max_records` is reached, the oldest terminal
/// record is evicted before a new insert. Records still `processing` are
/// never evicted, so a burst of in-flight jobs can exceed the bound until
/// they settle.
pub struct MemoryStore {
    max_records: Option<usize>,
    projects: RwLock<HashMap<ProjectId, Project>>,
}

impl MemoryStore {
    /// Unbounded store.
    pub fn new() -> Self {
        Self {
            max_records: None,
            projects: RwLock::new(HashMap::new()),
        }
    }

    /// Store bounded to `max_records` retained records.
    pub fn with_capacity(max_records: usize) -> Self {
        Self {
            max_records: Some(max_records),
            projects: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create(&self, new: NewProject) -> Result<Project, StoreError> {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            project_type: new.project_type,
            title: new.title,
            input_data: object_or_empty(new.input_data),
            output_data: Value::Object(serde_json::Map::new()),
            status: ProjectStatus::Processing,
            created_at: now,
            updated_at: now,
        };

        let mut projects = self.projects.write().await;

        if let Some(max) = self.max_records {
            if projects.len() >= max {
                let victim = projects
                    .values()
                    .filter(|p| p.status.is_terminal())
                    .min_by_key(|p| p.created_at)
                    .map(|p| p.id);
                if let Some(id) = victim {
                    projects.remove(&id);
                    tracing::debug!(project_id = %id, "Evicted oldest terminal project");
                }
            }
        }

        projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update(
        &self,
        id: ProjectId,
        output_data: Value,
        status: ProjectStatus,
    ) -> Result<Project, StoreError> {
        let mut projects = self.projects.write().await;
        let project = projects.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        check_transition(project, status)?;

        project.output_data = object_or_empty(output_data);
        project.status = status;
        project.updated_at = Utc::now();
        Ok(project.clone())
    }

    async fn get(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn list(
        &self,
        project_type: Option<ProjectType>,
        limit: usize,
    ) -> Result<Vec<Project>, StoreError> {
        let projects = self.projects.read().await;
        let mut matching: Vec<Project> = projects
            .values()
            .filter(|p| project_type.map_or(true, |t| p.project_type == t))
            .cloned()
            .collect();

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit.min(MAX_LIST_LIMIT));
        Ok(matching)
    }
}
