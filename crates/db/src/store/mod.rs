//! Persistence boundary for project records.
//!
//! The two backends ([`MemoryStore`] and [`SqliteStore`]) are functionally
//! identical; callers hold an `Arc<dyn ProjectStore>` and never know which
//! one is behind it.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde_json::Value;

use atelier_core::types::ProjectId;

use crate::models::project::{NewProject, Project};
use crate::models::status::{ProjectStatus, ProjectType};

/// Default page size for project listings.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Maximum page size for project listings.
pub const MAX_LIST_LIMIT: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("project {0} not found")]
    NotFound(ProjectId),

    /// Status transitions are forward-only: a terminal record is immutable
    /// and `processing` is never a valid update target.
    #[error("invalid status transition for project {id}: {from} -> {to}")]
    InvalidTransition {
        id: ProjectId,
        from: ProjectStatus,
        to: ProjectStatus,
    },

    #[error("corrupt stored record: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// CRUD surface shared by both store backends.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Insert a new record in `processing` state with fresh timestamps.
    async fn create(&self, new: NewProject) -> Result<Project, StoreError>;

    /// Record the terminal outcome of a job: overwrite `output_data`, set
    /// the status, and refresh `updated_at`.
    ///
    /// Fails with [`StoreError::NotFound`] for an unknown id and with
    /// [`StoreError::InvalidTransition`] when the record is already
    /// terminal or `status` is not terminal.
    async fn update(
        &self,
        id: ProjectId,
        output_data: Value,
        status: ProjectStatus,
    ) -> Result<Project, StoreError>;

    /// Fetch an owned copy of a record, or `None` for an unknown id.
    async fn get(&self, id: ProjectId) -> Result<Option<Project>, StoreError>;

    /// List records, newest first, optionally filtered by type and
    /// truncated to `limit` (capped at [`MAX_LIST_LIMIT`]).
    async fn list(
        &self,
        project_type: Option<ProjectType>,
        limit: usize,
    ) -> Result<Vec<Project>, StoreError>;
}

/// Reject any status transition other than `processing` -> terminal.
fn check_transition(current: &Project, to: ProjectStatus) -> Result<(), StoreError> {
    if current.status.is_terminal() || !to.is_terminal() {
        return Err(StoreError::InvalidTransition {
            id: current.id,
            from: current.status,
            to,
        });
    }
    Ok(())
}

/// Stored payloads are always JSON objects at minimum; `null` collapses to
/// an empty mapping.
fn object_or_empty(value: Value) -> Value {
    if value.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        value
    }
}
