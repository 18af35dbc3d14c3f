//! SQLite-backed project store (single `projects` table).

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use atelier_core::types::{ProjectId, Timestamp};

use crate::models::project::{NewProject, Project};
use crate::models::status::{ProjectStatus, ProjectType};
use crate::DbPool;

use super::{check_transition, object_or_empty, ProjectStore, StoreError, MAX_LIST_LIMIT};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_type, title, input_data, output_data, status, created_at, updated_at";

/// Durable store over a SQLite connection pool.
pub struct SqliteStore {
    pool: DbPool,
}

/// Raw row shape; TEXT columns are decoded into domain types by
/// [`Project::try_from`].
#[derive(Debug, FromRow)]
struct ProjectRow {
    id: String,
    project_type: String,
    title: String,
    input_data: String,
    output_data: String,
    status: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl TryFrom<ProjectRow> for Project {
    type Error = StoreError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let id: ProjectId = row
            .id
            .parse()
            .map_err(|_| StoreError::Corrupt(format!("invalid project id: {}", row.id)))?;
        let project_type: ProjectType = row
            .project_type
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("{e}")))?;
        let status: ProjectStatus = row
            .status
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("{e}")))?;

        Ok(Project {
            id,
            project_type,
            title: row.title,
            input_data: parse_json_or_empty(&row.input_data),
            output_data: parse_json_or_empty(&row.output_data),
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Payload columns default to an empty mapping rather than failing a read.
fn parse_json_or_empty(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

fn encode_json(value: &Value) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Corrupt(format!("unencodable payload: {e}")))
}

impl SqliteStore {
    /// Wrap an existing pool. The schema must already be migrated.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and apply migrations in one step.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn fetch(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?1");
        let row: Option<ProjectRow> = sqlx::query_as(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Project::try_from).transpose()
    }
}

#[async_trait]
impl ProjectStore for SqliteStore {
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

        let query = format!(
            "INSERT INTO projects ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        );
        sqlx::query(&query)
            .bind(project.id.to_string())
            .bind(project.project_type.as_str())
            .bind(&project.title)
            .bind(encode_json(&project.input_data)?)
            .bind(encode_json(&project.output_data)?)
            .bind(project.status.as_str())
            .bind(project.created_at)
            .bind(project.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(project)
    }

    async fn update(
        &self,
        id: ProjectId,
        output_data: Value,
        status: ProjectStatus,
    ) -> Result<Project, StoreError> {
        let mut project = self.fetch(id).await?.ok_or(StoreError::NotFound(id))?;

        check_transition(&project, status)?;

        project.output_data = object_or_empty(output_data);
        project.status = status;
        project.updated_at = Utc::now();

        sqlx::query(
            "UPDATE projects SET output_data = ?2, status = ?3, updated_at = ?4 WHERE id = ?1",
        )
        .bind(project.id.to_string())
        .bind(encode_json(&project.output_data)?)
        .bind(project.status.as_str())
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(project)
    }

    async fn get(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        self.fetch(id).await
    }

    async fn list(
        &self,
        project_type: Option<ProjectType>,
        limit: usize,
    ) -> Result<Vec<Project>, StoreError> {
        let limit = limit.min(MAX_LIST_LIMIT) as i64;

        let rows: Vec<ProjectRow> = match project_type {
            Some(ty) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM projects WHERE project_type = ?1 \
                     ORDER BY created_at DESC LIMIT ?2"
                );
                sqlx::query_as(&query)
                    .bind(ty.as_str())
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query =
                    format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC LIMIT ?1");
                sqlx::query_as(&query).bind(limit).fetch_all(&self.pool).await?
            }
        };

        rows.into_iter().map(Project::try_from).collect()
    }
}
