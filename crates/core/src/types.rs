/// Opaque unique identifier for a project. Allocated once at creation
/// (UUID v4) and never reused.
pub type ProjectId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
