//! Status and task-type enums, stored as lowercase TEXT.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a project.
///
/// Transitions only move forward: `Processing` to exactly one of
/// `Completed` or `Failed`. The store rejects any other transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Processing,
    Completed,
    Failed,
}

impl ProjectStatus {
    /// Lowercase wire/database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Processing => "processing",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Failed => "failed",
        }
    }

    /// Whether the status permits no further mutation.
    pub fn is_terminal(self) -> bool {
        !matches!(self, ProjectStatus::Processing)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown project status: {0}")]
pub struct InvalidStatus(pub String);

impl std::str::FromStr for ProjectStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(ProjectStatus::Processing),
            "completed" => Ok(ProjectStatus::Completed),
            "failed" => Ok(ProjectStatus::Failed),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// Task type of a project, fixed at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Prototype,
    Data,
    Code,
    Design,
}

impl ProjectType {
    /// Lowercase wire/database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Prototype => "prototype",
            ProjectType::Data => "data",
            ProjectType::Code => "code",
            ProjectType::Design => "design",
        }
    }

    /// Display title used when a submission omits one.
    pub fn default_title(self) -> &'static str {
        match self {
            ProjectType::Prototype => "New prototype",
            ProjectType::Data => "Data analysis",
            ProjectType::Code => "Code review",
            ProjectType::Design => "New design",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown project type: {0}")]
pub struct InvalidProjectType(pub String);

impl std::str::FromStr for ProjectType {
    type Err = InvalidProjectType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prototype" => Ok(ProjectType::Prototype),
            "data" => Ok(ProjectType::Data),
            "code" => Ok(ProjectType::Code),
            "design" => Ok(ProjectType::Design),
            other => Err(InvalidProjectType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            ProjectStatus::Processing,
            ProjectStatus::Completed,
            ProjectStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<ProjectStatus>().unwrap(), status);
        }
    }

    #[test]
    fn only_processing_is_non_terminal() {
        assert!(!ProjectStatus::Processing.is_terminal());
        assert!(ProjectStatus::Completed.is_terminal());
        assert!(ProjectStatus::Failed.is_terminal());
    }

    #[test]
    fn type_round_trips_through_str() {
        for ty in [
            ProjectType::Prototype,
            ProjectType::Data,
            ProjectType::Code,
            ProjectType::Design,
        ] {
            assert_eq!(ty.as_str().parse::<ProjectType>().unwrap(), ty);
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!("spreadsheet".parse::<ProjectType>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::Processing).unwrap(),
            "\"processing\""
        );
    }
}
