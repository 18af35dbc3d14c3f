//! Fixed-interval polling until a project reaches a terminal state.

use std::future::Future;
use std::time::Duration;

use atelier_db::models::project::Project;
use atelier_db::models::status::ProjectStatus;

/// Polling cadence and budget.
///
/// Defaults match the platform's protocol: a 2-second interval and 30
/// attempts, a 60-second budget. The interval is fixed; there is no
/// backoff.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 30,
        }
    }
}

/// Errors surfaced by [`poll_project`].
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// The job reached `failed`; carries the stored error description.
    #[error("job failed: {0}")]
    Failed(String),

    /// The attempt budget ran out while the job was still `processing`.
    #[error("timed out after {attempts} polling attempts")]
    TimedOut { attempts: u32 },

    /// A fetch itself failed (transport or API error).
    #[error("fetch failed: {0}")]
    Fetch(String),
}

/// Fetch a project repeatedly until it completes or fails.
///
/// `fetch` is called at most `max_attempts` times; the interval elapses
/// only between attempts. Resolves with the project on `completed`,
/// rejects with the stored error message on `failed`, and rejects with
/// [`PollError::TimedOut`] once the budget is exhausted. The timeout only
/// stops this caller from waiting; the job itself keeps running on the
/// server.
pub async fn poll_project<F, Fut>(mut fetch: F, config: &PollConfig) -> Result<Project, PollError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Project, PollError>>,
{
    for attempt in 1..=config.max_attempts {
        let project = fetch().await?;

        match project.status {
            ProjectStatus::Completed => return Ok(project),
            ProjectStatus::Failed => {
                let message = project
                    .output_data
                    .get("error")
                    .and_then(|e| e.as_str())
                    .unwrap_or("job failed")
                    .to_string();
                return Err(PollError::Failed(message));
            }
            ProjectStatus::Processing => {
                tracing::debug!(project_id = %project.id, attempt, "Still processing");
                if attempt < config.max_attempts {
                    tokio::time::sleep(config.interval).await;
                }
            }
        }
    }

    Err(PollError::TimedOut {
        attempts: config.max_attempts,
    })
}
