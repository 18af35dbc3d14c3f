//! Store conformance scenarios shared by both backend test suites.
//!
//! Each function takes `&dyn ProjectStore` so the in-memory and SQLite
//! suites exercise identical behaviour.

use assert_matches::assert_matches;
use serde_json::json;

use atelier_db::models::project::NewProject;
use atelier_db::models::status::{ProjectStatus, ProjectType};
use atelier_db::{ProjectStore, StoreError};

/// A minimal valid submission payload.
pub fn new_project(project_type: ProjectType) -> NewProject {
    NewProject {
        project_type,
        title: project_type.default_title().to_string(),
        input_data: json!({ "requirement": "build a dashboard for the sales team" }),
    }
}

pub async fn create_starts_processing(store: &dyn ProjectStore) {
    let created = store
        .create(new_project(ProjectType::Prototype))
        .await
        .unwrap();

    assert_eq!(created.status, ProjectStatus::Processing);
    assert!(!created.input_data.as_object().unwrap().is_empty());
    assert!(created.output_data.as_object().unwrap().is_empty());
    assert_eq!(created.created_at, created.updated_at);

    let fetched = store.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.status, ProjectStatus::Processing);
    assert_eq!(fetched.input_data, created.input_data);
}

pub async fn update_writes_terminal_state_once(store: &dyn ProjectStore) {
    let created = store.create(new_project(ProjectType::Code)).await.unwrap();

    let updated = store
        .update(created.id, json!({ "review": { "issues": [] } }), ProjectStatus::Completed)
        .await
        .unwrap();

    assert_eq!(updated.status, ProjectStatus::Completed);
    assert_eq!(updated.output_data["review"]["issues"], json!([]));
    assert!(updated.updated_at >= created.created_at);

    // Terminal records are immutable.
    let err = store
        .update(created.id, json!({ "error": "late write" }), ProjectStatus::Failed)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::InvalidTransition { .. });

    // The stored record is untouched by the rejected write.
    let fetched = store.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.status, ProjectStatus::Completed);
    assert_eq!(fetched.output_data["review"]["issues"], json!([]));
}

pub async fn update_rejects_processing_target(store: &dyn ProjectStore) {
    let created = store.create(new_project(ProjectType::Data)).await.unwrap();

    let err = store
        .update(created.id, json!({}), ProjectStatus::Processing)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::InvalidTransition { .. });
}

pub async fn update_unknown_id_is_not_found(store: &dyn ProjectStore) {
    let id = uuid::Uuid::new_v4();
    let err = store
        .update(id, json!({ "error": "boom" }), ProjectStatus::Failed)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::NotFound(missing) if missing == id);
}

pub async fn get_unknown_id_is_none(store: &dyn ProjectStore) {
    assert!(store.get(uuid::Uuid::new_v4()).await.unwrap().is_none());
}

pub async fn list_filters_orders_and_truncates(store: &dyn ProjectStore) {
    let mut code_ids = Vec::new();
    for _ in 0..3 {
        code_ids.push(store.create(new_project(ProjectType::Code)).await.unwrap().id);
        // Distinct created_at values keep the ordering assertion exact.
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    store.create(new_project(ProjectType::Design)).await.unwrap();

    let listed = store.list(Some(ProjectType::Code), 2).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|p| p.project_type == ProjectType::Code));
    // Newest first: the two most recent code projects, in reverse creation order.
    assert_eq!(listed[0].id, code_ids[2]);
    assert_eq!(listed[1].id, code_ids[1]);

    let all = store.list(None, 50).await.unwrap();
    assert_eq!(all.len(), 4);
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}
