//! Integration tests for project detail, listing, and introspection
//! endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, MockGateway};
use serde_json::json;

use atelier_db::models::project::NewProject;
use atelier_db::models::status::ProjectType;
use atelier_db::ProjectStore;

// ---------------------------------------------------------------------------
// Detail endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_project_id_returns_404() {
    let (app, _store) = build_test_app(MockGateway::Hanging);

    let response = get(
        app,
        &format!("/api/prototype/{}", uuid::Uuid::new_v4()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn mismatched_project_type_returns_400() {
    let (app, store) = build_test_app(MockGateway::Hanging);

    let project = store
        .create(NewProject {
            project_type: ProjectType::Code,
            title: "Code review".to_string(),
            input_data: json!({ "code": "fn main() { println!(\"hi\"); }" }),
        })
        .await
        .unwrap();

    let response = get(app, &format!("/api/prototype/{}", project.id)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn detail_returns_project_envelope() {
    let (app, store) = build_test_app(MockGateway::Hanging);

    let project = store
        .create(NewProject {
            project_type: ProjectType::Design,
            title: "New design".to_string(),
            input_data: json!({ "requirement": "brand refresh for the docs site" }),
        })
        .await
        .unwrap();

    let response = get(app, &format!("/api/design/{}", project.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["project"]["id"], project.id.to_string());
    assert_eq!(body["project"]["type"], "design");
    assert_eq!(body["project"]["status"], "processing");
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_filters_by_type_and_truncates() {
    let (app, store) = build_test_app(MockGateway::Hanging);

    let mut code_ids = Vec::new();
    for i in 0..3 {
        let project = store
            .create(NewProject {
                project_type: ProjectType::Code,
                title: format!("review {i}"),
                input_data: json!({ "code": "const x = 1;" }),
            })
            .await
            .unwrap();
        code_ids.push(project.id);
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    store
        .create(NewProject {
            project_type: ProjectType::Prototype,
            title: "New prototype".to_string(),
            input_data: json!({ "requirement": "a settings page" }),
        })
        .await
        .unwrap();

    let response = get(app, "/api/projects?type=code&limit=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let projects = body["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().all(|p| p["type"] == "code"));
    // Newest first.
    assert_eq!(projects[0]["id"], code_ids[2].to_string());
    assert_eq!(projects[1]["id"], code_ids[1].to_string());
}

#[tokio::test]
async fn list_with_unknown_type_returns_400() {
    let (app, _store) = build_test_app(MockGateway::Hanging);

    let response = get(app, "/api/projects?type=spreadsheet").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Introspection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn debug_reports_unconfigured_credential_without_leaking() {
    let (app, _store) = build_test_app(MockGateway::Hanging);

    let response = get(app, "/api/debug").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["api_key"]["configured"], false);
    assert_eq!(body["api_key"]["preview"], "not configured");
}
