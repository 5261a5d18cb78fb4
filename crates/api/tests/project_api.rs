//! HTTP-level integration tests for the `/projects` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener, backed by the in-memory store.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_project, delete, get, post_json, put, put_json};
use serde_json::json;
use todo_db::store::MemoryStore;

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_project_returns_201() {
    let app = common::build_test_app(MemoryStore::new());
    let response = post_json(
        app,
        "/projects",
        json!({"title": "Alpha", "description": "d"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Alpha");
    assert_eq!(json["description"], "d");
    assert_eq!(json["archived"], false);
    assert!(json["id"].is_number());
    assert!(json["created_at"].is_string());
    assert!(json["updated_at"].is_string());
}

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let app = common::build_test_app(MemoryStore::new());
    for (title, description) in [("Alpha", "first"), ("Q3 roadmap", ""), ("Ünïcode", "ß")] {
        post_json(
            app.clone(),
            "/projects",
            json!({"title": title, "description": description}),
        )
        .await;

        let encoded = title.replace(' ', "%20").replace('Ü', "%C3%9C").replace('ï', "%C3%AF");
        let response = get(app.clone(), &format!("/projects/{encoded}")).await;
        assert_eq!(response.status(), StatusCode::OK, "title {title}");

        let json = body_json(response).await;
        assert_eq!(json["title"], title);
        assert_eq!(json["description"], description);
    }
}

#[tokio::test]
async fn test_server_assigned_fields_in_body_are_ignored() {
    let app = common::build_test_app(MemoryStore::new());
    let response = post_json(
        app,
        "/projects",
        json!({"id": 999, "title": "Alpha", "archived": true}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["archived"], false);
    assert!(json["description"].is_null());
}

#[tokio::test]
async fn test_get_nonexistent_project_returns_404() {
    let app = common::build_test_app(MemoryStore::new());
    let response = get(app, "/projects/Missing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Project 'Missing' not found");
}

#[tokio::test]
async fn test_title_lookup_is_case_sensitive() {
    let app = common::build_test_app(MemoryStore::new());
    create_project(&app, "Alpha").await;

    let response = get(app, "/projects/alpha").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_projects_in_insertion_order() {
    let app = common::build_test_app(MemoryStore::new());
    create_project(&app, "Zeta").await;
    create_project(&app, "Alpha").await;

    let response = get(app, "/projects").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let titles: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["Zeta", "Alpha"]);
}

#[tokio::test]
async fn test_list_projects_empty() {
    let app = common::build_test_app(MemoryStore::new());
    let json = body_json(get(app, "/projects").await).await;
    assert_eq!(json, json!([]));
}

// ---------------------------------------------------------------------------
// Conflicts and validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_duplicate_title_returns_409_and_keeps_one_row() {
    let app = common::build_test_app(MemoryStore::new());
    create_project(&app, "Alpha").await;

    let response = post_json(app.clone(), "/projects", json!({"title": "Alpha"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Alpha"));

    let list = body_json(get(app, "/projects").await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_title_returns_400() {
    let app = common::build_test_app(MemoryStore::new());
    let response = post_json(app, "/projects", json!({"description": "no title"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn test_invalid_titles_return_400() {
    let app = common::build_test_app(MemoryStore::new());
    for title in ["", "   ", "a/b"] {
        let response = post_json(app.clone(), "/projects", json!({"title": title})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "title {title:?}");
        assert!(body_json(response).await["error"].is_string());
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_project_keeps_absent_fields() {
    let app = common::build_test_app(MemoryStore::new());
    create_project(&app, "Alpha").await;

    let response = put_json(
        app.clone(),
        "/projects/Alpha",
        json!({"description": "updated"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Alpha");
    assert_eq!(json["description"], "updated");
}

#[tokio::test]
async fn test_rename_project_moves_lookup_key() {
    let app = common::build_test_app(MemoryStore::new());
    create_project(&app, "Alpha").await;

    let response = put_json(app.clone(), "/projects/Alpha", json!({"title": "Beta"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(get(app.clone(), "/projects/Alpha").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(app, "/projects/Beta").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rename_onto_existing_title_returns_409() {
    let app = common::build_test_app(MemoryStore::new());
    create_project(&app, "Alpha").await;
    create_project(&app, "Beta").await;

    let response = put_json(app, "/projects/Beta", json!({"title": "Alpha"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_nonexistent_project_returns_404() {
    let app = common::build_test_app(MemoryStore::new());
    let response = put_json(app, "/projects/Missing", json!({"description": "x"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete and archive
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_project_returns_it_and_then_404s() {
    let app = common::build_test_app(MemoryStore::new());
    create_project(&app, "Alpha").await;

    let response = delete(app.clone(), "/projects/Alpha").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Alpha");

    assert_eq!(get(app.clone(), "/projects/Alpha").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete(app, "/projects/Alpha").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_archive_then_restore_toggles_flag() {
    let app = common::build_test_app(MemoryStore::new());
    create_project(&app, "Alpha").await;

    let response = put(app.clone(), "/projects/Alpha/archive").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["archived"], true);
    assert_eq!(body_json(get(app.clone(), "/projects/Alpha").await).await["archived"], true);

    // Archiving twice is harmless.
    let response = put(app.clone(), "/projects/Alpha/archive").await;
    assert_eq!(body_json(response).await["archived"], true);

    let response = delete(app.clone(), "/projects/Alpha/archive").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["archived"], false);

    // Undo is not a delete: the project is still there.
    let json = body_json(get(app, "/projects/Alpha").await).await;
    assert_eq!(json["archived"], false);
}

#[tokio::test]
async fn test_archive_nonexistent_project_returns_404() {
    let app = common::build_test_app(MemoryStore::new());
    assert_eq!(put(app.clone(), "/projects/Missing/archive").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete(app, "/projects/Missing/archive").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_projects_archived_filter() {
    let app = common::build_test_app(MemoryStore::new());
    create_project(&app, "Alpha").await;
    create_project(&app, "Beta").await;
    put(app.clone(), "/projects/Beta/archive").await;

    let active = body_json(get(app.clone(), "/projects?archived=false").await).await;
    assert_eq!(active.as_array().unwrap().len(), 1);
    assert_eq!(active[0]["title"], "Alpha");

    let archived = body_json(get(app.clone(), "/projects?archived=true").await).await;
    assert_eq!(archived.as_array().unwrap().len(), 1);
    assert_eq!(archived[0]["title"], "Beta");

    let all = body_json(get(app.clone(), "/projects").await).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let response = get(app, "/projects?archived=maybe").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}
