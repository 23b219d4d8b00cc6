//! Integration tests for the Inkpost HTTP surface.
//!
//! Each test group runs against its own disposable store; the router is
//! driven in-process through the synthetic request harness.

use axum::http::StatusCode;
use axum::Router;
use serde_json::json;

use inkpost_common::Post;
use inkpost_harness::{dispatch, RequestSpec, TestStore};
use inkpost_web::{build_router, AppState};

fn app(group: &TestStore) -> Router {
    build_router(AppState::new(group.store()))
}

#[tokio::test]
async fn health_reports_ok() {
    let group = TestStore::ephemeral().unwrap();
    let response = dispatch(app(&group), RequestSpec::get("/health"))
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    let json = response.json_value().unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn get_posts_returns_empty_array() {
    let group = TestStore::ephemeral().unwrap();
    let response = dispatch(app(&group), RequestSpec::get("/api/posts"))
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    let posts: Vec<Post> = response.json().unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn post_creates_and_echoes_title() {
    let group = TestStore::ephemeral().unwrap();
    let spec = RequestSpec::post(
        "/api/posts",
        json!({ "title": "Test Post", "body": "Content" }),
    );
    let response = dispatch(app(&group), spec).await.unwrap();

    assert_eq!(response.status, StatusCode::CREATED);
    let created: Post = response.json().unwrap();
    assert_eq!(created.title, "Test Post");
    assert_eq!(created.body, "Content");
}

#[tokio::test]
async fn posted_title_shows_up_in_collection() {
    let group = TestStore::ephemeral().unwrap();

    let create = RequestSpec::post(
        "/api/posts",
        json!({ "title": "Round Trip", "body": "..." }),
    );
    dispatch(app(&group), create).await.unwrap();

    let response = dispatch(app(&group), RequestSpec::get("/api/posts"))
        .await
        .unwrap();
    let posts: Vec<Post> = response.json().unwrap();
    assert!(posts.iter().any(|p| p.title == "Round Trip"));
}

#[tokio::test]
async fn get_is_idempotent_without_intervening_posts() {
    let group = TestStore::ephemeral().unwrap();
    for title in ["one", "two"] {
        let spec = RequestSpec::post("/api/posts", json!({ "title": title, "body": "" }));
        dispatch(app(&group), spec).await.unwrap();
    }

    let first: Vec<Post> = dispatch(app(&group), RequestSpec::get("/api/posts"))
        .await
        .unwrap()
        .json()
        .unwrap();
    let second: Vec<Post> = dispatch(app(&group), RequestSpec::get("/api/posts"))
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn get_single_post_by_id() {
    let group = TestStore::ephemeral().unwrap();
    let created: Post = dispatch(
        app(&group),
        RequestSpec::post("/api/posts", json!({ "title": "Findable", "body": "b" })),
    )
    .await
    .unwrap()
    .json()
    .unwrap();

    let response = dispatch(
        app(&group),
        RequestSpec::get(format!("/api/posts/{}", created.id)),
    )
    .await
    .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    let fetched: Post = response.json().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn missing_post_is_generic_404() {
    let group = TestStore::ephemeral().unwrap();
    let response = dispatch(
        app(&group),
        RequestSpec::get("/api/posts/00000000-0000-0000-0000-000000000000"),
    )
    .await
    .unwrap();

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let json = response.json_value().unwrap();
    assert_eq!(json["error"], "not found");
}

#[tokio::test]
async fn empty_title_is_rejected() {
    let group = TestStore::ephemeral().unwrap();
    let response = dispatch(
        app(&group),
        RequestSpec::post("/api/posts", json!({ "title": "", "body": "b" })),
    )
    .await
    .unwrap();

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(group.store().count_posts().unwrap(), 0);
}

#[tokio::test]
async fn trace_sees_middleware_context() {
    let group = TestStore::ephemeral().unwrap();
    let response = dispatch(app(&group), RequestSpec::get("/api/trace"))
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    let json = response.json_value().unwrap();
    assert_eq!(json["traced"], true);
    assert!(json["request_id"].is_string());
}

#[tokio::test]
async fn every_request_gets_its_own_context() {
    let group = TestStore::ephemeral().unwrap();

    let first = dispatch(app(&group), RequestSpec::get("/api/trace"))
        .await
        .unwrap()
        .json_value()
        .unwrap();
    let second = dispatch(app(&group), RequestSpec::get("/api/trace"))
        .await
        .unwrap()
        .json_value()
        .unwrap();

    assert_eq!(first["traced"], true);
    assert_eq!(second["traced"], true);
    assert_ne!(first["request_id"], second["request_id"]);
}

#[tokio::test]
async fn index_page_lists_posts_heading_and_form() {
    let group = TestStore::ephemeral().unwrap();
    let response = dispatch(app(&group), RequestSpec::get("/")).await.unwrap();

    assert_eq!(response.status, StatusCode::OK);
    let html = response.text().unwrap();
    assert!(html.contains("Posts"));
    assert!(html.contains(r#"name="title""#));
    assert!(html.contains(r#"name="body""#));
}

#[tokio::test]
async fn form_submission_redirects_and_title_appears() {
    let group = TestStore::ephemeral().unwrap();

    let response = dispatch(
        app(&group),
        RequestSpec::post_form("/posts", "title=New+Post&body=Blog+content"),
    )
    .await
    .unwrap();

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));

    let index = dispatch(app(&group), RequestSpec::get("/")).await.unwrap();
    let html = index.text().unwrap();
    assert!(html.contains("New Post"));
    assert!(html.contains("/posts/"));
}

#[tokio::test]
async fn detail_page_shows_post() {
    let group = TestStore::ephemeral().unwrap();
    let created: Post = dispatch(
        app(&group),
        RequestSpec::post(
            "/api/posts",
            json!({ "title": "Detail Me", "body": "Full body" }),
        ),
    )
    .await
    .unwrap()
    .json()
    .unwrap();

    let response = dispatch(
        app(&group),
        RequestSpec::get(format!("/posts/{}", created.id)),
    )
    .await
    .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    let html = response.text().unwrap();
    assert!(html.contains("Detail Me"));
    assert!(html.contains("Full body"));
}

#[tokio::test]
async fn parallel_groups_do_not_share_posts() {
    let a = TestStore::ephemeral().unwrap();
    let b = TestStore::ephemeral().unwrap();

    dispatch(
        app(&a),
        RequestSpec::post("/api/posts", json!({ "title": "only-in-a", "body": "" })),
    )
    .await
    .unwrap();

    let posts: Vec<Post> = dispatch(app(&b), RequestSpec::get("/api/posts"))
        .await
        .unwrap()
        .json()
        .unwrap();
    assert!(posts.is_empty());
}
