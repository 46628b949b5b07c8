//! API integration tests
//!
//! Drives the router with `tower::ServiceExt::oneshot` against an in-memory
//! database.

use awesome::config::Config;
use awesome::models::{self, Blog};
use awesome::server::{create_router, AppContext, GREETING};
use awesome_orm::pool::{get_conn, init_memory_pool};
use awesome_orm::Model;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test context with default configuration and empty tables
fn create_test_context() -> AppContext {
    create_test_context_with_config(Config::default())
}

/// Create a test context with custom configuration and empty tables
fn create_test_context_with_config(config: Config) -> AppContext {
    let db = init_memory_pool().unwrap();
    {
        let conn = get_conn(&db).unwrap();
        models::init_schema(&conn).unwrap();
    }

    AppContext {
        config: Arc::new(config),
        db,
    }
}

fn seed_blogs(ctx: &AppContext, count: usize) -> Vec<Blog> {
    let conn = get_conn(&ctx.db).unwrap();
    (0..count)
        .map(|i| {
            let mut blog = Blog {
                user_id: "u1".to_string(),
                user_name: "Tester".to_string(),
                name: format!("Blog {}", i),
                summary: "summary".to_string(),
                content: "content".to_string(),
                created_at: Some(1_700_000_000.0 + i as f64),
                ..Blog::default()
            };
            blog.save(&conn).unwrap();
            blog
        })
        .collect()
}

/// Helper to get response body as string
async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get_json(ctx: AppContext, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = create_router(ctx)
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = body_to_string(response.into_body()).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn test_index_returns_greeting() {
    let app = create_router(create_test_context());

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body_to_string(response.into_body()).await, GREETING);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(create_test_context());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_string(response.into_body()).await, "ok");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_router(create_test_context());

    let response = app
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_blogs_empty() {
    let (status, json) = get_json(create_test_context(), "/api/blogs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 0);
    assert_eq!(json["page"], 1);
    assert_eq!(json["blogs"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_blogs_newest_first_and_paged() {
    let ctx = create_test_context();
    seed_blogs(&ctx, 5);

    let (status, json) = get_json(ctx.clone(), "/api/blogs?page=1&size=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 5);
    let names: Vec<_> = json["blogs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Blog 4", "Blog 3"]);

    let (_, json) = get_json(ctx.clone(), "/api/blogs?page=3&size=2").await;
    let names: Vec<_> = json["blogs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Blog 0"]);

    let (_, json) = get_json(ctx, "/api/blogs?page=4&size=2").await;
    assert_eq!(json["blogs"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_blogs_uses_configured_page_size() {
    let mut config = Config::default();
    config.server.page_size = 3;
    let ctx = create_test_context_with_config(config);
    seed_blogs(&ctx, 5);

    let (status, json) = get_json(ctx.clone(), "/api/blogs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["size"], 3);
    assert_eq!(json["blogs"].as_array().unwrap().len(), 3);

    // An explicit size still wins.
    let (_, json) = get_json(ctx, "/api/blogs?size=4").await;
    assert_eq!(json["size"], 4);
    assert_eq!(json["blogs"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_list_blogs_rejects_page_zero() {
    let (status, json) = get_json(create_test_context(), "/api/blogs?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "invalid_input");
}

#[tokio::test]
async fn test_get_blog() {
    let ctx = create_test_context();
    let blogs = seed_blogs(&ctx, 2);
    let id = blogs[1].id.clone().unwrap();

    let (status, json) = get_json(ctx, &format!("/api/blogs/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], id);
    assert_eq!(json["name"], "Blog 1");
}

#[tokio::test]
async fn test_get_missing_blog_is_404() {
    let (status, json) = get_json(create_test_context(), "/api/blogs/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "not_found");
    assert_eq!(json["error"], "Not found: blog missing");
}
