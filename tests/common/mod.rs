//! Shared helpers for HTTP-level integration tests.
//!
//! Requests go straight to the router through `tower::ServiceExt::oneshot`,
//! each test on its own in-memory database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use bands_api::config::Config;
use bands_api::{build_app, db, AppState};

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        api_prefix: "/api".to_string(),
    }
}

pub async fn test_pool() -> SqlitePool {
    db::connect_in_memory()
        .await
        .expect("in-memory database should open")
}

pub fn build_test_app(pool: SqlitePool) -> Router {
    build_app(AppState {
        db: pool,
        config: Arc::new(test_config()),
    })
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST a category and return its id, asserting it was created.
pub async fn create_category(pool: &SqlitePool, body: Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/categories/", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// POST a note and return its id, asserting it was created.
pub async fn create_note(pool: &SqlitePool, body: Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/notes/", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
