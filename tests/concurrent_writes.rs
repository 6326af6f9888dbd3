//! Parallel writers against a file-backed database.
//!
//! In-memory pools hold a single connection, so lock contention only shows
//! up with a real file and several pooled connections.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json, put_json};
use serde_json::json;
use sqlx::SqlitePool;

use bands_api::db;

async fn file_pool(dir: &tempfile::TempDir) -> SqlitePool {
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("bands.db").display());
    let pool = db::create_pool(&url, 5).await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    pool
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_category_updates_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let pool = file_pool(&dir).await;

    let response = post_json(build_test_app(pool.clone()), "/api/categories/", json!({"name": "Rock"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let uri = Arc::new(format!("/api/categories/{id}"));
    let handles: Vec<_> = (0..40)
        .map(|i| {
            let app = build_test_app(pool.clone());
            let uri = Arc::clone(&uri);
            tokio::spawn(async move { put_json(app, &uri, json!({"name": format!("n{i}")})).await.status() })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    pool.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_note_creates_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let pool = file_pool(&dir).await;

    let response = post_json(build_test_app(pool.clone()), "/api/categories/", json!({"name": "Jazz"})).await;
    let category_id = body_json(response).await["id"].as_i64().unwrap();

    let handles: Vec<_> = (0..40)
        .map(|i| {
            let app = build_test_app(pool.clone());
            tokio::spawn(async move {
                post_json(app, "/api/notes/", json!({"title": format!("band {i}"), "category_id": category_id}))
                    .await
                    .status()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 40);

    pool.close().await;
}
