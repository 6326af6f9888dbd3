pub mod categories;
pub mod health;
pub mod notes;

use axum::{routing::get, Router};

use crate::AppState;

/// Resource routes, nested under the configured prefix by the caller.
/// Collection paths answer with and without the trailing slash.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route("/notes/", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/{id}",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
}
