use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    error::{AppResult, DbId},
    models::category::{CreateCategoryRequest, UpdateCategoryRequest},
    services::categories::CategoryService,
    AppState,
};

/// GET /categories/
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryService::list(&state.db).await?;
    Ok(Json(categories))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let category = CategoryService::get(&state.db, id).await?;
    Ok(Json(category))
}

/// POST /categories/
///
/// A missing `name` is rejected by the extractor (422); a blank one by the
/// service (400).
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let category = CategoryService::create(&state.db, &input).await?;

    tracing::info!(
        category_id = category.id,
        name = %category.name,
        color = %category.color,
        "Category created",
    );

    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<UpdateCategoryRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let category = CategoryService::update(&state.db, id, &input).await?;

    tracing::info!(category_id = id, "Category updated");

    Ok(Json(category))
}

/// DELETE /categories/{id}
///
/// Removes every note filed under the category as well.
pub async fn delete_category(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    CategoryService::delete(&state.db, id).await?;

    tracing::info!(category_id = id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
