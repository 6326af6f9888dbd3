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
    models::note::{CreateNoteRequest, UpdateNoteRequest},
    services::notes::NoteService,
    AppState,
};

pub async fn list_notes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let notes = NoteService::list(&state.db).await?;
    Ok(Json(notes))
}

pub async fn get_note(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let note = NoteService::get(&state.db, id).await?;
    Ok(Json(note))
}

/// POST /notes/
///
/// `title` and `category_id` are required fields; an unknown category is a
/// 400, not a 404.
pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let note = NoteService::create(&state.db, &input).await?;

    tracing::info!(
        note_id = note.id,
        category_id = note.category_id,
        title = %note.title,
        "Note created",
    );

    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn update_note(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let note = NoteService::update(&state.db, id, &input).await?;

    tracing::info!(note_id = id, category_id = note.category_id, "Note updated");

    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    NoteService::delete(&state.db, id).await?;

    tracing::info!(note_id = id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}
