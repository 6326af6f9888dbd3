use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    error::{DbId, ServiceError, ServiceResult},
    models::note::{CreateNoteRequest, NoteRow, NoteWithCategory, UpdateNoteRequest},
    services::{begin_write, categories::CategoryService, trimmed_non_empty},
};

const SELECT_NOTE_WITH_CATEGORY: &str = "SELECT n.id, n.title, n.content, n.created_at, n.category_id,
        c.name AS category_name, c.color AS category_color
 FROM notes n
 JOIN categories c ON c.id = n.category_id";

pub struct NoteService;

impl NoteService {
    pub async fn list(pool: &SqlitePool) -> ServiceResult<Vec<NoteWithCategory>> {
        let rows = sqlx::query_as::<_, NoteRow>(&format!(
            "{SELECT_NOTE_WITH_CATEGORY} ORDER BY n.id"
        ))
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(NoteWithCategory::from).collect())
    }

    pub async fn get(pool: &SqlitePool, id: DbId) -> ServiceResult<NoteWithCategory> {
        let mut conn = pool.acquire().await?;
        find(&mut conn, id)
            .await?
            .map(NoteWithCategory::from)
            .ok_or_else(|| not_found(id))
    }

    /// The category reference is checked inside the same transaction as the
    /// insert so it cannot disappear in between.
    pub async fn create(pool: &SqlitePool, req: &CreateNoteRequest) -> ServiceResult<NoteWithCategory> {
        let title = trimmed_non_empty(&req.title, "Title is required")?;
        let content = req.content.as_deref().unwrap_or_default();

        let mut tx = begin_write(pool).await?;
        require_category(&mut tx, req.category_id).await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO notes (title, content, created_at, category_id)
             VALUES (?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&title)
        .bind(content)
        .bind(Utc::now())
        .bind(req.category_id)
        .fetch_one(&mut *tx)
        .await?;

        let row = find(&mut tx, id).await?.ok_or_else(|| not_found(id))?;
        tx.commit().await?;
        Ok(row.into())
    }

    /// Partial update. Each provided field is validated before the single
    /// UPDATE runs; `created_at` is never touched.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        req: &UpdateNoteRequest,
    ) -> ServiceResult<NoteWithCategory> {
        let mut tx = begin_write(pool).await?;
        let current = find(&mut tx, id).await?.ok_or_else(|| not_found(id))?;

        let title = match &req.title {
            None => current.title,
            Some(None) => {
                return Err(ServiceError::Validation("Title cannot be null".into()));
            }
            Some(Some(title)) => {
                trimmed_non_empty(title, "Title cannot be empty")?
            }
        };
        let content = match &req.content {
            None => current.content,
            Some(None) => String::new(),
            Some(Some(content)) => content.clone(),
        };
        let category_id = match req.category_id {
            None => current.category_id,
            Some(None) => {
                return Err(ServiceError::Validation("category_id cannot be null".into()));
            }
            Some(Some(category_id)) => {
                require_category(&mut tx, category_id).await?;
                category_id
            }
        };

        sqlx::query("UPDATE notes SET title = ?, content = ?, category_id = ? WHERE id = ?")
            .bind(&title)
            .bind(&content)
            .bind(category_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let row = find(&mut tx, id).await?.ok_or_else(|| not_found(id))?;
        tx.commit().await?;
        Ok(row.into())
    }

    pub async fn delete(pool: &SqlitePool, id: DbId) -> ServiceResult<()> {
        let deleted = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

async fn find(conn: &mut SqliteConnection, id: DbId) -> ServiceResult<Option<NoteRow>> {
    let row = sqlx::query_as::<_, NoteRow>(&format!(
        "{SELECT_NOTE_WITH_CATEGORY} WHERE n.id = ?"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

/// A note may only point at a category that exists right now.
async fn require_category(conn: &mut SqliteConnection, category_id: DbId) -> ServiceResult<()> {
    if CategoryService::exists(conn, category_id).await? {
        Ok(())
    } else {
        Err(ServiceError::Validation("Category does not exist".into()))
    }
}

fn not_found(id: DbId) -> ServiceError {
    ServiceError::NotFound { entity: "Note", id }
}
