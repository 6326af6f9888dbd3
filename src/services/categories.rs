use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    error::{DbId, ServiceError, ServiceResult},
    models::category::{Category, CreateCategoryRequest, UpdateCategoryRequest, DEFAULT_COLOR},
    services::{begin_write, trimmed_non_empty},
};

pub struct CategoryService;

impl CategoryService {
    pub async fn list(pool: &SqlitePool) -> ServiceResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, color FROM categories ORDER BY id",
        )
        .fetch_all(pool)
        .await?;
        Ok(categories)
    }

    pub async fn get(pool: &SqlitePool, id: DbId) -> ServiceResult<Category> {
        let mut conn = pool.acquire().await?;
        find(&mut conn, id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn create(pool: &SqlitePool, req: &CreateCategoryRequest) -> ServiceResult<Category> {
        let name = trimmed_non_empty(&req.name, "Name is required")?;
        let color = req.color.as_deref().unwrap_or(DEFAULT_COLOR);

        let mut tx = begin_write(pool).await?;
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, color)
             VALUES (?, ?)
             RETURNING id, name, color",
        )
        .bind(&name)
        .bind(color)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(category)
    }

    /// Partial update: omitted fields keep their stored value. Validation
    /// happens before any write, so a rejected update changes nothing.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        req: &UpdateCategoryRequest,
    ) -> ServiceResult<Category> {
        let mut tx = begin_write(pool).await?;
        let current = find(&mut tx, id).await?.ok_or_else(|| not_found(id))?;

        let name = match &req.name {
            None => current.name,
            Some(None) => {
                return Err(ServiceError::Validation("Name cannot be null".into()));
            }
            Some(Some(name)) => {
                trimmed_non_empty(name, "Name cannot be empty")?
            }
        };
        let color = match &req.color {
            None => current.color,
            Some(None) => DEFAULT_COLOR.to_string(),
            Some(Some(color)) => color.clone(),
        };

        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories
             SET name = ?, color = ?
             WHERE id = ?
             RETURNING id, name, color",
        )
        .bind(&name)
        .bind(&color)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(category)
    }

    /// Delete a category together with every note filed under it.
    ///
    /// Both deletes share one transaction: dependent notes first, then the
    /// category row. The schema also cascades, but the explicit delete keeps
    /// the behaviour independent of the connection's foreign-key pragma.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> ServiceResult<()> {
        let mut tx = begin_write(pool).await?;
        if find(&mut tx, id).await?.is_none() {
            return Err(not_found(id));
        }

        let removed_notes = sqlx::query("DELETE FROM notes WHERE category_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(category_id = id, removed_notes, "Category deleted with its notes");
        Ok(())
    }

    /// Existence check used to guard note writes; runs on the caller's
    /// connection so it sits inside the caller's transaction.
    pub(crate) async fn exists(conn: &mut SqliteConnection, id: DbId) -> ServiceResult<bool> {
        let found: Option<DbId> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(found.is_some())
    }
}

async fn find(conn: &mut SqliteConnection, id: DbId) -> ServiceResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, color FROM categories WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(category)
}

fn not_found(id: DbId) -> ServiceError {
    ServiceError::NotFound {
        entity: "Category",
        id,
    }
}
