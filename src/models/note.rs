use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::DbId;
use crate::models::category::Category;

/// A note as read back from the store, always joined with its category.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub category_id: DbId,
    pub category_name: String,
    pub category_color: String,
}

/// Outward representation of a note; the owning category is embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteWithCategory {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub category_id: DbId,
    pub category: Category,
}

impl From<NoteRow> for NoteWithCategory {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            category_id: row.category_id,
            category: Category {
                id: row.category_id,
                name: row.category_name,
                color: row.category_color,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: Option<String>,
    pub category_id: DbId,
}

/// Partial update. `null` on `title` or `category_id` is rejected instead of
/// being read as "unchanged"; omit the field to leave it as is.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default, deserialize_with = "super::explicit_null")]
    pub title: Option<Option<String>>,
    /// `null` clears the content to an empty string.
    #[serde(default, deserialize_with = "super::explicit_null")]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::explicit_null")]
    pub category_id: Option<Option<DbId>>,
}
