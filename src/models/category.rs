use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::DbId;

pub const DEFAULT_COLOR: &str = "#3498db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub color: String, // hex color for UI
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub color: Option<String>,
}

/// Partial update. An explicit `null` is not the same as leaving a field out:
/// `null` on `name` is rejected instead of being read as "unchanged", and
/// `null` on `color` resets it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default, deserialize_with = "super::explicit_null")]
    pub name: Option<Option<String>>,
    /// `null` resets to [`DEFAULT_COLOR`].
    #[serde(default, deserialize_with = "super::explicit_null")]
    pub color: Option<Option<String>>,
}
