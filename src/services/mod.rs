pub mod categories;
pub mod notes;

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::{ServiceError, ServiceResult};

/// Trims `value` and requires something to remain.
/// `empty_message` is the error reported when only whitespace was supplied.
pub(crate) fn trimmed_non_empty(value: &str, empty_message: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation(empty_message.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Write transactions take SQLite's write lock at `BEGIN`, so concurrent
/// writers wait on the busy timeout rather than failing a lock upgrade.
pub(crate) async fn begin_write(pool: &SqlitePool) -> ServiceResult<Transaction<'static, Sqlite>> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}
