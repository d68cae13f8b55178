//! Delete user command

use sqlx::PgPool;
use serde_json::Value as JsonValue;

use crate::error::{AppError, AppResult};

use super::update::parse_user_id;

/// Command to delete a user document
#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    /// User identifier as received on the path, not yet parsed
    pub user_id: String,
}

/// Handler function for deleting users
///
/// Same read-then-act sequence as update, same accepted race.
#[tracing::instrument(skip(pool, command), fields(user_id = %command.user_id))]
pub async fn handle(pool: &PgPool, command: DeleteUserCommand) -> AppResult<()> {
    let id = parse_user_id(&command.user_id)?;

    let existing = sqlx::query_scalar::<_, JsonValue>("SELECT doc FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    if existing.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    tracing::info!(user_id = %id, "User deleted");

    Ok(())
}
