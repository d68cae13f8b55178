//! Update user command
//!
//! Shallow field merge: top-level fields from the supplied document replace
//! the corresponding fields of the stored one, everything else is preserved.
//! This is `jsonb ||`, not a full document replace.

use serde_json::{Map as JsonMap, Value as JsonValue};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Command to merge fields into an existing user document
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    /// User identifier as received on the path, not yet parsed
    pub user_id: String,
    /// Fields to merge into the stored document
    pub doc: JsonMap<String, JsonValue>,
}

/// Handler function for updating users
///
/// The existence check and the merge are two statements with no isolation
/// guarantee; a concurrent delete in between loses to the update silently.
/// Accepted gap, inherited from the original design.
#[tracing::instrument(skip(pool, command), fields(user_id = %command.user_id))]
pub async fn handle(pool: &PgPool, command: UpdateUserCommand) -> AppResult<()> {
    let id = parse_user_id(&command.user_id)?;

    let existing = sqlx::query_scalar::<_, JsonValue>("SELECT doc FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    if existing.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    sqlx::query("UPDATE users SET doc = doc || $2 WHERE id = $1")
        .bind(id)
        .bind(JsonValue::Object(command.doc))
        .execute(pool)
        .await?;

    tracing::info!(user_id = %id, "User updated");

    Ok(())
}

/// Parse a path identifier into the store's identifier format
///
/// Malformed identifiers are a client error, not an internal fault.
pub fn parse_user_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request("Invalid user id"))
}
