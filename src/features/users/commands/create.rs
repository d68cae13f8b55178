//! Create user command
//!
//! Inserts an arbitrary JSON document into the users collection. The store
//! assigns the identifier; it is not returned to the API caller.

use serde_json::{Map as JsonMap, Value as JsonValue};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Command to create a new user document
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    /// The user document as supplied by the client, no schema enforced
    pub doc: JsonMap<String, JsonValue>,
}

impl CreateUserCommand {
    /// Validates the command parameters
    ///
    /// The only boundary rule: the document must carry at least one field.
    pub fn validate(&self) -> AppResult<()> {
        if self.doc.is_empty() {
            return Err(AppError::bad_request("Bad request params"));
        }
        Ok(())
    }
}

/// Handler function for creating users
///
/// Returns the generated identifier; the HTTP layer deliberately discards
/// it to preserve the original API contract (201 with empty body).
#[tracing::instrument(skip(pool, command), fields(field_count = command.doc.len()))]
pub async fn handle(pool: &PgPool, command: CreateUserCommand) -> AppResult<Uuid> {
    command.validate()?;

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO users (doc)
        VALUES ($1)
        RETURNING id
        "#,
    )
    .bind(JsonValue::Object(command.doc))
    .fetch_one(pool)
    .await?;

    tracing::info!(user_id = %id, "User created");

    Ok(id)
}
