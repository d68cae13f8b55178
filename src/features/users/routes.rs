//! User API routes
//!
//! Wires the commands and queries to axum handlers.
//!
//! # Route Structure
//!
//! - `GET /users` - List all user documents
//! - `POST /users` - Create a user from an arbitrary non-empty JSON object
//! - `PATCH /users/:user_id` - Shallow-merge fields into an existing user
//! - `DELETE /users/:user_id` - Delete a user
//!
//! Update responds 201 rather than 200/204; that status is preserved from
//! the original API contract.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde_json::{json, Map as JsonMap, Value as JsonValue};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

use super::{
    commands::{self, CreateUserCommand, DeleteUserCommand, UpdateUserCommand},
    queries,
};

/// Creates the users router with all routes configured
pub fn users_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:user_id", patch(update_user).delete(delete_user))
}

/// List all users
///
/// `GET /users` → `200 {"users": [...]}`
#[tracing::instrument(skip(pool))]
async fn list_users(State(pool): State<PgPool>) -> AppResult<Response> {
    let users = queries::list::handle(&pool).await?;

    tracing::debug!(count = users.len(), "Users listed via API");

    Ok((StatusCode::OK, Json(json!({ "users": users }))).into_response())
}

/// Create a user
///
/// `POST /users` → `201` empty body. A missing, unparseable or empty body
/// is rejected with `400 {"message": "Bad request params"}`.
#[tracing::instrument(skip(pool, body))]
async fn create_user(
    State(pool): State<PgPool>,
    body: Option<Json<JsonMap<String, JsonValue>>>,
) -> AppResult<Response> {
    let Some(Json(doc)) = body else {
        return Err(AppError::bad_request("Bad request params"));
    };

    commands::create::handle(&pool, CreateUserCommand { doc }).await?;

    Ok(StatusCode::CREATED.into_response())
}

/// Merge fields into an existing user
///
/// `PATCH /users/:user_id` → `201` empty body.
#[tracing::instrument(skip(pool, body), fields(user_id = %user_id))]
async fn update_user(
    State(pool): State<PgPool>,
    Path(user_id): Path<String>,
    body: Option<Json<JsonMap<String, JsonValue>>>,
) -> AppResult<Response> {
    // An absent body is a no-op merge, matching the original behavior.
    let doc = body.map(|Json(doc)| doc).unwrap_or_default();

    commands::update::handle(&pool, UpdateUserCommand { user_id, doc }).await?;

    Ok(StatusCode::CREATED.into_response())
}

/// Delete a user
///
/// `DELETE /users/:user_id` → `200` empty body.
#[tracing::instrument(skip(pool), fields(user_id = %user_id))]
async fn delete_user(
    State(pool): State<PgPool>,
    Path(user_id): Path<String>,
) -> AppResult<Response> {
    commands::delete::handle(&pool, DeleteUserCommand { user_id }).await?;

    Ok(StatusCode::OK.into_response())
}
