//! Feature modules implementing the userd API
//!
//! Each feature is a vertical slice with its own commands (write
//! operations), queries (read operations) and route definitions. The
//! service currently has a single feature: the users collection.

pub mod users;

use axum::Router;
use sqlx::PgPool;

/// Creates the API router with all feature routes mounted
pub fn router(pool: PgPool) -> Router<()> {
    Router::new().nest("/users", users::users_routes().with_state(pool))
}
