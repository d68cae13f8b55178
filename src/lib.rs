//! userd - a minimal user CRUD service with request audit logging
//!
//! # Overview
//!
//! userd exposes CRUD operations on a single `users` collection of
//! schemaless JSON documents, and mirrors every inbound request into an
//! append-only request log:
//!
//! - **API**: `GET/POST /users`, `PATCH/DELETE /users/:user_id`
//! - **Audit**: one log row per request, plus one per failure with status
//!   and error message
//! - **Storage**: PostgreSQL via SQLx; documents live in `JSONB` keyed by
//!   server-generated UUIDs
//! - **Configuration**: environment-based, read once at startup
//!
//! # Architecture
//!
//! Request flow is linear: audit middleware → route handler → success
//! response, or error → the single [`error::AppError`] translation point →
//! `{"message": ...}` response, observed again by the audit middleware for
//! the error log row. No retries, no transactions, no caching.
//!
//! # Example
//!
//! ```no_run
//! use userd::{api, config::Config, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     db::run_migrations(&pool).await?;
//!     api::serve(config, pool).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod audit;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod logging;

// Re-export commonly used types
pub use error::{AppError, AppResult};
