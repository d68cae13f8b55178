//! Database queries for request logs

use sqlx::PgPool;
use tracing::debug;

use super::models::{NewRequestLog, RequestLog};

/// Insert a request log row
///
/// The log table is append-only; nothing in the request path ever reads it
/// back. Returns the stored entry with its generated id and timestamp.
pub async fn insert_request_log(
    pool: &PgPool,
    entry: NewRequestLog,
) -> Result<RequestLog, sqlx::Error> {
    let record = sqlx::query_as::<_, RequestLog>(
        r#"
        INSERT INTO request_logs (method, url, data, headers, status, error)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, method, url, data, headers, status, error, created_at
        "#,
    )
    .bind(&entry.method)
    .bind(&entry.url)
    .bind(&entry.data)
    .bind(&entry.headers)
    .bind(entry.status)
    .bind(&entry.error)
    .fetch_one(pool)
    .await?;

    debug!(
        log_id = %record.id,
        method = %record.method,
        url = %record.url,
        "Request log entry created"
    );

    Ok(record)
}
