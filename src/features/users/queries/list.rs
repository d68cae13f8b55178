//! List users query
//!
//! Returns every document in the users collection. Deliberately unbounded:
//! the API has no pagination.

use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;

#[derive(Debug, sqlx::FromRow)]
struct UserRecord {
    id: Uuid,
    doc: JsonValue,
}

/// Handler function for listing users
///
/// Each document is rendered with its identifier injected as `_id`, the
/// opaque string clients use to address the user on the path.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: &PgPool) -> AppResult<Vec<JsonValue>> {
    let records = sqlx::query_as::<_, UserRecord>(
        "SELECT id, doc FROM users ORDER BY created_at ASC",
    )
    .fetch_all(pool)
    .await?;

    let users = records.into_iter().map(render).collect();

    Ok(users)
}

fn render(record: UserRecord) -> JsonValue {
    let mut doc = match record.doc {
        JsonValue::Object(map) => map,
        other => {
            // The insert path only stores objects, but the column itself
            // doesn't enforce that.
            let mut map = serde_json::Map::new();
            map.insert("value".to_string(), other);
            map
        },
    };
    doc.insert(
        "_id".to_string(),
        JsonValue::String(record.id.to_string()),
    );
    JsonValue::Object(doc)
}
