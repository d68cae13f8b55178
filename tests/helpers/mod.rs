//! Shared helpers for userd integration tests

use axum::{body::Body, Router};
use http::{header, Request, Response};
use http_body_util::BodyExt;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tower::ServiceExt;
use userd::audit::RequestLog;

/// Build the full application router, audit layer included
pub fn app(pool: PgPool) -> Router {
    userd::api::router(pool)
}

/// Send a request without a body
pub async fn send(app: &Router, method: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");

    app.clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level")
}

/// Send a request with a JSON body
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: &JsonValue,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");

    app.clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level")
}

/// Collect a response body into JSON
pub async fn body_json(response: Response<Body>) -> JsonValue {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Collect a response body into raw bytes
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes()
        .to_vec()
}

/// Fetch all request log rows, oldest first
pub async fn request_logs(pool: &PgPool) -> Vec<RequestLog> {
    sqlx::query_as::<_, RequestLog>(
        "SELECT id, method, url, data, headers, status, error, created_at
         FROM request_logs ORDER BY created_at ASC, status ASC NULLS FIRST",
    )
    .fetch_all(pool)
    .await
    .expect("request logs should be queryable")
}

/// Extract the `_id` of the only user in a GET /users response
pub async fn sole_user_id(app: &Router) -> String {
    let response = send(app, "GET", "/users").await;
    let body = body_json(response).await;
    let users = body["users"].as_array().expect("users should be an array");
    assert_eq!(users.len(), 1, "expected exactly one user");
    users[0]["_id"]
        .as_str()
        .expect("_id should be a string")
        .to_string()
}
