//! Integration tests for the request audit log
//!
//! These verify that every request produces exactly one audit row with
//! method, URL, merged body+query data and headers, and that failed
//! requests produce one additional row carrying status and error message.

use axum::body::Body;
use http::{header, Request, StatusCode};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

mod helpers;

use helpers::{app, request_logs, send, send_json};

#[sqlx::test(migrations = "./migrations")]
async fn every_request_produces_one_audit_row(pool: PgPool) {
    let app = app(pool.clone());

    let response = send(&app, "GET", "/users").await;
    assert_eq!(response.status(), StatusCode::OK);

    let logs = request_logs(&pool).await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].method, "GET");
    assert_eq!(logs[0].url, "/users");
    assert_eq!(logs[0].data, json!({}));
    assert!(logs[0].status.is_none());
    assert!(logs[0].error.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn audit_row_merges_body_and_query(pool: PgPool) {
    let app = app(pool.clone());

    let response = send_json(
        &app,
        "POST",
        "/users?role=viewer&source=test",
        &json!({"name": "Ann", "role": "admin"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let logs = request_logs(&pool).await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].url, "/users?role=viewer&source=test");
    assert_eq!(logs[0].data["name"], json!("Ann"));
    // Query keys override body keys on collision.
    assert_eq!(logs[0].data["role"], json!("viewer"));
    assert_eq!(logs[0].data["source"], json!("test"));
}

#[sqlx::test(migrations = "./migrations")]
async fn audit_row_captures_headers(pool: PgPool) {
    let app = app(pool.clone());

    let request = Request::builder()
        .method("GET")
        .uri("/users")
        .header(header::USER_AGENT, "audit-test/1.0")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let logs = request_logs(&pool).await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].headers["user-agent"], json!("audit-test/1.0"));
    assert_eq!(logs[0].headers["x-request-id"], json!("req-42"));
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_request_produces_an_additional_error_row(pool: PgPool) {
    let app = app(pool.clone());

    let response = send_json(&app, "POST", "/users", &json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let logs = request_logs(&pool).await;
    assert_eq!(logs.len(), 2);

    let audit_row = logs.iter().find(|l| l.status.is_none()).unwrap();
    assert_eq!(audit_row.method, "POST");
    assert_eq!(audit_row.url, "/users");

    let error_row = logs.iter().find(|l| l.status.is_some()).unwrap();
    assert_eq!(error_row.status, Some(400));
    assert_eq!(error_row.error.as_deref(), Some("Bad request params"));
    assert_eq!(error_row.method, "POST");
    assert_eq!(error_row.url, "/users");
}

#[sqlx::test(migrations = "./migrations")]
async fn not_found_failure_is_logged_with_its_message(pool: PgPool) {
    let app = app(pool.clone());

    let response = send_json(
        &app,
        "PATCH",
        "/users/00000000-0000-0000-0000-000000000000",
        &json!({"name": "Anna"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let logs = request_logs(&pool).await;
    assert_eq!(logs.len(), 2);

    let error_row = logs.iter().find(|l| l.status.is_some()).unwrap();
    assert_eq!(error_row.status, Some(404));
    assert_eq!(error_row.error.as_deref(), Some("User not found"));
}

#[sqlx::test(migrations = "./migrations")]
async fn error_response_body_survives_the_audit_layer(pool: PgPool) {
    let app = app(pool.clone());

    // The audit layer buffers failed responses to read the message; the
    // client must still receive the body intact.
    let response = send_json(&app, "POST", "/users", &json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = helpers::body_json(response).await;
    assert_eq!(body, json!({ "message": "Bad request params" }));
}

#[sqlx::test(migrations = "./migrations")]
async fn successful_requests_do_not_produce_error_rows(pool: PgPool) {
    let app = app(pool.clone());

    send_json(&app, "POST", "/users", &json!({"name": "Ann"})).await;
    send(&app, "GET", "/users").await;

    let logs = request_logs(&pool).await;
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|l| l.status.is_none() && l.error.is_none()));
}
