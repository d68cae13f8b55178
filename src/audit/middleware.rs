//! Audit logging middleware
//!
//! A tower layer that mirrors every inbound request into the request log
//! before any route-specific logic runs. The recorded entry combines the
//! request body with the query parameters (query keys override body keys),
//! the HTTP method, the URI and a copy of all headers.
//!
//! After the inner service responds, failed requests (status >= 400) produce
//! one additional row carrying the response status and error message.
//!
//! Both writes are best-effort: a failed insert is logged at WARN and never
//! blocks the request pipeline or prevents the HTTP response from being sent.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::HeaderMap,
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::{Map as JsonMap, Value as JsonValue};
use sqlx::PgPool;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::warn;

use super::models::NewRequestLog;
use super::queries::insert_request_log;

/// Audit logging layer
#[derive(Clone)]
pub struct AuditLayer {
    pool: PgPool,
}

impl AuditLayer {
    /// Create a new audit layer with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<S> Layer<S> for AuditLayer {
    type Service = AuditMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuditMiddleware {
            inner,
            pool: self.pool.clone(),
        }
    }
}

/// Audit middleware service
#[derive(Clone)]
pub struct AuditMiddleware<S> {
    inner: S,
    pool: PgPool,
}

impl<S> Service<Request> for AuditMiddleware<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let mut inner = self.inner.clone();
        let pool = self.pool.clone();

        Box::pin(async move {
            let method = request.method().clone();
            let uri = request.uri().clone();
            let url = uri
                .path_and_query()
                .map(|pq| pq.to_string())
                .unwrap_or_else(|| uri.path().to_string());
            let headers = headers_to_json(request.headers());

            // Buffer the body so it can be both logged and replayed to the
            // inner service.
            let (parts, body) = request.into_parts();
            let body_bytes = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(e) => {
                    warn!(method = %method, url = %url, error = %e, "Failed to capture request body");
                    Bytes::new()
                },
            };

            let data = merge_request_data(&body_bytes, uri.query());

            let entry = NewRequestLog::request(
                method.to_string(),
                url.clone(),
                JsonValue::Object(data),
                headers,
            );
            let failure_template = entry.clone();

            // The audit row is written before routing; failure is tolerated
            // so availability never couples to the audit path.
            if let Err(e) = insert_request_log(&pool, entry).await {
                warn!(method = %method, url = %url, error = %e, "Failed to write audit log entry");
            }

            let request = Request::from_parts(parts, Body::from(body_bytes));
            let response = inner.call(request).await?;

            if !response.status().is_client_error() && !response.status().is_server_error() {
                return Ok(response);
            }

            // Failed request: record one additional row with status and the
            // error message from the response body.
            let (parts, body) = response.into_parts();
            let response_bytes = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(e) => {
                    warn!(status = %parts.status, error = %e, "Failed to capture error response body");
                    Bytes::new()
                },
            };

            let message = extract_error_message(&response_bytes)
                .unwrap_or_else(|| parts.status.to_string());

            let failure = failure_template.failure(parts.status.as_u16(), message);
            if let Err(e) = insert_request_log(&pool, failure).await {
                warn!(method = %method, url = %url, error = %e, "Failed to write error log entry");
            }

            Ok(Response::from_parts(parts, Body::from(response_bytes)))
        })
    }
}

/// Merge the request body with the query parameters
///
/// The body contributes only if it parses as a JSON object; query keys
/// override body keys on collision.
fn merge_request_data(body: &[u8], query: Option<&str>) -> JsonMap<String, JsonValue> {
    let mut data = match serde_json::from_slice::<JsonValue>(body) {
        Ok(JsonValue::Object(map)) => map,
        _ => JsonMap::new(),
    };

    if let Some(query) = query {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            data.insert(key.into_owned(), JsonValue::String(value.into_owned()));
        }
    }

    data
}

/// Render all request headers as a JSON object
fn headers_to_json(headers: &HeaderMap) -> JsonValue {
    let mut map = JsonMap::new();
    for (name, value) in headers {
        map.insert(
            name.as_str().to_string(),
            JsonValue::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
        );
    }
    JsonValue::Object(map)
}

/// Pull the `message` field out of an error response body
fn extract_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<JsonValue>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    #[test]
    fn body_and_query_are_merged() {
        let body = br#"{"name":"Ann","role":"admin"}"#;
        let data = merge_request_data(body, Some("role=viewer&page=2"));

        assert_eq!(data["name"], json!("Ann"));
        // Query keys override body keys on collision.
        assert_eq!(data["role"], json!("viewer"));
        assert_eq!(data["page"], json!("2"));
    }

    #[test]
    fn non_object_body_contributes_nothing() {
        let data = merge_request_data(b"[1,2,3]", Some("a=1"));
        assert_eq!(data.len(), 1);
        assert_eq!(data["a"], json!("1"));

        let data = merge_request_data(b"not json", None);
        assert!(data.is_empty());
    }

    #[test]
    fn headers_render_as_object() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("x-request-id", HeaderValue::from_static("abc-123"));

        let rendered = headers_to_json(&headers);
        assert_eq!(rendered["content-type"], json!("application/json"));
        assert_eq!(rendered["x-request-id"], json!("abc-123"));
    }

    #[test]
    fn error_message_is_extracted_from_body() {
        let body = br#"{"message":"User not found"}"#;
        assert_eq!(
            extract_error_message(body),
            Some("User not found".to_string())
        );

        assert_eq!(extract_error_message(b"not json"), None);
        assert_eq!(extract_error_message(br#"{"other":"field"}"#), None);
    }
}
