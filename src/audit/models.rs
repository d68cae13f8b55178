//! Request log data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Request log entry from the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RequestLog {
    /// Unique identifier for the log entry
    pub id: Uuid,
    /// HTTP method of the request
    pub method: String,
    /// Request URI (path and query)
    pub url: String,
    /// Request body merged with query parameters (query keys win)
    pub data: JsonValue,
    /// All request headers as a JSON object
    pub headers: JsonValue,
    /// Response status, populated only on error rows
    pub status: Option<i16>,
    /// Error message, populated only on error rows
    pub error: Option<String>,
    /// Timestamp when the entry was recorded
    pub created_at: DateTime<Utc>,
}

/// Data for a new request log entry
#[derive(Debug, Clone)]
pub struct NewRequestLog {
    pub method: String,
    pub url: String,
    pub data: JsonValue,
    pub headers: JsonValue,
    pub status: Option<i16>,
    pub error: Option<String>,
}

impl NewRequestLog {
    /// Audit row for an inbound request, written before routing
    pub fn request(method: String, url: String, data: JsonValue, headers: JsonValue) -> Self {
        Self {
            method,
            url,
            data,
            headers,
            status: None,
            error: None,
        }
    }

    /// Additional row written when a request fails
    pub fn failure(self, status: u16, error: String) -> Self {
        Self {
            status: Some(status as i16),
            error: Some(error),
            ..self
        }
    }
}
