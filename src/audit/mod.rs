//! Request audit logging
//!
//! Every inbound request is mirrored into the append-only `request_logs`
//! table before routing; failed requests additionally record the response
//! status and error message. The application never reads these rows back;
//! they exist purely for traceability.

mod middleware;
mod models;
mod queries;

pub use middleware::AuditLayer;
pub use models::{NewRequestLog, RequestLog};
pub use queries::insert_request_log;
