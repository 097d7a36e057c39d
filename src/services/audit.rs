//! Audit log sink for executed requests.

use std::time::Duration;

/// One audit entry per logged request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    pub user: String,
    pub method: String,
    pub query: String,
    /// JSON of the (redacted) variables, or a marshal-failure placeholder.
    pub variables: String,
    pub took: Duration,
    pub error: Option<String>,
    /// JSON of the response, or a marshal-failure placeholder.
    pub response: String,
    pub request_id: Option<String>,
}

/// Structured key/value writer. Implementations must be safe to call from
/// concurrent requests.
pub trait AuditLogger: Send + Sync {
    fn log(&self, record: &AuditRecord);
}

/// Writes audit records as `tracing` events on the `graphql_kit::audit` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditLogger;

impl AuditLogger for TracingAuditLogger {
    fn log(&self, record: &AuditRecord) {
        tracing::info!(
            target: "graphql_kit::audit",
            user = %record.user,
            method = %record.method,
            query = %record.query,
            variables = %record.variables,
            took = ?record.took,
            error = record.error.as_deref(),
            response = %record.response,
            request_id = record.request_id.as_deref(),
        );
    }
}
