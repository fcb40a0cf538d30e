//! JSON bodies returned by the gateway's HTTP API.
//!
//! Successful relay responses are the upstream's JSON passed through untouched,
//! so only the gateway-authored shapes live here.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Error responses
// ---------------------------------------------------------------------------

/// Error body for rejections and transport failures: `{error, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short human-readable summary (e.g. `"Unauthorized: Invalid token"`).
    pub error: String,
    /// Longer description of what went wrong or how to fix it.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a summary and message.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Error body wrapping a non-2xx upstream reply: `{error, details}`.
///
/// `details` carries the upstream body as text, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamErrorResponse {
    pub error: String,
    pub details: String,
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Time the probe was answered, ISO-8601 in UTC.
    pub timestamp: String,
}

impl HealthResponse {
    /// A healthy response stamped with `timestamp`.
    pub fn ok(timestamp: impl Into<String>) -> Self {
        Self {
            status: "ok".into(),
            timestamp: timestamp.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_response_serialises_error_and_message() {
        let e = ErrorResponse::new("Internal server error", "connection refused");
        assert_eq!(
            serde_json::to_value(&e).unwrap(),
            json!({"error": "Internal server error", "message": "connection refused"})
        );
    }

    #[test]
    fn upstream_error_response_has_no_message_field() {
        let e = UpstreamErrorResponse {
            error: "Failed to fetch OpenRouter keys".into(),
            details: "forbidden".into(),
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["details"], "forbidden");
        assert!(v.get("message").is_none());
    }

    #[test]
    fn health_ok_sets_status() {
        let h = HealthResponse::ok("2024-01-01T00:00:00.000Z");
        assert_eq!(h.status, "ok");
        assert_eq!(h.timestamp, "2024-01-01T00:00:00.000Z");
    }
}
