//! Request-time error type shared by the token guard and the upstream relay.

use thiserror::Error;

use crate::protocol::{ErrorResponse, UpstreamErrorResponse};

/// Everything that can turn a dashboard API call into a non-200 answer.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`GatewayError::MissingToken`] → 401
/// - [`GatewayError::InvalidToken`] → 401
/// - [`GatewayError::Upstream`] → the upstream's own status
/// - [`GatewayError::Transport`] → 500
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No `token` query parameter (or an empty one).
    #[error("Unauthorized: Token is required")]
    MissingToken,

    /// A `token` was supplied but does not match the dashboard secret.
    #[error("Unauthorized: Invalid token")]
    InvalidToken,

    /// The upstream answered with a non-success status.
    #[error("Failed to fetch OpenRouter {resource}")]
    Upstream {
        /// User-facing resource name, e.g. `"keys"`.
        resource: &'static str,
        status: u16,
        /// Upstream body as text.
        body: String,
    },

    /// The outbound call itself failed: DNS, connect, body read, or JSON decode.
    #[error("Internal server error")]
    Transport(String),
}

/// Serialisable body for a [`GatewayError`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Message(ErrorResponse),
    Details(UpstreamErrorResponse),
}

impl GatewayError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            GatewayError::MissingToken | GatewayError::InvalidToken => 401,
            GatewayError::Upstream { status, .. } => *status,
            GatewayError::Transport(_) => 500,
        }
    }

    /// Build the JSON body sent to the caller.
    pub fn body(&self) -> ErrorBody {
        let error = self.to_string();
        match self {
            GatewayError::MissingToken => ErrorBody::Message(ErrorResponse::new(
                error,
                "Please provide a token via ?token=YOUR_TOKEN query parameter",
            )),
            GatewayError::InvalidToken => {
                ErrorBody::Message(ErrorResponse::new(error, "The provided token is not valid"))
            }
            GatewayError::Upstream { body, .. } => ErrorBody::Details(UpstreamErrorResponse {
                error,
                details: body.clone(),
            }),
            GatewayError::Transport(detail) => {
                ErrorBody::Message(ErrorResponse::new(error, detail.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn http_status_codes() {
        assert_eq!(GatewayError::MissingToken.http_status(), 401);
        assert_eq!(GatewayError::InvalidToken.http_status(), 401);
        assert_eq!(GatewayError::Transport("x".into()).http_status(), 500);
        let upstream = GatewayError::Upstream {
            resource: "credits",
            status: 429,
            body: String::new(),
        };
        assert_eq!(upstream.http_status(), 429);
    }

    #[test]
    fn missing_token_body_mentions_required() {
        let v = serde_json::to_value(GatewayError::MissingToken.body()).unwrap();
        assert!(v["error"].as_str().unwrap().contains("Token is required"));
        assert!(v["message"].as_str().unwrap().contains("?token="));
    }

    #[test]
    fn invalid_token_body_is_distinct() {
        let missing = serde_json::to_value(GatewayError::MissingToken.body()).unwrap();
        let invalid = serde_json::to_value(GatewayError::InvalidToken.body()).unwrap();
        assert_ne!(missing, invalid);
        assert!(invalid["error"].as_str().unwrap().contains("Invalid token"));
    }

    #[test]
    fn upstream_body_wraps_details() {
        let e = GatewayError::Upstream {
            resource: "keys",
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(
            serde_json::to_value(e.body()).unwrap(),
            json!({"error": "Failed to fetch OpenRouter keys", "details": "forbidden"})
        );
    }

    #[test]
    fn transport_body_carries_detail_as_message() {
        let e = GatewayError::Transport("connection refused".into());
        assert_eq!(
            serde_json::to_value(e.body()).unwrap(),
            json!({"error": "Internal server error", "message": "connection refused"})
        );
    }
}
