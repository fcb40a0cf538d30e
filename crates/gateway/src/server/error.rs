//! HTTP rendering of [`GatewayError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::GatewayError;

/// Axum-facing wrapper so handlers and middleware can return `Result<_, ApiError>`.
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, Json(self.0.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn render(e: GatewayError) -> (StatusCode, Value) {
        let resp = ApiError(e).into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn upstream_status_is_preserved() {
        let (status, body) = render(GatewayError::Upstream {
            resource: "credits",
            status: 403,
            body: "forbidden".into(),
        })
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body,
            json!({"error": "Failed to fetch OpenRouter credits", "details": "forbidden"})
        );
    }

    #[tokio::test]
    async fn unrepresentable_status_becomes_bad_gateway() {
        let (status, _) = render(GatewayError::Upstream {
            resource: "keys",
            status: 42,
            body: String::new(),
        })
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn transport_is_500() {
        let (status, body) = render(GatewayError::Transport("boom".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "boom");
    }
}
