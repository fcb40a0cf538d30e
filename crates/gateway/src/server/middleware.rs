//! Axum middleware applied to the router.
//!
//! - [`require_token`] guards the relay routes with the dashboard secret.
//! - [`embedding_policy`] sets the frame-embedding policy on every response.

use axum::{
    extract::{Query, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use common::GatewayError;
use tracing::debug;

use super::{error::ApiError, state::AppState};

/// Reject requests whose `?token=` is absent or not the dashboard secret.
///
/// Rejections are expected traffic and only logged at `debug`.
pub async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = token_from_query(&request)?;
    if !state.tokens.matches(&presented) {
        debug!(path = %request.uri().path(), "rejected invalid dashboard token");
        return Err(GatewayError::InvalidToken.into());
    }
    Ok(next.run(request).await)
}

/// Pull the single `token` value out of the query string.
///
/// An empty value counts as absent. A repeated parameter can never equal the
/// secret and is reported as invalid.
fn token_from_query(request: &Request) -> Result<String, GatewayError> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(request.uri())
        .map_err(|_| GatewayError::InvalidToken)?;

    let mut tokens: Vec<String> = pairs
        .into_iter()
        .filter(|(k, _)| k == "token")
        .map(|(_, v)| v)
        .collect();

    match tokens.len() {
        0 => Err(GatewayError::MissingToken),
        1 => {
            let token = tokens.remove(0);
            if token.is_empty() {
                Err(GatewayError::MissingToken)
            } else {
                Ok(token)
            }
        }
        _ => Err(GatewayError::InvalidToken),
    }
}

/// Drop `X-Frame-Options` and send the configured `frame-ancestors` policy.
pub async fn embedding_policy(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.remove(header::X_FRAME_OPTIONS);
    headers.insert(header::CONTENT_SECURITY_POLICY, state.frame_policy.clone());
    response
}
