//! Axum request handlers for the JSON endpoints.

use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use common::protocol::HealthResponse;
use serde_json::Value;

use super::{error::ApiError, state::AppState};
use crate::upstream::Resource;

/// `GET /api/keys` — relay the upstream key list.
pub async fn keys(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    relay(&state, Resource::Keys).await
}

/// `GET /api/credits` — relay the upstream credit balance.
pub async fn credits(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    relay(&state, Resource::Credits).await
}

async fn relay(state: &AppState, resource: Resource) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.upstream.fetch(resource).await?))
}

/// `GET /health` — liveness probe. Unauthenticated and always `200 OK`.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok(
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    ))
}
