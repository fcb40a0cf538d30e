//! Axum router construction.

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
///
/// `/api/*` routes sit behind the token guard. `/` and every unmatched path
/// are served from the asset directory without authentication.
pub fn build(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/keys", get(handlers::keys))
        .route("/api/credits", get(handlers::credits))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_token));

    let index = ServeFile::new(state.asset_dir.join("index.html"));
    let assets = ServeDir::new(state.asset_dir.as_path());

    Router::new()
        .merge(api)
        .route("/health", get(handlers::health))
        .route_service("/", index)
        .fallback_service(assets)
        .layer(from_fn_with_state(state.clone(), middleware::embedding_policy))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}
