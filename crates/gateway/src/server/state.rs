//! Shared application state injected into every Axum handler.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;

use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::upstream::UpstreamClient;

/// Application state shared across all request handlers.
///
/// Everything here is read-only after startup and cheap to clone, so Axum can
/// hand a copy to each request without locking.
#[derive(Clone)]
pub struct AppState {
    /// Relay client holding the upstream credential.
    pub upstream: UpstreamClient,
    /// Checks `?token=` against the dashboard secret.
    pub tokens: TokenVerifier,
    /// Pre-rendered `Content-Security-Policy` value, e.g. `frame-ancestors *`.
    pub frame_policy: HeaderValue,
    /// Root directory of the dashboard bundle.
    pub asset_dir: Arc<PathBuf>,
}

impl AppState {
    /// Build the state from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the frame
    /// policy is not a valid header value.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let upstream = UpstreamClient::new(&cfg.upstream_base_url, cfg.openrouter_api_key.clone())
            .context("failed to build upstream HTTP client")?;
        let tokens = TokenVerifier::new(&cfg.dashboard_token)
            .map_err(|e| anyhow::anyhow!("failed to initialise token verifier: {e}"))?;
        let frame_policy = HeaderValue::from_str(&format!("frame-ancestors {}", cfg.frame_ancestors))
            .context("FRAME_ANCESTORS is not a valid header value")?;

        Ok(Self {
            upstream,
            tokens,
            frame_policy,
            asset_dir: Arc::new(PathBuf::from(&cfg.asset_dir)),
        })
    }
}

#[cfg(test)]
impl AppState {
    /// State pointing at `upstream_base_url`, serving assets from `asset_dir`.
    ///
    /// The dashboard token is `dash-secret`.
    pub fn for_test(upstream_base_url: &str, asset_dir: impl Into<PathBuf>) -> Self {
        let mut cfg = Config::for_test(upstream_base_url);
        cfg.asset_dir = asset_dir.into().to_string_lossy().into_owned();
        Self::from_config(&cfg).unwrap()
    }
}
