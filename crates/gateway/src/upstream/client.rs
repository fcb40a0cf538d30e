//! [`UpstreamClient`]: authenticated GETs against the OpenRouter API.

use std::sync::Arc;

use common::GatewayError;
use reqwest::{header, Client};
use serde_json::Value;
use tracing::{debug, error};

use crate::config::Secret;

/// Read-only upstream resources the dashboard may fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Keys,
    Credits,
}

impl Resource {
    /// Path appended to the upstream base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Keys => "/keys",
            Resource::Credits => "/credits",
        }
    }

    /// Name used in caller-facing error messages.
    pub fn name(self) -> &'static str {
        match self {
            Resource::Keys => "keys",
            Resource::Credits => "credits",
        }
    }
}

/// Pooled HTTP client bound to one upstream base URL and credential.
///
/// Cloning shares the connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: Arc<str>,
    api_key: Secret,
}

impl UpstreamClient {
    /// Build a client for `base_url` that authenticates with `api_key`.
    ///
    /// No request timeout is set; calls complete or fail on the transport's
    /// own terms.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(base_url: &str, api_key: Secret) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(concat!("openrouter-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            api_key,
        })
    }

    fn url(&self, resource: Resource) -> String {
        format!("{}{}", self.base_url, resource.path())
    }

    /// Fetch `resource` and decode the upstream's JSON reply.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Upstream`] when the upstream answers non-2xx; the body
    ///   is carried as text.
    /// - [`GatewayError::Transport`] when the call fails, the body cannot be
    ///   read, or a success body is not JSON.
    pub async fn fetch(&self, resource: Resource) -> Result<Value, GatewayError> {
        let url = self.url(resource);
        debug!(resource = resource.name(), %url, "fetching from upstream");

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.api_key.expose())
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(resource, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| transport_error(resource, e))?;
            error!(
                resource = resource.name(),
                status = status.as_u16(),
                body = %body,
                "OpenRouter API error"
            );
            return Err(GatewayError::Upstream {
                resource: resource.name(),
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| transport_error(resource, e))
    }
}

fn transport_error(resource: Resource, e: reqwest::Error) -> GatewayError {
    error!(resource = resource.name(), error = %e, "error fetching from OpenRouter");
    GatewayError::Transport(e.to_string())
}
