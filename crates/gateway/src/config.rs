//! Configuration loading and validation for the gateway.
//!
//! All values are read from environment variables at startup (after an
//! optional `.env` file has been merged in by `main`). The process exits with
//! a clear error message if either secret is missing.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

const KEY_HINT: &str = "Please set it in your .env file or environment variables";
const TOKEN_HINT: &str = "Please set it in your .env file or environment variables\n   \
                          Generate a secure token with: openssl rand -base64 32";

/// Startup configuration failures. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required secret is absent or empty.
    #[error("{name} is not set\n   {hint}")]
    Missing {
        name: &'static str,
        hint: &'static str,
    },

    /// A variable is present but unusable.
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    /// The environment could not be read or deserialised.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// A credential that never shows up in `Debug` output or logs.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    #[cfg(test)]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret. Only the relay and the token guard should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

/// Validated gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bearer credential sent to the upstream API. **Required.**
    #[serde(default)]
    pub openrouter_api_key: Secret,

    /// Shared secret dashboard clients present as `?token=`. **Required.**
    #[serde(default)]
    pub dashboard_token: Secret,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL the relay appends `/<resource>` to.
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,

    /// Directory holding the pre-built dashboard bundle.
    #[serde(default = "default_asset_dir")]
    pub asset_dir: String,

    /// Value of the `frame-ancestors` CSP directive sent on every response.
    #[serde(default = "default_frame_ancestors")]
    pub frame_ancestors: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`), overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// OTLP collector endpoint. Span export is off when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    3000
}
fn default_upstream_base_url() -> String {
    "https://openrouter.ai/api/v1".into()
}
fn default_asset_dir() -> String {
    "public".into()
}
fn default_frame_ancestors() -> String {
    "*".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first absent secret, or
    /// another [`ConfigError`] if a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(config::Environment::default())
    }

    /// Same as [`Config::from_env`] but reads from an explicit set of
    /// variables instead of the process environment.
    #[cfg(test)]
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::load(config::Environment::default().source(Some(map)))
    }

    fn load(source: config::Environment) -> Result<Self, ConfigError> {
        let c: Config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.openrouter_api_key.is_empty() {
            return Err(ConfigError::Missing {
                name: "OPENROUTER_API_KEY",
                hint: KEY_HINT,
            });
        }
        if self.dashboard_token.is_empty() {
            return Err(ConfigError::Missing {
                name: "DASHBOARD_TOKEN",
                hint: TOKEN_HINT,
            });
        }
        if let Err(e) = reqwest::Url::parse(&self.upstream_base_url) {
            return Err(ConfigError::Invalid {
                name: "UPSTREAM_BASE_URL",
                reason: e.to_string(),
            });
        }
        if self.frame_ancestors.trim().is_empty() {
            return Err(ConfigError::Invalid {
                name: "FRAME_ANCESTORS",
                reason: "must not be empty; use '*' to allow embedding anywhere".into(),
            });
        }
        Ok(())
    }

    /// Config with both secrets set and every other field at its default.
    #[cfg(test)]
    pub fn for_test(upstream_base_url: impl Into<String>) -> Self {
        Self {
            openrouter_api_key: Secret::new("sk-or-test"),
            dashboard_token: Secret::new("dash-secret"),
            port: default_port(),
            upstream_base_url: upstream_base_url.into(),
            asset_dir: default_asset_dir(),
            frame_ancestors: default_frame_ancestors(),
            log_level: default_log_level(),
            otel_exporter_otlp_endpoint: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_port(), 3000);
        assert_eq!(default_upstream_base_url(), "https://openrouter.ai/api/v1");
        assert_eq!(default_asset_dir(), "public");
        assert_eq!(default_frame_ancestors(), "*");
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn loads_required_secrets_and_port() {
        let cfg = Config::from_vars([
            ("OPENROUTER_API_KEY", "sk-or-1"),
            ("DASHBOARD_TOKEN", "tok"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(cfg.openrouter_api_key.expose(), "sk-or-1");
        assert_eq!(cfg.dashboard_token.expose(), "tok");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.upstream_base_url, default_upstream_base_url());
        assert!(cfg.otel_exporter_otlp_endpoint.is_none());
    }

    #[test]
    fn missing_api_key_names_variable() {
        let err = Config::from_vars([("DASHBOARD_TOKEN", "tok")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Missing {
                name: "OPENROUTER_API_KEY",
                ..
            }
        ));
        assert!(err.to_string().contains("OPENROUTER_API_KEY is not set"));
    }

    #[test]
    fn missing_dashboard_token_names_variable_and_hint() {
        let err = Config::from_vars([("OPENROUTER_API_KEY", "sk-or-1")]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("DASHBOARD_TOKEN is not set"));
        assert!(msg.contains("openssl rand -base64 32"));
    }

    #[test]
    fn empty_secret_counts_as_missing() {
        let err = Config::from_vars([("OPENROUTER_API_KEY", ""), ("DASHBOARD_TOKEN", "tok")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
    }

    #[test]
    fn whitespace_secret_is_accepted_verbatim() {
        let cfg = Config::from_vars([("OPENROUTER_API_KEY", "sk-or-1"), ("DASHBOARD_TOKEN", " ")])
            .unwrap();
        assert_eq!(cfg.dashboard_token.expose(), " ");
    }

    #[test]
    fn validate_rejects_bad_upstream_url() {
        let mut cfg = Config::for_test("not a url");
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid {
                name: "UPSTREAM_BASE_URL",
                ..
            })
        ));
        cfg.upstream_base_url = "http://127.0.0.1:9".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_frame_ancestors() {
        let mut cfg = Config::for_test("http://127.0.0.1:9");
        cfg.frame_ancestors = " ".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let cfg = Config::for_test("http://127.0.0.1:9");
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("sk-or-test"));
        assert!(!dbg.contains("dash-secret"));
        assert!(dbg.contains("REDACTED"));
    }
}
