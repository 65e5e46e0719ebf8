//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables. Nested keys use
//! `__` as the separator, e.g. `SIGN_IN__CLIENT_ID` or `BACKEND__URL`.
//!
//! Leptos site options (listen address, site root) are read separately from
//! the crate's `[package.metadata.leptos]` table.

use analytics_dashboard_core::{SignInSettings, normalize_domain, normalize_landing_path};
use serde::Deserialize;

/// Server configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Public settings handed to the sign-in page.
    #[serde(default)]
    pub sign_in: SignInSettings,

    /// Backend that verifies credentials and serves the dashboard API.
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Backend forwarding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL requests under `/api` are forwarded to.
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Upper bound for a single forwarded request, in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is malformed or fails validation.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validated()
    }

    /// Normalizes free-form values and rejects unusable ones.
    ///
    /// A zero `load_timeout_ms` means "wait forever"; a zero
    /// `request_timeout_ms` would abort every login and is refused.
    fn validated(mut self) -> Result<Self, config::ConfigError> {
        self.sign_in.allowed_domain = self
            .sign_in
            .allowed_domain
            .as_deref()
            .and_then(normalize_domain);

        self.sign_in.landing_path = normalize_landing_path(&self.sign_in.landing_path)
            .ok_or_else(|| {
                config::ConfigError::Message(format!(
                    "sign_in.landing_path must be a local path starting with '/', got '{}'",
                    self.sign_in.landing_path
                ))
            })?;

        if self.sign_in.request_timeout_ms == 0 {
            return Err(config::ConfigError::Message(
                "sign_in.request_timeout_ms must be greater than zero".to_string(),
            ));
        }

        if self.sign_in.login_endpoint.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "sign_in.login_endpoint must not be empty".to_string(),
            ));
        }

        let backend = self.backend.url.trim().trim_end_matches('/');
        if !(backend.starts_with("http://") || backend.starts_with("https://")) {
            return Err(config::ConfigError::Message(format!(
                "backend.url must be an http(s) URL, got '{}'",
                self.backend.url
            )));
        }
        self.backend.url = backend.to_string();

        Ok(self)
    }
}
