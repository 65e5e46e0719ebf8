//! Public sign-in settings shared between the server and the browser.
//!
//! These values are rendered into the page, so nothing here may be secret.

use crate::button::ButtonOptions;
use crate::readiness::PollPolicy;
use serde::{Deserialize, Serialize};

/// Script that provides the identity provider widget.
pub const IDENTITY_SCRIPT_URL: &str = "https://accounts.google.com/gsi/client";

/// Settings the sign-in page needs at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInSettings {
    /// OAuth client id registered with the identity provider.
    #[serde(default)]
    pub client_id: Option<String>,
    /// Heading shown on the sign-in card.
    #[serde(default = "default_title")]
    pub title: String,
    /// Email domain the dashboard is meant for, without the leading `@`.
    #[serde(default)]
    pub allowed_domain: Option<String>,
    /// Backend endpoint that exchanges a credential for a session token.
    #[serde(default = "default_login_endpoint")]
    pub login_endpoint: String,
    /// Local path to navigate to after sign-in.
    #[serde(default = "default_landing_path")]
    pub landing_path: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u32,
    /// Zero waits for the provider indefinitely.
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u32,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u32,
    #[serde(default)]
    pub button: ButtonOptions,
}

fn default_title() -> String {
    "Analytics Dashboard".to_string()
}

fn default_login_endpoint() -> String {
    "/api/auth/login".to_string()
}

fn default_landing_path() -> String {
    "/".to_string()
}

fn default_poll_interval_ms() -> u32 {
    100
}

fn default_load_timeout_ms() -> u32 {
    15_000
}

fn default_request_timeout_ms() -> u32 {
    10_000
}

impl Default for SignInSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            title: default_title(),
            allowed_domain: None,
            login_endpoint: default_login_endpoint(),
            landing_path: default_landing_path(),
            poll_interval_ms: default_poll_interval_ms(),
            load_timeout_ms: default_load_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            button: ButtonOptions::default(),
        }
    }
}

impl SignInSettings {
    /// Returns the configured client id, treating blank values as absent.
    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        self.client_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Readiness polling policy derived from the timing settings.
    #[must_use]
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::from_millis(self.poll_interval_ms, self.load_timeout_ms)
    }

    /// Line shown under the title.
    #[must_use]
    pub fn subtitle(&self) -> String {
        match &self.allowed_domain {
            Some(domain) => format!("Sign in with your @{domain} email"),
            None => "Sign in with your Google account".to_string(),
        }
    }

    /// Access policy note shown at the bottom of the card.
    ///
    /// Informational only; the backend decides who gets a session.
    #[must_use]
    pub fn access_policy(&self) -> Option<String> {
        self.allowed_domain.as_ref().map(|domain| {
            format!("Only @{domain} email addresses are allowed to access this dashboard.")
        })
    }
}

/// Normalizes a configured email domain: trims, drops a leading `@`, lowercases.
#[must_use]
pub fn normalize_domain(raw: &str) -> Option<String> {
    let domain = raw.trim().trim_start_matches('@').trim();
    if domain.is_empty() {
        None
    } else {
        Some(domain.to_ascii_lowercase())
    }
}

/// Accepts only same-origin absolute paths such as `/` or `/reports?range=7d`.
#[must_use]
pub fn normalize_landing_path(raw: &str) -> Option<String> {
    let path = raw.trim();
    let local = path.starts_with('/')
        && !path.starts_with("//")
        && !path.starts_with("/\\")
        && !path.contains("://");
    local.then(|| path.to_string())
}
