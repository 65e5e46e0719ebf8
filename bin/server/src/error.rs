//! Domain error types for server operations.
//!
//! Errors keep their details for logs and convert to user-safe responses at
//! the boundary: `ServerFnError` for server functions, JSON bodies for the
//! backend proxy.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Errors while serving sign-in settings.
#[derive(Debug)]
pub enum SettingsError {
    /// The settings extension was not installed on the router.
    NotConfigured { details: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured { details } => {
                write!(f, "sign-in settings unavailable: {details}")
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl SettingsError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            SettingsError::NotConfigured { .. } => {
                ServerFnError::new("Sign-in is not configured on this server")
            }
        }
    }
}

/// Errors while forwarding a request to the backend.
#[derive(Debug)]
pub enum ProxyError {
    /// The forwarded URL could not be built.
    InvalidTarget { target: String, reason: String },
    /// The backend could not be reached.
    Unreachable { target: String, reason: String },
    /// The backend did not answer in time.
    Timeout { target: String },
    /// The backend answered but its body could not be read.
    BodyFailed { target: String, reason: String },
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget { target, reason } => {
                write!(f, "invalid backend target '{target}': {reason}")
            }
            Self::Unreachable { target, reason } => {
                write!(f, "backend '{target}' unreachable: {reason}")
            }
            Self::Timeout { target } => write!(f, "backend '{target}' timed out"),
            Self::BodyFailed { target, reason } => {
                write!(f, "failed to read response from '{target}': {reason}")
            }
        }
    }
}

impl std::error::Error for ProxyError {}

impl ProxyError {
    /// HTTP status answered to the browser.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTarget { .. } => 400,
            Self::Timeout { .. } => 504,
            Self::Unreachable { .. } | Self::BodyFailed { .. } => 502,
        }
    }

    /// User-safe message answered to the browser.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidTarget { .. } => "Invalid request path",
            Self::Timeout { .. } => "The authentication service timed out",
            Self::Unreachable { .. } | Self::BodyFailed { .. } => {
                "The authentication service is unavailable"
            }
        }
    }
}

#[cfg(feature = "ssr")]
impl axum::response::IntoResponse for ProxyError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        tracing::warn!(error = %self, "backend forwarding failed");
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
        let body = axum::Json(serde_json::json!({ "message": self.public_message() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_errors_map_to_gateway_statuses() {
        let timeout = ProxyError::Timeout {
            target: "http://backend/api/auth/login".to_string(),
        };
        let down = ProxyError::Unreachable {
            target: "http://backend/api/auth/login".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(timeout.status_code(), 504);
        assert_eq!(down.status_code(), 502);
        assert!(!down.public_message().contains("connection refused"));
    }

    #[cfg(feature = "ssr")]
    #[tokio::test]
    async fn gateway_timeout_answers_json_message_the_page_can_show() {
        use analytics_dashboard_core::{LoginReply, SignInError, interpret_reply};
        use axum::{http::StatusCode, response::IntoResponse};

        let response = ProxyError::Timeout {
            target: "http://backend/api/auth/login".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = String::from_utf8(bytes.to_vec()).expect("utf-8 body");
        let json: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert_eq!(
            json,
            serde_json::json!({ "message": "The authentication service timed out" })
        );

        let report = interpret_reply(&LoginReply { status: 504, body })
            .expect_err("gateway errors are not sessions");
        assert_eq!(
            report.current_context(),
            &SignInError::Rejected {
                status: 504,
                message: Some("The authentication service timed out".to_string()),
            }
        );
        assert_eq!(
            report.current_context().user_message(),
            "The authentication service timed out"
        );
    }

    #[test]
    fn settings_error_is_user_safe() {
        let err = SettingsError::NotConfigured {
            details: "missing extension".to_string(),
        };
        let message = err.into_server_error().to_string();
        assert!(message.contains("not configured"));
        assert!(!message.contains("extension"));
    }
}
