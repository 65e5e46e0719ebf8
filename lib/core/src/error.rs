//! Error handling for the sign-in flow.
//!
//! `SignInError` carries two renderings: `Display` is the developer-facing
//! description that ends up in logs, while [`SignInError::user_message`] is
//! the text shown inline on the page. Fallible operations wrap the error in a
//! rootcause [`Report`] so callers can add context as it propagates.

use rootcause::Report;
use std::fmt;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

/// Environment variable that carries the identity provider client id.
pub const CLIENT_ID_ENV_VAR: &str = "SIGN_IN__CLIENT_ID";

/// Generic message for failures the user can only retry.
const RETRY_MESSAGE: &str = "Login failed. Please try again.";

/// Fallback when the backend rejects a credential without saying why.
const REJECTED_FALLBACK: &str = "Authentication failed";

/// Errors that can end or interrupt a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInError {
    /// No client id was configured for the identity provider.
    ClientIdMissing,
    /// The page could not fetch its settings from the server.
    SettingsUnavailable { reason: String },
    /// The identity provider script never became available.
    ProviderUnavailable { waited_ms: u64 },
    /// The identity provider rejected initialization or rendering.
    ProviderInit { reason: String },
    /// The provider callback fired without a credential.
    MissingCredential,
    /// The backend answered with a non-success status.
    Rejected {
        status: u16,
        message: Option<String>,
    },
    /// The backend could not be reached.
    Network { reason: String },
    /// The backend did not answer in time.
    Timeout,
    /// The backend answered with a body that could not be read.
    InvalidResponse { reason: String },
    /// Session data could not be written to or read from client storage.
    Storage { reason: String },
}

impl fmt::Display for SignInError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientIdMissing => write!(f, "identity provider client id is not configured"),
            Self::SettingsUnavailable { reason } => {
                write!(f, "failed to load sign-in settings: {reason}")
            }
            Self::ProviderUnavailable { waited_ms } => {
                write!(f, "identity provider not available after {waited_ms}ms")
            }
            Self::ProviderInit { reason } => {
                write!(f, "identity provider initialization failed: {reason}")
            }
            Self::MissingCredential => write!(f, "provider response carried no credential"),
            Self::Rejected { status, message } => match message {
                Some(message) => write!(f, "login rejected ({status}): {message}"),
                None => write!(f, "login rejected ({status})"),
            },
            Self::Network { reason } => write!(f, "login request failed: {reason}"),
            Self::Timeout => write!(f, "login request timed out"),
            Self::InvalidResponse { reason } => {
                write!(f, "login response could not be decoded: {reason}")
            }
            Self::Storage { reason } => write!(f, "session storage error: {reason}"),
        }
    }
}

impl std::error::Error for SignInError {}

impl SignInError {
    /// Message rendered inline on the sign-in page.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ClientIdMissing => format!(
                "Google Client ID not configured. Please set {CLIENT_ID_ENV_VAR} environment variable."
            ),
            Self::SettingsUnavailable { .. } => {
                "Unable to load sign-in configuration. Please reload the page.".to_string()
            }
            Self::ProviderUnavailable { .. } => {
                "Google Sign-In did not load. Check your connection and reload the page."
                    .to_string()
            }
            Self::ProviderInit { reason } => {
                format!("Failed to initialize Google Sign-In: {reason}")
            }
            Self::Rejected { message, .. } => message
                .as_deref()
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .unwrap_or(REJECTED_FALLBACK)
                .to_string(),
            Self::MissingCredential
            | Self::Network { .. }
            | Self::Timeout
            | Self::InvalidResponse { .. }
            | Self::Storage { .. } => RETRY_MESSAGE.to_string(),
        }
    }

    /// Extra operator hint shown below the message for configuration errors.
    #[must_use]
    pub fn config_hint(&self) -> Option<String> {
        match self {
            Self::ClientIdMissing => {
                Some(format!("Set {CLIENT_ID_ENV_VAR} in the server environment"))
            }
            _ => None,
        }
    }

    /// Classifies a failed `fetch` by the JS exception name.
    ///
    /// Aborts come from the request timer, so they count as timeouts.
    #[must_use]
    pub fn from_transport(exception_name: &str, message: impl Into<String>) -> Self {
        match exception_name {
            "AbortError" | "TimeoutError" => Self::Timeout,
            _ => Self::Network {
                reason: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_type_carries_sign_in_errors() {
        let err: Result<(), SignInError> = Err(SignInError::Timeout.into());
        let report = err.expect_err("should be an error");
        assert_eq!(report.current_context(), &SignInError::Timeout);
    }

    #[test]
    fn rejected_prefers_backend_message() {
        let err = SignInError::Rejected {
            status: 403,
            message: Some("Only @example.org accounts may sign in".to_string()),
        };
        assert_eq!(err.user_message(), "Only @example.org accounts may sign in");
    }

    #[test]
    fn rejected_without_message_falls_back() {
        let blank = SignInError::Rejected {
            status: 401,
            message: Some("   ".to_string()),
        };
        let absent = SignInError::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(blank.user_message(), "Authentication failed");
        assert_eq!(absent.user_message(), "Authentication failed");
    }

    #[test]
    fn transport_failures_ask_for_retry() {
        for err in [
            SignInError::Timeout,
            SignInError::MissingCredential,
            SignInError::Network {
                reason: "connection refused".to_string(),
            },
            SignInError::InvalidResponse {
                reason: "missing field `token`".to_string(),
            },
        ] {
            assert_eq!(err.user_message(), "Login failed. Please try again.");
        }
    }

    #[test]
    fn aborted_fetch_is_a_timeout() {
        assert_eq!(
            SignInError::from_transport("AbortError", "The user aborted a request."),
            SignInError::Timeout
        );
        assert_eq!(
            SignInError::from_transport("TypeError", "Failed to fetch"),
            SignInError::Network {
                reason: "Failed to fetch".to_string()
            }
        );
        // Only the exception name decides, not the wording.
        assert!(matches!(
            SignInError::from_transport("TypeError", "aborted: timeout"),
            SignInError::Network { .. }
        ));
    }

    #[test]
    fn only_missing_client_id_has_hint() {
        let hint = SignInError::ClientIdMissing
            .config_hint()
            .expect("client id error should carry a hint");
        assert!(hint.contains(CLIENT_ID_ENV_VAR));
        assert!(SignInError::ClientIdMissing.user_message().contains("Client ID"));
        assert_eq!(SignInError::Timeout.config_hint(), None);
    }

    #[test]
    fn provider_init_includes_reason() {
        let err = SignInError::ProviderInit {
            reason: "invalid client".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Failed to initialize Google Sign-In: invalid client"
        );
    }
}
