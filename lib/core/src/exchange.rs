//! Exchanging a provider credential for a backend session.

use crate::error::{Result, SignInError};
use crate::session::{
    Credential, ErrorBody, KeyValueStore, LoginRequest, LoginResponse, StoredSession, save_session,
};
use async_trait::async_trait;

/// Raw answer from the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginReply {
    pub status: u16,
    pub body: String,
}

impl LoginReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport that delivers a login request to the backend.
#[async_trait(?Send)]
pub trait LoginBackend {
    /// Sends `request` and returns whatever the backend answered.
    ///
    /// Implementations only fail for transport problems; HTTP error statuses
    /// are returned as a [`LoginReply`].
    async fn submit(&self, request: &LoginRequest) -> Result<LoginReply, SignInError>;
}

/// Turns a backend reply into a session or a rejection.
///
/// # Errors
///
/// Returns [`SignInError::Rejected`] for non-2xx statuses with a JSON body and
/// [`SignInError::InvalidResponse`] for any other body that cannot be read,
/// including a 2xx body without a token.
pub fn interpret_reply(reply: &LoginReply) -> Result<StoredSession, SignInError> {
    if !reply.is_success() {
        let body: ErrorBody =
            serde_json::from_str(&reply.body).map_err(|e| SignInError::InvalidResponse {
                reason: format!("status {} with unreadable body: {e}", reply.status),
            })?;
        let message = body
            .message
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty());
        return Err(SignInError::Rejected {
            status: reply.status,
            message,
        }
        .into());
    }

    let response: LoginResponse =
        serde_json::from_str(&reply.body).map_err(|e| SignInError::InvalidResponse {
            reason: e.to_string(),
        })?;
    if response.token.as_str().trim().is_empty() {
        return Err(SignInError::InvalidResponse {
            reason: "empty session token".to_string(),
        }
        .into());
    }

    Ok(response.into())
}

/// Posts `credential` to the backend and persists the resulting session.
///
/// # Errors
///
/// Propagates transport, rejection, decoding, and storage errors.
pub async fn complete_sign_in<B, S>(
    backend: &B,
    store: &S,
    credential: Credential,
) -> Result<StoredSession, SignInError>
where
    B: LoginBackend + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let request = LoginRequest { token: credential };
    let reply = backend.submit(&request).await?;

    let session = interpret_reply(&reply).inspect_err(|report| {
        tracing::warn!(status = reply.status, error = %report.current_context(), "login rejected");
    })?;

    save_session(store, &session)?;
    tracing::info!("session stored");
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{AUTH_TOKEN_KEY, MemoryStore, USER_DATA_KEY, load_session};
    use std::cell::RefCell;

    struct FakeBackend {
        reply: std::result::Result<LoginReply, SignInError>,
        seen: RefCell<Vec<LoginRequest>>,
    }

    impl FakeBackend {
        fn answering(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(LoginReply {
                    status,
                    body: body.to_string(),
                }),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn failing(error: SignInError) -> Self {
            Self {
                reply: Err(error),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl LoginBackend for FakeBackend {
        async fn submit(&self, request: &LoginRequest) -> Result<LoginReply, SignInError> {
            self.seen.borrow_mut().push(request.clone());
            self.reply.clone().map_err(Into::into)
        }
    }

    #[tokio::test]
    async fn success_stores_token_and_user() {
        let backend = FakeBackend::answering(
            200,
            r#"{"token":"jwt-abc","user":{"email":"ada@example.org"}}"#,
        );
        let store = MemoryStore::new();

        let session = complete_sign_in(&backend, &store, Credential::new("id-token"))
            .await
            .expect("sign-in should succeed");

        assert_eq!(session.token.as_str(), "jwt-abc");
        assert_eq!(
            backend.seen.borrow().as_slice(),
            &[LoginRequest {
                token: Credential::new("id-token")
            }]
        );
        assert_eq!(
            store.get(AUTH_TOKEN_KEY).expect("read").as_deref(),
            Some("jwt-abc")
        );
        assert_eq!(
            store.get(USER_DATA_KEY).expect("read").as_deref(),
            Some(r#"{"email":"ada@example.org"}"#)
        );
    }

    #[tokio::test]
    async fn rejection_surfaces_backend_message_and_stores_nothing() {
        let backend = FakeBackend::answering(403, r#"{"message":"Domain not allowed"}"#);
        let store = MemoryStore::new();

        let report = complete_sign_in(&backend, &store, Credential::new("id-token"))
            .await
            .expect_err("should be rejected");

        assert_eq!(
            report.current_context(),
            &SignInError::Rejected {
                status: 403,
                message: Some("Domain not allowed".to_string()),
            }
        );
        assert_eq!(report.current_context().user_message(), "Domain not allowed");
        assert_eq!(load_session(&store).expect("load"), None);
    }

    #[tokio::test]
    async fn rejection_with_non_json_body_asks_for_retry() {
        let backend = FakeBackend::answering(500, "<html>Internal Server Error</html>");
        let store = MemoryStore::new();

        let report = complete_sign_in(&backend, &store, Credential::new("id-token"))
            .await
            .expect_err("should fail");

        assert!(matches!(
            report.current_context(),
            SignInError::InvalidResponse { .. }
        ));
        assert_eq!(
            report.current_context().user_message(),
            "Login failed. Please try again."
        );
        assert_eq!(load_session(&store).expect("load"), None);
    }

    #[test]
    fn rejection_with_json_body_without_message_uses_fallback() {
        let report = interpret_reply(&LoginReply {
            status: 401,
            body: r#"{"error":"invalid_token"}"#.to_string(),
        })
        .expect_err("should be rejected");

        assert_eq!(
            report.current_context(),
            &SignInError::Rejected {
                status: 401,
                message: None,
            }
        );
        assert_eq!(
            report.current_context().user_message(),
            "Authentication failed"
        );
    }

    #[tokio::test]
    async fn success_without_token_is_invalid() {
        let backend = FakeBackend::answering(200, r#"{"user":{}}"#);
        let store = MemoryStore::new();

        let report = complete_sign_in(&backend, &store, Credential::new("id-token"))
            .await
            .expect_err("should fail to decode");

        assert!(matches!(
            report.current_context(),
            SignInError::InvalidResponse { .. }
        ));
        assert_eq!(load_session(&store).expect("load"), None);
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let backend = FakeBackend::failing(SignInError::Timeout);
        let store = MemoryStore::new();

        let report = complete_sign_in(&backend, &store, Credential::new("id-token"))
            .await
            .expect_err("should fail");

        assert_eq!(report.current_context(), &SignInError::Timeout);
        assert_eq!(
            report.current_context().user_message(),
            "Login failed. Please try again."
        );
    }

    #[test]
    fn missing_user_defaults_to_null() {
        let session = interpret_reply(&LoginReply {
            status: 201,
            body: r#"{"token":"jwt-abc"}"#.to_string(),
        })
        .expect("valid reply");
        assert_eq!(session.user, serde_json::Value::Null);
    }
}
