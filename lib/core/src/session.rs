//! Login wire types and client-side session persistence.
//!
//! Credentials and session tokens are bearer secrets. Their `Debug` output is
//! redacted so they never end up in logs by accident.

use crate::error::{Result, SignInError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

/// Storage key for the session token.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key for the serialized user object.
pub const USER_DATA_KEY: &str = "userData";

/// Opaque identity assertion issued by the identity provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Opaque token issued by the backend after verifying a credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Body posted to the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub token: Credential,
}

/// Successful login response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: SessionToken,
    #[serde(default)]
    pub user: Value,
}

/// Error body returned by the backend on rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Session data kept in client storage after sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub token: SessionToken,
    pub user: Value,
}

impl From<LoginResponse> for StoredSession {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: response.token,
            user: response.user,
        }
    }
}

impl StoredSession {
    /// Best-effort label for the signed-in user.
    #[must_use]
    pub fn display_name(&self) -> String {
        ["name", "email"]
            .iter()
            .filter_map(|field| self.user.get(*field).and_then(Value::as_str))
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or("Signed in")
            .to_string()
    }
}

/// String key/value storage that survives page reloads.
pub trait KeyValueStore {
    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns [`SignInError::Storage`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SignInError>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SignInError::Storage`] if the store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), SignInError>;

    /// Removes a value if present.
    ///
    /// # Errors
    ///
    /// Returns [`SignInError::Storage`] if the store cannot be modified.
    fn remove(&self, key: &str) -> Result<(), SignInError>;
}

/// In-memory store, used where no durable storage exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SignInError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SignInError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SignInError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Persists the token and user object under their storage keys.
///
/// # Errors
///
/// Returns [`SignInError::Storage`] if either value cannot be written.
pub fn save_session<S: KeyValueStore + ?Sized>(
    store: &S,
    session: &StoredSession,
) -> Result<(), SignInError> {
    let user = serde_json::to_string(&session.user).map_err(|e| SignInError::Storage {
        reason: format!("failed to encode user data: {e}"),
    })?;
    store.set(AUTH_TOKEN_KEY, session.token.as_str())?;
    store.set(USER_DATA_KEY, &user)?;
    Ok(())
}

/// Loads a previously saved session.
///
/// A missing or blank token means no session. User data that cannot be parsed
/// is replaced with `null` rather than discarding the token.
///
/// # Errors
///
/// Returns [`SignInError::Storage`] if the store cannot be read.
pub fn load_session<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<Option<StoredSession>, SignInError> {
    let Some(token) = store.get(AUTH_TOKEN_KEY)?.filter(|t| !t.trim().is_empty()) else {
        return Ok(None);
    };

    let user = match store.get(USER_DATA_KEY)? {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored user data is not valid JSON");
            Value::Null
        }),
        None => Value::Null,
    };

    Ok(Some(StoredSession {
        token: SessionToken::new(token),
        user,
    }))
}

/// Removes any saved session.
///
/// # Errors
///
/// Returns [`SignInError::Storage`] if the store cannot be modified.
pub fn clear_session<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), SignInError> {
    store.remove(AUTH_TOKEN_KEY)?;
    store.remove(USER_DATA_KEY)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_session() -> StoredSession {
        StoredSession {
            token: SessionToken::new("jwt-abc"),
            user: json!({ "email": "ada@example.org", "name": "Ada" }),
        }
    }

    #[test]
    fn login_request_wire_format() {
        let request = LoginRequest {
            token: Credential::new("id-token"),
        };
        assert_eq!(
            serde_json::to_value(&request).expect("serializable"),
            json!({ "token": "id-token" })
        );
    }

    #[test]
    fn secrets_are_redacted_in_debug() {
        let request = LoginRequest {
            token: Credential::new("id-token"),
        };
        let rendered = format!("{request:?} {:?}", SessionToken::new("jwt-abc"));
        assert!(!rendered.contains("id-token"));
        assert!(!rendered.contains("jwt-abc"));
    }

    #[test]
    fn save_writes_both_keys() {
        let store = MemoryStore::new();
        save_session(&store, &sample_session()).expect("save");

        assert_eq!(
            store.get(AUTH_TOKEN_KEY).expect("read").as_deref(),
            Some("jwt-abc")
        );
        let user: Value =
            serde_json::from_str(&store.get(USER_DATA_KEY).expect("read").expect("present"))
                .expect("user json");
        assert_eq!(user["email"], "ada@example.org");
    }

    #[test]
    fn load_round_trips_saved_session() {
        let store = MemoryStore::new();
        save_session(&store, &sample_session()).expect("save");
        let loaded = load_session(&store).expect("load").expect("session present");
        assert_eq!(loaded, sample_session());
        assert_eq!(loaded.display_name(), "Ada");
    }

    #[test]
    fn load_without_token_is_none() {
        let store = MemoryStore::new();
        store.set(USER_DATA_KEY, "{}").expect("set");
        assert_eq!(load_session(&store).expect("load"), None);

        store.set(AUTH_TOKEN_KEY, "  ").expect("set");
        assert_eq!(load_session(&store).expect("load"), None);
    }

    #[test]
    fn corrupt_user_data_keeps_token() {
        let store = MemoryStore::new();
        store.set(AUTH_TOKEN_KEY, "jwt-abc").expect("set");
        store.set(USER_DATA_KEY, "{not json").expect("set");

        let loaded = load_session(&store).expect("load").expect("session present");
        assert_eq!(loaded.token, SessionToken::new("jwt-abc"));
        assert_eq!(loaded.user, Value::Null);
        assert_eq!(loaded.display_name(), "Signed in");
    }

    #[test]
    fn clear_removes_everything() {
        let store = MemoryStore::new();
        save_session(&store, &sample_session()).expect("save");
        clear_session(&store).expect("clear");
        assert_eq!(store.get(AUTH_TOKEN_KEY).expect("read"), None);
        assert_eq!(store.get(USER_DATA_KEY).expect("read"), None);
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let session = StoredSession {
            token: SessionToken::new("t"),
            user: json!({ "name": "", "email": "ada@example.org" }),
        };
        assert_eq!(session.display_name(), "ada@example.org");
    }
}
