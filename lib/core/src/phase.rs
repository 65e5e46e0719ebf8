//! Sign-in page state.
//!
//! The page renders exactly one of three states: loading, ready, or failed.
//! While ready, a credential exchange may be in flight, which the page shows
//! as an extra progress indicator next to the button.

use crate::error::SignInError;

/// What the sign-in page is currently showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SignInPhase {
    /// Waiting for the identity provider.
    #[default]
    Loading,
    /// The provider button is rendered.
    Ready { authenticating: bool },
    /// Sign-in cannot continue without user action.
    Failed(SignInError),
}

impl SignInPhase {
    /// The provider button has been rendered.
    #[must_use]
    pub fn provider_ready(self) -> Self {
        match self {
            Self::Loading => Self::Ready {
                authenticating: false,
            },
            other => other,
        }
    }

    /// A credential arrived and is being exchanged; clears any earlier error.
    #[must_use]
    pub fn begin_authentication(self) -> Self {
        Self::Ready {
            authenticating: true,
        }
    }

    /// Sign-in failed with `error`.
    #[must_use]
    pub fn fail(self, error: SignInError) -> Self {
        Self::Failed(error)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    #[must_use]
    pub fn is_authenticating(&self) -> bool {
        matches!(
            self,
            Self::Ready {
                authenticating: true
            }
        )
    }

    #[must_use]
    pub fn error(&self) -> Option<&SignInError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exactly_one_state(phase: &SignInPhase) -> bool {
        [phase.is_loading(), phase.is_ready(), phase.error().is_some()]
            .iter()
            .filter(|shown| **shown)
            .count()
            == 1
    }

    #[test]
    fn starts_loading() {
        let phase = SignInPhase::default();
        assert!(phase.is_loading());
        assert!(exactly_one_state(&phase));
    }

    #[test]
    fn happy_path() {
        let phase = SignInPhase::default().provider_ready();
        assert!(phase.is_ready());
        assert!(!phase.is_authenticating());

        let phase = phase.begin_authentication();
        assert!(phase.is_ready());
        assert!(phase.is_authenticating());
        assert!(exactly_one_state(&phase));
    }

    #[test]
    fn provider_ready_does_not_mask_failure() {
        let phase = SignInPhase::default()
            .fail(SignInError::ClientIdMissing)
            .provider_ready();
        assert_eq!(phase.error(), Some(&SignInError::ClientIdMissing));
        assert!(exactly_one_state(&phase));
    }

    #[test]
    fn new_credential_clears_previous_error() {
        let phase = SignInPhase::default()
            .provider_ready()
            .begin_authentication()
            .fail(SignInError::Timeout);
        assert!(!phase.is_ready());

        let phase = phase.begin_authentication();
        assert_eq!(phase.error(), None);
        assert!(phase.is_authenticating());
    }
}
