//! Core sign-in logic for the analytics dashboard.
//!
//! This crate holds everything about signing in that does not touch the DOM:
//! settings, the page state machine, readiness polling, the credential
//! exchange, and session persistence. It compiles for both the server and the
//! WASM bundle.

pub mod button;
pub mod error;
pub mod exchange;
pub mod phase;
pub mod readiness;
pub mod session;
pub mod settings;

pub use button::{ButtonOptions, ButtonSize, ButtonText, ButtonTheme};
pub use error::{CLIENT_ID_ENV_VAR, Result, SignInError};
pub use exchange::{LoginBackend, LoginReply, complete_sign_in, interpret_reply};
pub use phase::SignInPhase;
pub use readiness::{PollPolicy, wait_until_ready};
pub use session::{
    Credential, KeyValueStore, LoginRequest, LoginResponse, MemoryStore, SessionToken,
    StoredSession, clear_session, load_session, save_session,
};
pub use settings::{IDENTITY_SCRIPT_URL, SignInSettings, normalize_domain, normalize_landing_path};
