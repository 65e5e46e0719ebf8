//! Drives the sign-in page: wait for the widget, wire its callback to the
//! credential exchange, render the button, and report progress through the
//! page's phase signal.

use crate::browser::{http::FetchBackend, identity, storage::BrowserStorage};
use analytics_dashboard_core::{
    Credential, Result, SignInError, SignInPhase, SignInSettings, StoredSession, clear_session,
    complete_sign_in, load_session, wait_until_ready,
};
use gloo_timers::future::sleep;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use web_sys::HtmlElement;

/// Called with the landing path after a session has been stored.
pub type OnSignedIn = Rc<dyn Fn(&str)>;

/// Sets up the widget inside `container`; failures land in `phase`.
pub async fn start(
    settings: SignInSettings,
    container: HtmlElement,
    phase: RwSignal<SignInPhase>,
    on_signed_in: OnSignedIn,
) {
    if let Err(report) = attach(&settings, &container, phase, on_signed_in).await {
        let error = report.current_context().clone();
        leptos::logging::error!("Sign-in setup failed: {error}");
        phase.update(|current| *current = std::mem::take(current).fail(error));
    }
}

async fn attach(
    settings: &SignInSettings,
    container: &HtmlElement,
    phase: RwSignal<SignInPhase>,
    on_signed_in: OnSignedIn,
) -> Result<(), SignInError> {
    let client_id = settings
        .client_id()
        .ok_or(SignInError::ClientIdMissing)?
        .to_string();

    wait_until_ready(&settings.poll_policy(), identity::provider_loaded, sleep).await?;

    let endpoint = settings.login_endpoint.clone();
    let request_timeout_ms = settings.request_timeout_ms;
    let landing_path = settings.landing_path.clone();

    identity::initialize(&client_id, move |credential| {
        phase.update(|current| *current = std::mem::take(current).begin_authentication());

        let endpoint = endpoint.clone();
        let landing_path = landing_path.clone();
        let on_signed_in = Rc::clone(&on_signed_in);
        spawn_local(async move {
            match exchange(credential, &endpoint, request_timeout_ms).await {
                Ok(_) => on_signed_in(&landing_path),
                Err(report) => {
                    let error = report.current_context().clone();
                    leptos::logging::error!("Login error: {error}");
                    phase.update(|current| *current = std::mem::take(current).fail(error));
                }
            }
        });
    })?;

    identity::render_button(container, &settings.button)?;
    phase.update(|current| *current = std::mem::take(current).provider_ready());
    Ok(())
}

async fn exchange(
    credential: std::result::Result<Credential, SignInError>,
    endpoint: &str,
    request_timeout_ms: u32,
) -> Result<StoredSession, SignInError> {
    let credential = credential?;
    let store = BrowserStorage::local()?;
    let backend = FetchBackend::new(endpoint, request_timeout_ms);
    complete_sign_in(&backend, &store, credential).await
}

/// Returns the session saved by a previous sign-in, if any.
pub fn stored_session() -> Option<StoredSession> {
    let loaded = BrowserStorage::local().and_then(|store| load_session(&store));
    match loaded {
        Ok(session) => session,
        Err(report) => {
            leptos::logging::warn!("Could not read stored session: {}", report.current_context());
            None
        }
    }
}

/// Forgets the stored session.
pub fn sign_out() {
    if let Err(report) = BrowserStorage::local().and_then(|store| clear_session(&store)) {
        leptos::logging::warn!("Could not clear stored session: {}", report.current_context());
    }
}
