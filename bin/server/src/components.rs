//! Small presentational components shared by the pages.

use analytics_dashboard_core::SignInError;
use leptos::prelude::*;

/// Spinning progress indicator with a caption.
#[component]
pub fn Spinner(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="spinner-block" role="status" aria-live="polite">
            <div class="spinner" aria-hidden="true"></div>
            <p class="muted">{label}</p>
        </div>
    }
}

/// Inline sign-in error with an optional configuration hint and a reload button.
#[component]
pub fn ErrorPanel(error: SignInError) -> impl IntoView {
    let message = error.user_message();
    let hint = error.config_hint();

    view! {
        <div class="error-panel" role="alert">
            <span class="error-icon" aria-hidden="true">"!"</span>
            <div>
                <p class="error-title">"Sign-in Error"</p>
                <p class="error-message">{message}</p>
                {hint.map(|hint| view! { <p class="error-hint">{hint}</p> })}
                <button type="button" class="link-button" on:click=move |_| reload_page()>
                    "Reload"
                </button>
            </div>
        </div>
    }
}

fn reload_page() {
    #[cfg(feature = "hydrate")]
    {
        let reloaded = web_sys::window()
            .ok_or_else(|| "no window".to_string())
            .and_then(|window| {
                window
                    .location()
                    .reload()
                    .map_err(|e| e.as_string().unwrap_or_else(|| format!("{e:?}")))
            });
        if let Err(reason) = reloaded {
            leptos::logging::warn!("Could not reload the page: {reason}");
        }
    }
}
