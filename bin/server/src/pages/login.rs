//! Sign-in page.
//!
//! Shows one of three states (loading, ready, failed) while the identity
//! widget loads, then exchanges the widget's credential for a dashboard
//! session and navigates to the landing page.

use crate::components::{ErrorPanel, Spinner};
use crate::settings::get_sign_in_settings;
use analytics_dashboard_core::{SignInError, SignInPhase, SignInSettings};
use leptos::prelude::*;

/// Sign-in page component.
#[component]
pub fn LoginPage() -> impl IntoView {
    let settings = Resource::new(|| (), |_| get_sign_in_settings());

    view! {
        <div class="login-page">
            <Suspense fallback=move || view! { <Spinner label="Loading sign-in..."/> }>
                {move || {
                    settings.get().map(|result| match result {
                        Ok(settings) => view! { <SignInCard settings=settings/> }.into_any(),
                        Err(e) => {
                            let error = SignInError::SettingsUnavailable {
                                reason: e.to_string(),
                            };
                            view! {
                                <div class="login-card">
                                    <ErrorPanel error=error/>
                                </div>
                            }
                            .into_any()
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

/// The sign-in card for a given configuration.
#[component]
fn SignInCard(settings: SignInSettings) -> impl IntoView {
    let phase = RwSignal::new(SignInPhase::default());
    let container = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    {
        use crate::browser::sign_in;
        use leptos::task::spawn_local;
        use leptos_router::hooks::use_navigate;
        use std::rc::Rc;

        let navigate = use_navigate();
        let started = StoredValue::new(false);
        let settings = settings.clone();

        Effect::new(move |_| {
            let Some(element) = container.get() else {
                return;
            };
            if started.get_value() {
                return;
            }
            started.set_value(true);

            if sign_in::stored_session().is_some() {
                navigate(&settings.landing_path, Default::default());
                return;
            }

            let navigate = navigate.clone();
            let on_signed_in: sign_in::OnSignedIn =
                Rc::new(move |path: &str| navigate(path, Default::default()));
            let element: web_sys::HtmlElement = element.into();
            spawn_local(sign_in::start(settings.clone(), element, phase, on_signed_in));
        });
    }

    let subtitle = settings.subtitle();
    let access_policy = settings.access_policy();

    view! {
        <div class="login-card">
            <header class="login-header">
                <h1>{settings.title.clone()}</h1>
                <p class="muted">{subtitle}</p>
            </header>
            <section class="login-body">
                <Show when=move || phase.with(SignInPhase::is_loading)>
                    <Spinner label="Loading sign-in..."/>
                </Show>

                <div
                    id="google-signin-button"
                    class="signin-button"
                    class:hidden=move || !phase.with(SignInPhase::is_ready)
                    node_ref=container
                ></div>

                {move || {
                    phase.with(|current| current.error().cloned())
                        .map(|error| view! { <ErrorPanel error=error/> })
                }}

                <Show when=move || phase.with(SignInPhase::is_authenticating)>
                    <Spinner label="Authenticating..."/>
                </Show>

                {access_policy.map(|policy| view! {
                    <footer class="access-policy">
                        <p><strong>"Access Policy:"</strong></p>
                        <p>{policy}</p>
                    </footer>
                })}
            </section>
        </div>
    }
}
