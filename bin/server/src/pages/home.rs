//! Landing page reached after signing in.

use crate::components::Spinner;
use leptos::prelude::*;

/// The landing page component.
///
/// Sessions live in browser storage, so the server always renders the
/// loading state and the browser decides between greeting and redirect.
#[component]
pub fn HomePage() -> impl IntoView {
    let (user_label, set_user_label) = signal(Option::<String>::None);

    let navigate = leptos_router::hooks::use_navigate();

    #[cfg(feature = "hydrate")]
    {
        use crate::browser::sign_in;

        let navigate = navigate.clone();
        Effect::new(move |_| match sign_in::stored_session() {
            Some(session) => set_user_label.set(Some(session.display_name())),
            None => navigate("/login", Default::default()),
        });
    }

    let sign_out = move |_| {
        #[cfg(feature = "hydrate")]
        crate::browser::sign_in::sign_out();
        set_user_label.set(None);
        navigate("/login", Default::default());
    };

    view! {
        <div class="home-page">
            {move || match user_label.get() {
                Some(label) => view! {
                    <div class="login-card">
                        <h1>"Analytics Dashboard"</h1>
                        <p>"Signed in as " <strong>{label}</strong></p>
                        <button type="button" class="link-button" on:click=sign_out.clone()>
                            "Sign out"
                        </button>
                    </div>
                }
                .into_any(),
                None => view! { <Spinner label="Loading..."/> }.into_any(),
            }}
        </div>
    }
}
