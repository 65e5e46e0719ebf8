//! Bindings to the Google Identity Services widget.
//!
//! The widget script is loaded by the page shell and exposes
//! `google.accounts.id`. Its absence is detected with [`provider_loaded`]
//! before any of the bound functions are called.

use analytics_dashboard_core::{ButtonOptions, Credential, Result, SignInError};
use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::HtmlElement;

mod ffi {
    use js_sys::Object;
    use wasm_bindgen::{JsValue, prelude::wasm_bindgen};
    use web_sys::HtmlElement;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "id"], js_name = initialize)]
        pub fn initialize(config: &Object) -> Result<(), JsValue>;

        #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "id"], js_name = renderButton)]
        pub fn render_button(parent: &HtmlElement, options: &Object) -> Result<(), JsValue>;
    }
}

/// Whether `google.accounts.id` is available on `window`.
pub fn provider_loaded() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };

    ["google", "accounts", "id"]
        .iter()
        .try_fold(JsValue::from(window), |object, key| {
            Reflect::get(&object, &JsValue::from_str(key))
                .ok()
                .filter(|value| !value.is_undefined() && !value.is_null())
        })
        .is_some()
}

/// Initializes the widget with `client_id` and registers `on_credential`.
///
/// The callback lives for the rest of the page: the widget keeps a reference
/// to it and may call it whenever the user signs in.
///
/// # Errors
///
/// Returns [`SignInError::ProviderInit`] if the widget throws.
pub fn initialize<F>(client_id: &str, mut on_credential: F) -> Result<(), SignInError>
where
    F: FnMut(std::result::Result<Credential, SignInError>) + 'static,
{
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| {
        on_credential(credential_from(&response));
    });

    let config = Object::new();
    set_field(&config, "client_id", &JsValue::from_str(client_id))?;
    set_field(&config, "callback", callback.as_ref())?;

    ffi::initialize(&config).map_err(|e| SignInError::ProviderInit {
        reason: js_error_message(&e),
    })?;
    callback.forget();
    Ok(())
}

/// Renders the sign-in button into `container`.
///
/// # Errors
///
/// Returns [`SignInError::ProviderInit`] if the widget throws.
pub fn render_button(container: &HtmlElement, options: &ButtonOptions) -> Result<(), SignInError> {
    let js_options = Object::new();
    for (key, value) in options.entries() {
        set_field(&js_options, key, &JsValue::from_str(&value))?;
    }

    ffi::render_button(container, &js_options).map_err(|e| SignInError::ProviderInit {
        reason: js_error_message(&e),
    })?;
    Ok(())
}

/// Pulls `credential` out of the widget's callback payload.
fn credential_from(response: &JsValue) -> std::result::Result<Credential, SignInError> {
    Reflect::get(response, &JsValue::from_str("credential"))
        .ok()
        .and_then(|value| value.as_string())
        .filter(|value| !value.is_empty())
        .map(Credential::new)
        .ok_or(SignInError::MissingCredential)
}

fn set_field(
    object: &Object,
    key: &str,
    value: &JsValue,
) -> std::result::Result<(), SignInError> {
    Reflect::set(object, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| SignInError::ProviderInit {
            reason: format!("failed to set '{key}': {}", js_error_message(&e)),
        })
}

fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}
