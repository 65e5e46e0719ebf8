//! Server function exposing the public sign-in settings to the page.

use analytics_dashboard_core::SignInSettings;
use leptos::prelude::*;

/// Returns the sign-in settings this server was configured with.
///
/// Served outside `/api`, which belongs to the backend.
#[server(prefix = "/rpc")]
pub async fn get_sign_in_settings() -> Result<SignInSettings, ServerFnError> {
    use crate::error::SettingsError;
    use axum::Extension;
    use std::sync::Arc;

    let Extension(settings): Extension<Arc<SignInSettings>> = leptos_axum::extract()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "sign-in settings extension missing");
            SettingsError::NotConfigured {
                details: e.to_string(),
            }
            .into_server_error()
        })?;

    Ok(settings.as_ref().clone())
}
