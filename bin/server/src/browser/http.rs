//! Login transport over `fetch`, with an abort-based timeout so a stalled
//! backend cannot leave the page spinning forever.

use analytics_dashboard_core::{LoginBackend, LoginReply, LoginRequest, Result, SignInError};
use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use web_sys::AbortController;

/// Posts login requests to a same-origin JSON endpoint.
pub struct FetchBackend {
    endpoint: String,
    timeout_ms: u32,
}

impl FetchBackend {
    pub fn new(endpoint: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_ms,
        }
    }

    /// Sends `payload` and reads the whole reply before the timer fires.
    async fn exchange(&self, payload: String) -> std::result::Result<LoginReply, SignInError> {
        let controller = AbortController::new().map_err(|_| SignInError::Network {
            reason: "failed to initialize request timeout".to_string(),
        })?;
        let signal = controller.signal();
        let timeout_controller = controller.clone();
        // Dropping the timer cancels it, so it must outlive the body read.
        let timeout = Timeout::new(self.timeout_ms, move || timeout_controller.abort());

        let request = Request::post(&self.endpoint)
            .header("Content-Type", "application/json")
            .abort_signal(Some(&signal))
            .body(payload)
            .map_err(|e| SignInError::Network {
                reason: format!("failed to build request: {e}"),
            })?;

        let response = request.send().await.map_err(map_request_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_request_error)?;
        drop(timeout);

        Ok(LoginReply { status, body })
    }
}

#[async_trait(?Send)]
impl LoginBackend for FetchBackend {
    async fn submit(&self, request: &LoginRequest) -> Result<LoginReply, SignInError> {
        let payload = serde_json::to_string(request).map_err(|e| SignInError::Network {
            reason: format!("failed to encode request: {e}"),
        })?;

        Ok(self.exchange(payload).await?)
    }
}

/// Distinguishes aborted (timed out) requests from other transport failures.
fn map_request_error(err: gloo_net::Error) -> SignInError {
    match err {
        gloo_net::Error::JsError(js) => SignInError::from_transport(&js.name, js.message),
        other => SignInError::Network {
            reason: other.to_string(),
        },
    }
}
