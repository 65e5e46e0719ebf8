//! Forwarding of `/api` requests to the dashboard backend.
//!
//! The sign-in page posts credentials to a same-origin endpoint; this module
//! relays those requests (and any other `/api` call) to the configured
//! backend unchanged apart from hop-by-hop headers.

use crate::config::BackendConfig;
use crate::error::ProxyError;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Duration;

/// Headers that describe a single connection and must not be relayed.
const HOP_BY_HOP: [&str; 10] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

/// HTTP client bound to the backend base URL.
pub struct BackendProxy {
    client: reqwest::Client,
    base_url: String,
}

impl BackendProxy {
    /// Creates a proxy for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Backend URL for an incoming request URI.
    fn target(&self, uri: &Uri) -> String {
        target_url(&self.base_url, uri)
    }
}

fn target_url(base_url: &str, uri: &Uri) -> String {
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |path| path.as_str());
    format!("{base_url}{path}")
}

fn is_hop_by_hop(name: &header::HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Copies end-to-end headers.
fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !is_hop_by_hop(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Relays a request to the backend and returns its answer.
pub async fn forward(
    State(proxy): State<Arc<BackendProxy>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let target = proxy.target(&uri);
    tracing::debug!(%method, %target, "forwarding request to backend");

    let url = reqwest::Url::parse(&target).map_err(|e| ProxyError::InvalidTarget {
        target: target.clone(),
        reason: e.to_string(),
    })?;

    let upstream = proxy
        .client
        .request(method.clone(), url)
        .headers(forwardable_headers(&headers))
        .body(body)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                ProxyError::Timeout {
                    target: target.clone(),
                }
            } else {
                ProxyError::Unreachable {
                    target: target.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

    let status = upstream.status();
    let response_headers = forwardable_headers(upstream.headers());
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| ProxyError::BodyFailed {
            target: target.clone(),
            reason: e.to_string(),
        })?;

    if status.is_server_error() {
        tracing::warn!(%method, %target, status = status.as_u16(), "backend returned error");
    } else {
        tracing::debug!(%method, %target, status = status.as_u16(), "backend responded");
    }

    Ok((status, response_headers, bytes).into_response())
}
