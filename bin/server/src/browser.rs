//! Browser-side integrations, compiled only into the WASM bundle.
//!
//! Everything here talks to `window`: the identity provider script, local
//! storage, and `fetch`. The platform-independent halves of these flows live
//! in `analytics_dashboard_core`.

pub mod http;
pub mod identity;
pub mod sign_in;
pub mod storage;
