//! `window.localStorage` as a session store.

use analytics_dashboard_core::{KeyValueStore, Result, SignInError};
use wasm_bindgen::JsValue;

/// Durable browser storage scoped to the dashboard origin.
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// Opens local storage.
    ///
    /// # Errors
    ///
    /// Returns [`SignInError::Storage`] when storage is disabled or blocked.
    pub fn local() -> Result<Self, SignInError> {
        let storage = web_sys::window()
            .ok_or_else(|| storage_error("no window"))?
            .local_storage()
            .map_err(|e| storage_error(&describe(&e)))?
            .ok_or_else(|| storage_error("local storage is unavailable"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SignInError> {
        Ok(self
            .storage
            .get_item(key)
            .map_err(|e| storage_error(&describe(&e)))?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SignInError> {
        Ok(self
            .storage
            .set_item(key, value)
            .map_err(|e| storage_error(&describe(&e)))?)
    }

    fn remove(&self, key: &str) -> Result<(), SignInError> {
        Ok(self
            .storage
            .remove_item(key)
            .map_err(|e| storage_error(&describe(&e)))?)
    }
}

fn storage_error(reason: &str) -> SignInError {
    SignInError::Storage {
        reason: reason.to_string(),
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
