//! `localStorage` persistence for the browser build

use wasm_bindgen::JsValue;

use crate::model::storage::{Storage, StorageError, StorageResult};

fn js_error(value: JsValue) -> StorageError {
    StorageError::Unavailable(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// The window's `localStorage`
pub struct WebStorage {
    inner: web_sys::Storage,
}

impl WebStorage {
    /// Open the window's store; fails in private browsing or off the main thread
    pub fn open() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { inner })
    }
}

impl Storage for WebStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.inner.set_item(key, value).map_err(js_error)
    }
}
