//! `window.localStorage` as a `KeyValueStore`.

use stickynotes_core::{KeyValueStore, RepoError, RepoResult};
use wasm_bindgen::JsValue;
use web_sys::Storage;

pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Fails when there is no window or storage is disabled.
    pub fn from_window() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
        let storage = window
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("localStorage is disabled"))?;
        Ok(Self::new(storage))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        self.storage.get_item(key).map_err(storage_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.storage.set_item(key, value).map_err(storage_error)
    }

    fn remove_item(&mut self, key: &str) -> RepoResult<()> {
        self.storage.remove_item(key).map_err(storage_error)
    }
}

fn storage_error(err: JsValue) -> RepoError {
    RepoError::Storage(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
