//! Browser `localStorage` implementation for WebAssembly.

use super::{Storage, StorageError, StorageResult};
use wasm_bindgen::JsValue;

/// Storage backed by `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn backend(&self) -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window available".to_string()))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Other("localStorage is unavailable".to_string()))
    }
}

fn js_error(e: JsValue) -> StorageError {
    StorageError::Io(format!("{:?}", e))
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> StorageResult<String> {
        self.backend()?
            .get_item(key)
            .map_err(js_error)?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.backend()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.backend()?.remove_item(key).map_err(js_error)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let backend = self.backend()?;
        let len = backend.length().map_err(js_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = backend.key(index).map_err(js_error)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
