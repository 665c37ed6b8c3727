/// Settings persistence on top of chrome.storage.local
use crate::error::StoreError;
use crate::settings::{Settings, StoredSettings, SETTINGS_KEYS};
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;

// chrome.storage.local returns promises under Manifest V3
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    async fn storage_local_get(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    async fn storage_local_set(items: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = clear)]
    async fn storage_local_clear() -> Result<JsValue, JsValue>;
}

/// Key-value store holding the settings record.
///
/// Each call is a single atomic host operation; `set` replaces every key in
/// the record at once.
#[allow(async_fn_in_trait)]
pub trait SettingsStore {
    async fn get(&self) -> Result<StoredSettings, StoreError>;
    async fn set(&self, settings: &Settings) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

/// The extension's local storage area
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeStore;

impl SettingsStore for ChromeStore {
    async fn get(&self) -> Result<StoredSettings, StoreError> {
        let keys = serde_wasm_bindgen::to_value(&SETTINGS_KEYS)
            .map_err(|e| StoreError::Decode(format!("{:?}", e)))?;

        let result = storage_local_get(keys)
            .await
            .map_err(|e| StoreError::Host(format!("{:?}", e)))?;

        if result.is_null() || result.is_undefined() {
            Ok(StoredSettings::default())
        } else {
            serde_wasm_bindgen::from_value(result).map_err(|e| StoreError::Decode(format!("{:?}", e)))
        }
    }

    async fn set(&self, settings: &Settings) -> Result<(), StoreError> {
        let items =
            serde_wasm_bindgen::to_value(settings).map_err(|e| StoreError::Decode(format!("{:?}", e)))?;

        storage_local_set(items)
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Host(format!("{:?}", e)))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        storage_local_clear()
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Host(format!("{:?}", e)))
    }
}

/// In-memory store for tests and for running outside the extension
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<StoredSettings>,
    failing: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(stored: StoredSettings) -> Self {
        MemoryStore {
            data: RefCell::new(stored),
            ..Self::default()
        }
    }

    /// Make every following call fail as if the host had rejected it
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Number of successful `set` calls
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.get() {
            Err(StoreError::Host("storage unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl SettingsStore for MemoryStore {
    async fn get(&self) -> Result<StoredSettings, StoreError> {
        self.check()?;
        Ok(self.data.borrow().clone())
    }

    async fn set(&self, settings: &Settings) -> Result<(), StoreError> {
        self.check()?;
        *self.data.borrow_mut() = StoredSettings::from(settings);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.check()?;
        *self.data.borrow_mut() = StoredSettings::default();
        Ok(())
    }
}
