//! Черновики форм в localStorage.
//!
//! Drafts are JSON under a per-form key. Storage is behind [`DraftStorage`]
//! so tests can run against [`MemoryStorage`].

use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;
use web_sys::window;

const DRAFT_PREFIX: &str = "draft:";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("storage call failed: {0}")]
    Js(String),
    #[error("draft is not serializable: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub trait DraftStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

fn js_error(e: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Js(format!("{:?}", e))
}

impl DraftStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?.remove_item(key).map_err(js_error)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl DraftStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Один именованный черновик
pub struct PersistedDraft<S: DraftStorage> {
    key: String,
    storage: S,
}

impl<S: DraftStorage> PersistedDraft<S> {
    pub fn new(name: &str, storage: S) -> Self {
        Self {
            key: format!("{}{}", DRAFT_PREFIX, name),
            storage,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// A corrupt draft is removed and reported as absent
    pub fn load<T: DeserializeOwned>(&self) -> Option<T> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("draft {} not readable: {}", self.key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("dropping corrupt draft {}: {}", self.key, e);
                if let Err(e) = self.storage.remove_item(&self.key) {
                    log::warn!("corrupt draft {} not removed: {}", self.key, e);
                }
                None
            }
        }
    }

    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.storage.set_item(&self.key, &json)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)
    }

    /// Default values are not worth keeping: the key is removed instead
    pub fn sync<T: Serialize + Default + PartialEq>(&self, value: &T) -> Result<(), StorageError> {
        if *value == T::default() {
            self.clear()
        } else {
            self.save(value)
        }
    }
}

pub fn clear_persisted_draft(name: &str) {
    if let Err(e) = PersistedDraft::new(name, BrowserStorage).clear() {
        log::warn!("draft {} not cleared: {}", name, e);
    }
}

/// Restores the draft once, then mirrors every change of `value` into localStorage.
///
/// Returns a clear function for successful submissions.
pub fn use_persisted_draft<T>(
    name: &'static str,
    value: Signal<T>,
    restore: impl FnOnce(T),
) -> impl Fn() + Clone + Copy + 'static
where
    T: Serialize + DeserializeOwned + Default + PartialEq + Clone + Send + Sync + 'static,
{
    let draft = PersistedDraft::new(name, BrowserStorage);
    if let Some(saved) = draft.load::<T>() {
        log::debug!("restored draft {}", draft.key());
        restore(saved);
    }

    Effect::new(move |_| {
        let current = value.get();
        if let Err(e) = PersistedDraft::new(name, BrowserStorage).sync(&current) {
            log::warn!("draft {} not saved: {}", name, e);
        }
    });

    move || clear_persisted_draft(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct LoginDraft {
        login: String,
    }

    #[test]
    fn test_save_and_load() {
        let draft = PersistedDraft::new("login-form", MemoryStorage::default());
        assert_eq!(draft.key(), "draft:login-form");
        assert_eq!(draft.load::<LoginDraft>(), None);
        draft
            .save(&LoginDraft {
                login: "admin".into(),
            })
            .unwrap();
        assert_eq!(
            draft.load::<LoginDraft>(),
            Some(LoginDraft {
                login: "admin".into()
            })
        );
        draft.clear().unwrap();
        assert_eq!(draft.load::<LoginDraft>(), None);
    }

    #[test]
    fn test_corrupt_draft_is_dropped() {
        let storage = MemoryStorage::default();
        storage.set_item("draft:wb-order", "{not json").unwrap();
        let draft = PersistedDraft::new("wb-order", storage);
        assert_eq!(draft.load::<LoginDraft>(), None);
        assert_eq!(draft.storage.get_item("draft:wb-order").unwrap(), None);
    }

    /// Read-only storage: removal always fails
    struct ReadOnlyStorage(MemoryStorage);

    impl DraftStorage for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get_item(key)
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Js("read-only".into()))
        }
        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Js("read-only".into()))
        }
    }

    #[test]
    fn test_corrupt_draft_reported_absent_when_not_removable() {
        let inner = MemoryStorage::default();
        inner.set_item("draft:login-form", "[").unwrap();
        let draft = PersistedDraft::new("login-form", ReadOnlyStorage(inner));
        assert_eq!(draft.load::<LoginDraft>(), None);
        assert!(draft.storage.get_item(draft.key()).unwrap().is_some());
    }

    #[test]
    fn test_sync_removes_default_value() {
        let draft = PersistedDraft::new("signup-form", MemoryStorage::default());
        draft
            .sync(&LoginDraft {
                login: "x".into(),
            })
            .unwrap();
        assert!(draft.storage.get_item(draft.key()).unwrap().is_some());
        draft.sync(&LoginDraft::default()).unwrap();
        assert_eq!(draft.storage.get_item(draft.key()).unwrap(), None);
    }
}
