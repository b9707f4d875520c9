//! localStorage-backed Identity Store
//!
//! One string under one fixed key, durable across reloads of the same
//! origin. Storage failures (private mode, disabled storage) degrade to
//! "no persisted identity" rather than breaking the gate.

use gatekeeper_core::{Identity, IdentityStore};
use web_sys::Storage;

pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl IdentityStore for LocalStorageStore {
    fn load(&self) -> Option<Identity> {
        let raw = Self::storage()?.get_item(&self.key).ok().flatten()?;
        if raw.is_empty() {
            return None;
        }
        Some(Identity::new(raw))
    }

    fn save(&self, identity: &Identity) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(&self.key, identity.as_str()).is_err() {
                    log::warn!("could not persist ticket, a reload will rejoin the queue");
                }
            }
            None => log::warn!("localStorage unavailable, ticket kept in memory only"),
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}
