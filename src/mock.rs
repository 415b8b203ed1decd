//! In-memory blob store for testing.

use crate::error::StoreError;
use crate::settings::sample_settings;
use crate::state::{NightLightMode, sample_state};
use crate::store::{BlobKey, BlobStore};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory [`BlobStore`].
///
/// This allows testing code that depends on [`NightLight`](crate::NightLight)
/// without touching the registry.
///
/// # Example
///
/// ```
/// use lumos_core::{MockStore, NightLight, NightLightControl};
///
/// let night_light = NightLight::new(MockStore::new());
/// night_light.enable().unwrap();
/// assert!(night_light.is_enabled().unwrap());
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    blobs: HashMap<BlobKey, Vec<u8>>,
    writes: Vec<BlobKey>,
    deny_writes: bool,
}

impl MockStore {
    /// Create a store holding a disabled state blob and a 50% strength
    /// settings blob.
    pub fn new() -> Self {
        let store = Self::empty();
        store.insert(BlobKey::State, sample_state(NightLightMode::Disabled, [1, 0, 0, 0, 0]));
        store.insert(BlobKey::Settings, sample_settings(3850.0, 48));
        store
    }

    /// Create a store with no blobs; every read fails with `NotFound`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a store whose state blob has the given mode.
    pub fn with_mode(mode: NightLightMode) -> Self {
        let store = Self::new();
        store.insert(BlobKey::State, sample_state(mode, [1, 0, 0, 0, 0]));
        store
    }

    /// Replace the blob under `key` without counting it as a write.
    pub fn insert(&self, key: BlobKey, data: Vec<u8>) {
        self.lock().blobs.insert(key, data);
    }

    /// The blob currently stored under `key`.
    pub fn get(&self, key: BlobKey) -> Option<Vec<u8>> {
        self.lock().blobs.get(&key).cloned()
    }

    /// Every key written so far, in order.
    pub fn writes(&self) -> Vec<BlobKey> {
        self.lock().writes.clone()
    }

    /// Make every subsequent write fail with `AccessDenied`.
    pub fn deny_writes(&self) {
        self.lock().deny_writes = true;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means another test thread panicked mid-call.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BlobStore for MockStore {
    fn read(&self, key: BlobKey) -> Result<Vec<u8>, StoreError> {
        self.lock()
            .blobs
            .get(&key)
            .cloned()
            .ok_or(StoreError::NotFound(key))
    }

    fn write(&self, key: BlobKey, data: &[u8]) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.deny_writes {
            return Err(StoreError::AccessDenied(key));
        }
        inner.blobs.insert(key, data.to_vec());
        inner.writes.push(key);
        Ok(())
    }
}
