//! The narrow contract used to persist night light blobs.

use crate::error::StoreError;
use std::fmt;

/// The two logical keys the night light feature keeps its blobs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobKey {
    /// The enabled/disabled state blob.
    State,
    /// The colour temperature settings blob.
    Settings,
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobKey::State => write!(f, "state"),
            BlobKey::Settings => write!(f, "settings"),
        }
    }
}

/// A byte store holding whole blobs.
///
/// Reads and writes are independent calls; nothing ties a write to the read
/// that preceded it, so two writers racing on one key can lose an update.
pub trait BlobStore {
    /// Read the full blob stored under `key`.
    fn read(&self, key: BlobKey) -> Result<Vec<u8>, StoreError>;

    /// Replace the blob stored under `key`.
    fn write(&self, key: BlobKey, data: &[u8]) -> Result<(), StoreError>;
}

impl<S: BlobStore + ?Sized> BlobStore for &S {
    fn read(&self, key: BlobKey) -> Result<Vec<u8>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: BlobKey, data: &[u8]) -> Result<(), StoreError> {
        (**self).write(key, data)
    }
}
