//! Error types for the night light controller.

use crate::store::BlobKey;

/// Errors raised while decoding a night light blob.
///
/// A blob that fails any of these checks is never repaired: the format is
/// reverse-engineered and a mismatch means the assumptions no longer hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlobError {
    /// The blob length is outside what the format allows.
    #[error("Invalid {blob} blob length {len} (expected {expected})")]
    InvalidLength {
        /// Which blob was being decoded.
        blob: &'static str,
        /// The length that was read.
        len: usize,
        /// Human readable description of the accepted lengths.
        expected: &'static str,
    },

    /// The state blob carries a mode flag that is neither enabled nor disabled.
    #[error("Unknown mode flag {0:#04x}")]
    UnknownModeFlag(u8),

    /// The mode flag does not match the blob's length.
    #[error("Mode flag {flag:#04x} does not match blob length {len}")]
    InconsistentFlag {
        /// The mode flag at offset 18.
        flag: u8,
        /// The blob length.
        len: usize,
    },
}

/// Errors reported by a [`BlobStore`](crate::BlobStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key or its value does not exist.
    #[error("{0} blob not found")]
    NotFound(BlobKey),

    /// The current account may not access the key.
    #[error("Access denied to {0} blob")]
    AccessDenied(BlobKey),

    /// Any other I/O failure.
    #[error("IO error on {key} blob: {source}")]
    Io {
        /// The key being accessed.
        key: BlobKey,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur when using the night light controller.
#[derive(Debug, thiserror::Error)]
pub enum NightLightError {
    /// The night light blobs could not be read, so the feature is unavailable
    /// on this system or account.
    #[error("Night light not supported: {0}")]
    NotSupported(#[source] StoreError),

    /// A blob violated the length or flag invariants.
    #[error("Invalid night light data: {0}")]
    InvalidData(#[from] BlobError),

    /// The requested strength is not a number.
    #[error("Invalid strength {0}")]
    InvalidStrength(f64),

    /// Writing a blob was refused.
    #[error("Access denied writing {0} blob")]
    AccessDenied(BlobKey),

    /// Writing a blob failed.
    #[error("IO error writing {key} blob: {source}")]
    Io {
        /// The key being written.
        key: BlobKey,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl NightLightError {
    /// Map a failed read to [`NightLightError::NotSupported`].
    pub(crate) fn from_read(err: StoreError) -> Self {
        Self::NotSupported(err)
    }

    /// Map a failed write, keeping the store's own classification.
    pub(crate) fn from_write(err: StoreError) -> Self {
        match err {
            StoreError::AccessDenied(key) => Self::AccessDenied(key),
            StoreError::Io { key, source } => Self::Io { key, source },
            StoreError::NotFound(key) => Self::Io {
                key,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "key vanished"),
            },
        }
    }
}

/// Crate-level result alias using [`NightLightError`].
pub type Result<T> = std::result::Result<T, NightLightError>;
