//! The night light state blob.
//!
//! Layout, as far as it is known:
//!
//! ```text
//! 0..=21   fixed prefix, copied across every transition
//!   10..=14  modification counter (inside the prefix)
//!   18       mode flag: 0x13 disabled, 0x15 enabled
//! 22       separator byte
//! 23..=24  enabled shape only: active marker 0x10 0x00
//! rest     opaque tail, shifted by two when the marker is spliced in or out
//! ```

use crate::error::BlobError;
use crate::timestamp::{advance_timestamp, counter_value};
use log::debug;

/// Offset of the mode flag.
pub const MODE_FLAG_OFFSET: usize = 18;
/// Mode flag value of a disabled blob.
pub const FLAG_DISABLED: u8 = 0x13;
/// Mode flag value of an enabled blob.
pub const FLAG_ENABLED: u8 = 0x15;

/// Total length of a disabled blob.
pub const DISABLED_LEN: usize = 41;
/// Total length of an enabled blob: the disabled shape plus the marker.
pub const ENABLED_LEN: usize = DISABLED_LEN + ACTIVE_MARKER.len();

/// Bytes 0..PREFIX_LEN never change meaning between the two shapes.
const PREFIX_LEN: usize = 22;
/// Sits between the prefix and the marker; the successor blob always carries 0.
const SEPARATOR_OFFSET: usize = 22;
/// Where the marker starts in the enabled shape, and where the tail starts in
/// the disabled one.
const MARKER_OFFSET: usize = 23;
/// Present only while the feature is on.
const ACTIVE_MARKER: [u8; 2] = [0x10, 0x00];

/// Whether the night light is on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NightLightMode {
    /// The feature is active.
    Enabled,
    /// The feature is inactive.
    Disabled,
}

/// A validated state blob.
///
/// The bytes are the wire layout; encoding is the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateBlob {
    bytes: Vec<u8>,
}

impl StateBlob {
    /// Validate `bytes` as a state blob.
    ///
    /// # Errors
    ///
    /// - [`BlobError::InvalidLength`] unless the length is 41 or 43
    /// - [`BlobError::UnknownModeFlag`] if offset 18 is neither `0x13` nor `0x15`
    /// - [`BlobError::InconsistentFlag`] if the flag and the length disagree
    pub fn decode(bytes: Vec<u8>) -> Result<Self, BlobError> {
        let len = bytes.len();
        if len != DISABLED_LEN && len != ENABLED_LEN {
            return Err(BlobError::InvalidLength {
                blob: "state",
                len,
                expected: "41 or 43",
            });
        }

        let flag = bytes[MODE_FLAG_OFFSET];
        let expected_len = match flag {
            FLAG_DISABLED => DISABLED_LEN,
            FLAG_ENABLED => ENABLED_LEN,
            other => return Err(BlobError::UnknownModeFlag(other)),
        };
        if len != expected_len {
            return Err(BlobError::InconsistentFlag { flag, len });
        }

        let blob = Self { bytes };
        debug!(
            "decoded state blob: mode={:?}, counter={}",
            blob.mode(),
            blob.timestamp()
        );
        Ok(blob)
    }

    /// Whether the blob is the enabled shape.
    pub fn is_enabled(&self) -> bool {
        self.bytes[MODE_FLAG_OFFSET] == FLAG_ENABLED
    }

    /// The mode this blob encodes.
    pub fn mode(&self) -> NightLightMode {
        if self.is_enabled() {
            NightLightMode::Enabled
        } else {
            NightLightMode::Disabled
        }
    }

    /// Build the opposite-mode blob.
    ///
    /// The marker is spliced in or out right after the separator, the tail
    /// moves with it and the modification counter of the result is advanced.
    pub fn toggled(&self) -> StateBlob {
        let mut next = if self.is_enabled() {
            let mut next = vec![0u8; DISABLED_LEN];
            next[..PREFIX_LEN].copy_from_slice(&self.bytes[..PREFIX_LEN]);
            next[MARKER_OFFSET..]
                .copy_from_slice(&self.bytes[MARKER_OFFSET + ACTIVE_MARKER.len()..]);
            next[MODE_FLAG_OFFSET] = FLAG_DISABLED;
            next
        } else {
            let mut next = vec![0u8; ENABLED_LEN];
            next[..PREFIX_LEN].copy_from_slice(&self.bytes[..PREFIX_LEN]);
            next[MARKER_OFFSET + ACTIVE_MARKER.len()..]
                .copy_from_slice(&self.bytes[MARKER_OFFSET..]);
            next[MARKER_OFFSET..MARKER_OFFSET + ACTIVE_MARKER.len()]
                .copy_from_slice(&ACTIVE_MARKER);
            next[MODE_FLAG_OFFSET] = FLAG_ENABLED;
            next
        };
        next[SEPARATOR_OFFSET] = 0;
        advance_timestamp(&mut next);

        StateBlob { bytes: next }
    }

    /// The current value of the modification counter.
    pub fn timestamp(&self) -> u64 {
        counter_value(&self.bytes)
    }

    /// The encoded bytes.
    pub fn encode(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the blob and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; a decoded blob is never empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Build a plausible state blob for the in-memory store.
///
/// Every byte outside the flag, separator and marker is filled with a value
/// derived from its offset so that shifts are easy to spot.
pub(crate) fn sample_state(mode: NightLightMode, counter: [u8; 5]) -> Vec<u8> {
    let len = match mode {
        NightLightMode::Enabled => ENABLED_LEN,
        NightLightMode::Disabled => DISABLED_LEN,
    };
    let mut bytes: Vec<u8> = (0..len).map(|i| 0x40 + i as u8).collect();
    bytes[crate::timestamp::TIMESTAMP_RANGE].copy_from_slice(&counter);
    bytes[SEPARATOR_OFFSET] = 0;
    match mode {
        NightLightMode::Enabled => {
            bytes[MODE_FLAG_OFFSET] = FLAG_ENABLED;
            bytes[MARKER_OFFSET..MARKER_OFFSET + ACTIVE_MARKER.len()]
                .copy_from_slice(&ACTIVE_MARKER);
        }
        NightLightMode::Disabled => bytes[MODE_FLAG_OFFSET] = FLAG_DISABLED,
    }
    bytes
}
