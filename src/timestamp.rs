//! The modification counter shared by both blobs.
//!
//! Bytes 10..=14 of each blob act as a "last modified" marker. The OS only
//! picks up a rewritten blob when this counter has moved.

use log::warn;
use std::ops::Range;

/// Offsets of the counter window.
pub const TIMESTAMP_RANGE: Range<usize> = 10..15;

/// Advance the counter in `blob`.
///
/// The first byte of the window that is not `0xFF` is incremented and the
/// scan stops there; lower bytes are never reset. Returns `false` when every
/// byte is `0xFF`, in which case nothing is written.
///
/// # Panics
///
/// Panics if `blob` is shorter than `TIMESTAMP_RANGE.end` (15) bytes.
/// [`StateBlob`](crate::StateBlob) and [`SettingsBlob`](crate::SettingsBlob)
/// always satisfy this.
pub fn advance_timestamp(blob: &mut [u8]) -> bool {
    for byte in &mut blob[TIMESTAMP_RANGE] {
        if *byte != 0xFF {
            *byte += 1;
            return true;
        }
    }

    // Wraparound semantics are unknown, so a saturated counter stays put.
    warn!("timestamp counter saturated, leaving it unchanged");
    false
}

/// Read the counter window as a little-endian integer.
///
/// # Panics
///
/// Panics if `blob` is shorter than `TIMESTAMP_RANGE.end` (15) bytes.
pub fn counter_value(blob: &[u8]) -> u64 {
    blob[TIMESTAMP_RANGE]
        .iter()
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | b as u64)
}
