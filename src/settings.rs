//! The night light settings blob and colour temperature conversions.

use crate::error::BlobError;
use crate::timestamp::{advance_timestamp, counter_value};
use log::debug;

/// Warmest temperature the feature offers (100% strength).
pub const MIN_KELVIN: f64 = 1200.0;
/// Neutral temperature (0% strength, no visible effect).
pub const MAX_KELVIN: f64 = 6500.0;

/// Low byte of the fixed-point temperature.
const TEMP_LO_OFFSET: usize = 0x23;
/// High byte of the fixed-point temperature.
const TEMP_HI_OFFSET: usize = 0x24;
/// Anything shorter cannot hold the temperature bytes.
pub const SETTINGS_MIN_LEN: usize = TEMP_HI_OFFSET + 1;

/// Kelvin covered by one step of the high byte.
const KELVIN_PER_HI: f64 = 64.0;
/// The low byte counts half-Kelvin steps above the band start...
const LO_STEPS_PER_KELVIN: f64 = 2.0;
/// ...biased by this amount.
const LO_BIAS: f64 = 128.0;

/// Decode the fixed-point temperature pair into Kelvin.
pub fn decode_kelvin(lo: u8, hi: u8) -> f64 {
    hi as f64 * KELVIN_PER_HI + (lo as f64 - LO_BIAS) / LO_STEPS_PER_KELVIN
}

/// Encode Kelvin into the fixed-point `(lo, hi)` pair.
///
/// Both bytes are truncated, never rounded, so a decode after encode can land
/// up to half a Kelvin below the input.
pub fn encode_kelvin(kelvin: f64) -> (u8, u8) {
    let hi = (kelvin / KELVIN_PER_HI) as u8;
    let lo = ((kelvin - hi as f64 * KELVIN_PER_HI) * LO_STEPS_PER_KELVIN + LO_BIAS) as u8;
    (lo, hi)
}

/// Convert Kelvin to strength. Not clamped: values outside the Kelvin domain
/// map outside 0..=100.
pub fn percentage_of(kelvin: f64) -> f64 {
    100.0 - (kelvin - MIN_KELVIN) / (MAX_KELVIN - MIN_KELVIN) * 100.0
}

/// Convert strength to Kelvin, clamping `percentage` to 0..=100 first.
///
/// NaN is treated as 0%, the neutral setting, so the result always lies in
/// the Kelvin domain.
pub fn kelvin_of_percentage(percentage: f64) -> f64 {
    let percentage = if percentage.is_nan() {
        0.0
    } else {
        percentage.clamp(0.0, 100.0)
    };
    MAX_KELVIN - percentage / 100.0 * (MAX_KELVIN - MIN_KELVIN)
}

/// A validated settings blob.
///
/// Only the temperature and the modification counter are interpreted; every
/// other byte, including any trailing content, is carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsBlob {
    bytes: Vec<u8>,
}

impl SettingsBlob {
    /// Validate `bytes` as a settings blob.
    ///
    /// # Errors
    /// Returns [`BlobError::InvalidLength`] if the blob is too short to hold
    /// the temperature.
    pub fn decode(bytes: Vec<u8>) -> Result<Self, BlobError> {
        if bytes.len() < SETTINGS_MIN_LEN {
            return Err(BlobError::InvalidLength {
                blob: "settings",
                len: bytes.len(),
                expected: "at least 37",
            });
        }
        let blob = Self { bytes };
        debug!(
            "decoded settings blob: kelvin={}, counter={}",
            blob.kelvin(),
            blob.timestamp()
        );
        Ok(blob)
    }

    /// The stored colour temperature.
    pub fn kelvin(&self) -> f64 {
        decode_kelvin(self.bytes[TEMP_LO_OFFSET], self.bytes[TEMP_HI_OFFSET])
    }

    /// The stored strength as a percentage.
    pub fn strength(&self) -> f64 {
        percentage_of(self.kelvin())
    }

    /// Copy of this blob with the temperature set from `percentage` and the
    /// counter advanced.
    pub fn with_strength(&self, percentage: f64) -> SettingsBlob {
        let kelvin = kelvin_of_percentage(percentage);
        let (lo, hi) = encode_kelvin(kelvin);

        let mut bytes = self.bytes.clone();
        bytes[TEMP_LO_OFFSET] = lo;
        bytes[TEMP_HI_OFFSET] = hi;
        advance_timestamp(&mut bytes);

        debug!("strength {percentage}% -> {kelvin}K (lo={lo:#04x}, hi={hi:#04x})");
        SettingsBlob { bytes }
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
}

/// A settings blob of `len` bytes holding `kelvin`, for the in-memory store.
pub(crate) fn sample_settings(kelvin: f64, len: usize) -> Vec<u8> {
    let mut bytes: Vec<u8> = (0..len.max(SETTINGS_MIN_LEN)).map(|i| i as u8).collect();
    bytes[crate::timestamp::TIMESTAMP_RANGE].fill(0);
    let (lo, hi) = encode_kelvin(kelvin);
    bytes[TEMP_LO_OFFSET] = lo;
    bytes[TEMP_HI_OFFSET] = hi;
    bytes
}
