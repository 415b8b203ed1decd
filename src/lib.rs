//! Unofficial Rust API for the Windows night light (blue light reduction) feature.
//!
//! Windows keeps the night light state and its colour temperature in two
//! undocumented binary blobs. This crate decodes those blobs, computes their
//! successors byte-for-byte, and writes them back through a [`BlobStore`].
//!
//! # Requirements
//!
//! - Windows 10/11 for `RegistryStore`
//! - Any platform for the codecs and [`MockStore`]
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(windows)]
//! # fn main() -> Result<(), lumos_core::NightLightError> {
//! use lumos_core::{NightLight, NightLightControl, RegistryStore};
//!
//! let night_light = NightLight::new(RegistryStore::new());
//!
//! println!("enabled: {}", night_light.is_enabled()?);
//! println!("strength: {:.1}%", night_light.strength()?);
//!
//! // Store 75% and cycle the feature so Windows re-reads it.
//! night_light.apply_strength(75.0)?;
//! # Ok(())
//! # }
//! # #[cfg(not(windows))]
//! # fn main() {}
//! ```
//!
//! # Testing
//!
//! Use [`MockStore`] to test code without touching the registry:
//!
//! ```
//! use lumos_core::{MockStore, NightLight, NightLightControl, NightLightMode};
//!
//! let night_light = NightLight::new(MockStore::new());
//! assert_eq!(night_light.toggle().unwrap(), NightLightMode::Enabled);
//! ```
//!
//! # Concurrency
//!
//! Every call re-reads the store and writes a whole blob back. There is no
//! locking, so a concurrent writer (the Settings app, another process) can
//! have its update overwritten.
//!
//! # Disclaimer
//!
//! This is an **unofficial** library. The blob layout is reverse-engineered
//! and may change with any Windows update.

#![warn(missing_docs)]

mod config;
mod controller;
mod error;
mod mock;
#[cfg(windows)]
mod registry;
mod settings;
mod state;
mod store;
mod timestamp;

// Re-export public API
pub use config::NightLightConfig;
pub use controller::{NightLight, NightLightControl};
pub use error::{BlobError, NightLightError, Result, StoreError};
pub use mock::MockStore;
#[cfg(windows)]
pub use registry::RegistryStore;
pub use settings::{
    MAX_KELVIN, MIN_KELVIN, SETTINGS_MIN_LEN, SettingsBlob, decode_kelvin, encode_kelvin,
    kelvin_of_percentage, percentage_of,
};
pub use state::{DISABLED_LEN, ENABLED_LEN, NightLightMode, StateBlob};
pub use store::{BlobKey, BlobStore};
pub use timestamp::{TIMESTAMP_RANGE, advance_timestamp, counter_value};

#[cfg(test)]
mod tests {
    use super::*;

    fn disabled_blob(counter: [u8; 5]) -> Vec<u8> {
        let mut bytes = vec![0u8; 41];
        bytes[10..15].copy_from_slice(&counter);
        bytes[18] = 0x13;
        bytes
    }

    #[test]
    fn test_toggle_disabled_blob() {
        let blob = StateBlob::decode(disabled_blob([5, 0, 0, 0, 0])).unwrap();

        let toggled = StateBlob::decode(blob.toggled().into_bytes()).unwrap();
        let bytes = toggled.encode();

        assert_eq!(bytes.len(), 43);
        assert_eq!(bytes[18], 0x15);
        assert_eq!(&bytes[23..25], &[0x10, 0x00]);
        assert_eq!(bytes[10], 6);
    }

    #[test]
    fn test_decode_rejections() {
        let store = MockStore::new();
        let nl = NightLight::new(&store);

        for bytes in [vec![0x13; 40], vec![0x13; 42], {
            let mut b = disabled_blob([0; 5]);
            b[18] = 0x15;
            b
        }] {
            store.insert(BlobKey::State, bytes);
            assert!(matches!(
                nl.is_enabled(),
                Err(NightLightError::InvalidData(_))
            ));
        }
    }

    #[test]
    fn test_settings_scenario() {
        let mut bytes = vec![0u8; SETTINGS_MIN_LEN];
        bytes[0x23] = 128;
        bytes[0x24] = 18;
        let blob = SettingsBlob::decode(bytes).unwrap();
        assert_eq!(blob.kelvin(), 1152.0);

        let updated = blob.with_strength(100.0);
        assert_eq!(updated.encode()[0x24], 18);
        assert_eq!(updated.encode()[0x23], 224);
    }

    #[test]
    fn test_mock_round_trip() {
        let nl = NightLight::new(MockStore::new());

        assert!(!nl.is_enabled().unwrap());
        assert!((nl.strength().unwrap() - 50.0).abs() < 1.0);

        nl.enable().unwrap();
        nl.set_strength(20.0).unwrap();
        assert!(nl.is_enabled().unwrap());
        assert!((nl.strength().unwrap() - 20.0).abs() < 1.0);

        nl.disable().unwrap();
        assert!(!nl.is_enabled().unwrap());
    }

    #[test]
    fn test_counter_advances_across_operations() {
        let store = MockStore::new();
        let nl = NightLight::new(&store);

        let before = counter_value(&store.get(BlobKey::State).unwrap());
        nl.toggle().unwrap();
        nl.toggle().unwrap();
        let after = counter_value(&store.get(BlobKey::State).unwrap());
        assert_eq!(after, before + 2);
    }
}
