//! Night light controller implementation.

use crate::config::NightLightConfig;
use crate::error::{NightLightError, Result};
use crate::settings::SettingsBlob;
use crate::state::{NightLightMode, StateBlob};
use crate::store::{BlobKey, BlobStore};

use log::{debug, info};
use std::time::Duration;

// =============================================================================
// Night Light Control Trait
// =============================================================================

/// Trait for night light controller implementations.
///
/// Every method is a fresh read-modify-write against the store. Nothing is
/// cached between calls and nothing guards against another process writing
/// the same key in between.
pub trait NightLightControl {
    /// Whether the night light is currently on.
    fn is_enabled(&self) -> Result<bool>;

    /// Turn the night light on. Writes nothing if it is already on.
    fn enable(&self) -> Result<()>;

    /// Turn the night light off. Writes nothing if it is already off.
    fn disable(&self) -> Result<()>;

    /// Flip the night light and return the new mode.
    fn toggle(&self) -> Result<NightLightMode>;

    /// The current strength, 0-100.
    fn strength(&self) -> Result<f64>;

    /// Store a new strength. Out-of-range values are clamped to 0-100; NaN is
    /// rejected with [`NightLightError::InvalidStrength`] before anything is
    /// read or written.
    ///
    /// The OS does not re-read the settings while the feature is on, so a
    /// change only shows after the feature is cycled. See
    /// [`NightLight::apply_strength`].
    fn set_strength(&self, percentage: f64) -> Result<()>;
}

// =============================================================================
// NightLight
// =============================================================================

/// The night light controller.
///
/// Owns the store it reads and writes, so tests can hand it a
/// [`MockStore`](crate::MockStore) and Windows callers a `RegistryStore`.
///
/// # Example
///
/// ```
/// use lumos_core::{MockStore, NightLight, NightLightControl};
///
/// let night_light = NightLight::new(MockStore::new());
/// night_light.set_strength(75.0)?;
/// night_light.enable()?;
/// # Ok::<(), lumos_core::NightLightError>(())
/// ```
#[derive(Debug)]
pub struct NightLight<S> {
    store: S,
    settle_delay: Duration,
}

impl<S: BlobStore> NightLight<S> {
    /// Create a controller over `store` with the default settle delay.
    pub fn new(store: S) -> Self {
        Self::with_config(store, &NightLightConfig::default())
    }

    /// Create a controller over `store` using the settle delay from `config`.
    pub fn with_config(store: S, config: &NightLightConfig) -> Self {
        Self {
            store,
            settle_delay: config.settle_delay,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the state blob can be read at all.
    pub fn is_supported(&self) -> bool {
        self.store.read(BlobKey::State).is_ok()
    }

    /// Set the strength and cycle the feature so the OS picks it up.
    ///
    /// If the night light is on it is turned off, the settle delay elapses,
    /// and it is turned back on. If it is off it is simply turned on. The
    /// caller always ends with the feature enabled.
    pub fn apply_strength(&self, percentage: f64) -> Result<()> {
        self.set_strength(percentage)?;

        if self.is_enabled()? {
            self.disable()?;
            debug!("waiting {:?} for night light to settle", self.settle_delay);
            std::thread::sleep(self.settle_delay);
        }
        self.enable()
    }

    fn read_state(&self) -> Result<StateBlob> {
        let bytes = self
            .store
            .read(BlobKey::State)
            .map_err(NightLightError::from_read)?;
        Ok(StateBlob::decode(bytes)?)
    }

    fn read_settings(&self) -> Result<SettingsBlob> {
        let bytes = self
            .store
            .read(BlobKey::Settings)
            .map_err(NightLightError::from_read)?;
        Ok(SettingsBlob::decode(bytes)?)
    }

    fn write(&self, key: BlobKey, data: &[u8]) -> Result<()> {
        debug!("writing {} blob: {:02x?}", key, data);
        self.store
            .write(key, data)
            .map_err(NightLightError::from_write)
    }

    fn set_mode(&self, target: NightLightMode) -> Result<()> {
        let current = self.read_state()?;
        if current.mode() == target {
            debug!("night light already {:?}", target);
            return Ok(());
        }
        let next = current.toggled();
        self.write(BlobKey::State, next.encode())?;
        info!("night light {:?}", target);
        Ok(())
    }
}

impl<S: BlobStore> NightLightControl for NightLight<S> {
    fn is_enabled(&self) -> Result<bool> {
        Ok(self.read_state()?.is_enabled())
    }

    fn enable(&self) -> Result<()> {
        self.set_mode(NightLightMode::Enabled)
    }

    fn disable(&self) -> Result<()> {
        self.set_mode(NightLightMode::Disabled)
    }

    fn toggle(&self) -> Result<NightLightMode> {
        let current = self.read_state()?;
        let next = current.toggled();
        self.write(BlobKey::State, next.encode())?;

        let mode = next.mode();
        info!("toggled night light {:?} -> {:?}", current.mode(), mode);
        Ok(mode)
    }

    fn strength(&self) -> Result<f64> {
        Ok(self.read_settings()?.strength())
    }

    fn set_strength(&self, percentage: f64) -> Result<()> {
        if percentage.is_nan() {
            return Err(NightLightError::InvalidStrength(percentage));
        }
        let next = self.read_settings()?.with_strength(percentage);
        self.write(BlobKey::Settings, next.encode())?;
        info!("night light strength set to {:.1}%", next.strength());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockStore;
    use crate::error::{BlobError, StoreError};

    fn quick(store: MockStore) -> NightLight<MockStore> {
        let config = NightLightConfig::new().with_settle_delay(Duration::ZERO);
        NightLight::with_config(store, &config)
    }

    #[test]
    fn enable_is_idempotent() {
        let nl = quick(MockStore::with_mode(NightLightMode::Disabled));

        nl.enable().unwrap();
        assert!(nl.is_enabled().unwrap());
        assert_eq!(nl.store().writes(), vec![BlobKey::State]);

        nl.enable().unwrap();
        assert_eq!(nl.store().writes().len(), 1);
        assert_eq!(nl.store().get(BlobKey::State).unwrap().len(), 43);
    }

    #[test]
    fn disable_is_idempotent() {
        let nl = quick(MockStore::with_mode(NightLightMode::Enabled));

        nl.disable().unwrap();
        nl.disable().unwrap();
        assert!(!nl.is_enabled().unwrap());
        assert_eq!(nl.store().writes().len(), 1);
        assert_eq!(nl.store().get(BlobKey::State).unwrap().len(), 41);
    }

    #[test]
    fn toggle_always_writes() {
        let nl = quick(MockStore::new());

        assert_eq!(nl.toggle().unwrap(), NightLightMode::Enabled);
        assert_eq!(nl.toggle().unwrap(), NightLightMode::Disabled);
        assert_eq!(nl.store().writes().len(), 2);
    }

    #[test]
    fn missing_state_is_not_supported() {
        let nl = quick(MockStore::empty());

        assert!(!nl.is_supported());
        assert!(matches!(
            nl.is_enabled(),
            Err(NightLightError::NotSupported(StoreError::NotFound(BlobKey::State)))
        ));
        assert!(matches!(nl.enable(), Err(NightLightError::NotSupported(_))));
        assert!(matches!(nl.strength(), Err(NightLightError::NotSupported(_))));
    }

    #[test]
    fn corrupt_state_is_invalid_data_and_not_written() {
        let store = MockStore::new();
        store.insert(BlobKey::State, vec![0x13; 42]);
        let nl = quick(store);

        assert!(matches!(
            nl.toggle(),
            Err(NightLightError::InvalidData(BlobError::InvalidLength { len: 42, .. }))
        ));
        assert!(nl.store().writes().is_empty());
        assert_eq!(nl.store().get(BlobKey::State).unwrap(), vec![0x13; 42]);
    }

    #[test]
    fn denied_write_is_access_denied() {
        let store = MockStore::new();
        store.deny_writes();
        let nl = quick(store);

        assert!(matches!(
            nl.set_strength(10.0),
            Err(NightLightError::AccessDenied(BlobKey::Settings))
        ));
        assert!(matches!(
            nl.toggle(),
            Err(NightLightError::AccessDenied(BlobKey::State))
        ));
    }

    #[test]
    fn set_strength_does_not_touch_state() {
        let nl = quick(MockStore::new());
        let before = nl.store().get(BlobKey::State);

        nl.set_strength(80.0).unwrap();

        assert_eq!(nl.store().get(BlobKey::State), before);
        assert_eq!(nl.store().writes(), vec![BlobKey::Settings]);
        assert!((nl.strength().unwrap() - 80.0).abs() < 1.0);
    }

    #[test]
    fn set_strength_clamps() {
        let nl = quick(MockStore::new());

        nl.set_strength(250.0).unwrap();
        assert!((nl.strength().unwrap() - 100.0).abs() < 1.0);

        nl.set_strength(-5.0).unwrap();
        assert_eq!(nl.strength().unwrap(), 0.0);
    }

    #[test]
    fn nan_strength_is_rejected_without_writing() {
        let nl = quick(MockStore::with_mode(NightLightMode::Enabled));
        let before = nl.store().get(BlobKey::Settings);

        assert!(matches!(
            nl.set_strength(f64::NAN),
            Err(NightLightError::InvalidStrength(p)) if p.is_nan()
        ));
        assert!(matches!(
            nl.apply_strength(f64::NAN),
            Err(NightLightError::InvalidStrength(_))
        ));
        assert!(nl.store().writes().is_empty());
        assert_eq!(nl.store().get(BlobKey::Settings), before);
        assert!(nl.is_enabled().unwrap());
    }

    #[test]
    fn apply_strength_cycles_enabled_feature() {
        let nl = quick(MockStore::with_mode(NightLightMode::Enabled));

        nl.apply_strength(40.0).unwrap();

        assert!(nl.is_enabled().unwrap());
        assert_eq!(
            nl.store().writes(),
            vec![BlobKey::Settings, BlobKey::State, BlobKey::State]
        );
    }

    #[test]
    fn apply_strength_enables_disabled_feature() {
        let nl = quick(MockStore::with_mode(NightLightMode::Disabled));

        nl.apply_strength(40.0).unwrap();

        assert!(nl.is_enabled().unwrap());
        assert_eq!(nl.store().writes(), vec![BlobKey::Settings, BlobKey::State]);
    }

    #[test]
    fn works_through_a_borrowed_store() {
        let store = MockStore::new();
        let nl = NightLight::new(&store);
        nl.toggle().unwrap();
        assert_eq!(store.writes(), vec![BlobKey::State]);
    }
}
