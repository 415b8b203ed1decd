//! Where the blobs live and how long the feature needs to settle.

use std::time::Duration;

const STATE_KEY_PATH: &str = r"Software\Microsoft\Windows\CurrentVersion\CloudStore\Store\DefaultAccount\Current\default$windows.data.bluelightreduction.bluelightreductionstate\windows.data.bluelightreduction.bluelightreductionstate";
const SETTINGS_KEY_PATH: &str = r"Software\Microsoft\Windows\CurrentVersion\CloudStore\Store\DefaultAccount\Current\default$windows.data.bluelightreduction.settings\windows.data.bluelightreduction.settings";
const VALUE_NAME: &str = "Data";

/// Pause between disable and enable when forcing the feature to re-read its
/// settings.
const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Night light configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NightLightConfig {
    /// Registry path (under `HKEY_CURRENT_USER`) of the state blob.
    pub state_key_path: String,
    /// Registry path (under `HKEY_CURRENT_USER`) of the settings blob.
    pub settings_key_path: String,
    /// Name of the binary value holding each blob.
    pub value_name: String,
    /// Pause used by [`NightLight::apply_strength`](crate::NightLight::apply_strength).
    pub settle_delay: Duration,
}

impl NightLightConfig {
    /// Create a configuration with the stock Windows locations.
    pub fn new() -> Self {
        Self {
            state_key_path: STATE_KEY_PATH.to_string(),
            settings_key_path: SETTINGS_KEY_PATH.to_string(),
            value_name: VALUE_NAME.to_string(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Override the settle delay.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Override both key paths.
    pub fn with_key_paths(
        mut self,
        state: impl Into<String>,
        settings: impl Into<String>,
    ) -> Self {
        self.state_key_path = state.into();
        self.settings_key_path = settings.into();
        self
    }
}

impl Default for NightLightConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_cloudstore() {
        let config = NightLightConfig::default();
        assert!(config.state_key_path.ends_with("bluelightreductionstate"));
        assert!(config.settings_key_path.ends_with("bluelightreduction.settings"));
        assert_eq!(config.value_name, "Data");
        assert_eq!(config.settle_delay, Duration::from_millis(200));
    }

    #[test]
    fn builders_override() {
        let config = NightLightConfig::new()
            .with_settle_delay(Duration::ZERO)
            .with_key_paths("a", "b");
        assert_eq!(config.settle_delay, Duration::ZERO);
        assert_eq!(config.state_key_path, "a");
        assert_eq!(config.settings_key_path, "b");
    }
}
