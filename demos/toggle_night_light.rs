//! Example: Toggle the night light on/off.
//!
//! Run with: `cargo run --example toggle_night_light`
//!
//! On Windows this edits the real registry blobs. Elsewhere it runs against
//! an in-memory store.

use lumos_core::{NightLight, NightLightControl, NightLightError};

fn main() -> Result<(), NightLightError> {
    // Initialize logging (optional)
    env_logger::init();

    #[cfg(windows)]
    let night_light = NightLight::new(lumos_core::RegistryStore::new());
    #[cfg(not(windows))]
    let night_light = NightLight::new(lumos_core::MockStore::new());

    if !night_light.is_supported() {
        eprintln!("Night light is not supported on this system");
        return Ok(());
    }

    println!(
        "Current state: enabled={}, strength={:.1}%",
        night_light.is_enabled()?,
        night_light.strength()?
    );

    // Toggle the night light
    match night_light.toggle() {
        Ok(mode) => println!("Toggled to: {:?}", mode),
        Err(e) => eprintln!("Error toggling night light: {}", e),
    }

    Ok(())
}
