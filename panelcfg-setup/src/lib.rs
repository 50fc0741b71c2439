//! Compiled-in display setup
//!
//! `USER_SETUP` is generated from `user_setup.toml` (or the file named by
//! `PANELCFG_USER_SETUP`) by the build script, which refuses to build a
//! setup that fails validation. Drivers read it once at start-up.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub use panelcfg_core::SetupDescriptor;

include!(concat!(env!("OUT_DIR"), "/user_setup.rs"));

#[cfg(test)]
mod tests {
    use super::*;
    use panelcfg_core::presets::ESP32_035_ST7796;
    use panelcfg_core::{Driver, Signal};

    #[test]
    fn test_user_setup_is_valid() {
        let warnings = USER_SETUP.validate().expect("build script validated it");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_user_setup_matches_reference() {
        assert_eq!(USER_SETUP, ESP32_035_ST7796);
        assert_eq!(USER_SETUP.driver(), Some(Driver::St7796));
        assert_eq!(USER_SETUP.pins.get(Signal::TouchCs), Some(21));
    }
}
