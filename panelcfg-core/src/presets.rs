//! Known-good setups
//!
//! Each preset is a `const` so it can be used as the compiled-in setup of a
//! firmware image without any runtime construction.

use crate::config::{
    ClockRates, Driver, DriverSet, Font, FontSet, Level, PinMap, Platform, SetupDescriptor,
    Signal, TouchController,
};

/// ST7796 3.5" ESP32-035 board with an XPT2046 resistive touch controller
pub const ESP32_035_ST7796: SetupDescriptor = SetupDescriptor {
    setup_id: 123,
    platform: Platform::Generic,
    drivers: DriverSet::only(Driver::St7796),
    width: 320,
    height: 480,
    pins: PinMap::EMPTY
        .with(Signal::Mosi, 13)
        .with(Signal::Sck, 14)
        .with(Signal::Cs, 15)
        .with(Signal::Dc, 2)
        .with(Signal::Rst, 4)
        .with(Signal::Bl, 5)
        .with(Signal::TouchCs, 21)
        .with(Signal::TouchIrq, 22),
    backlight_on: Level::High,
    clocks: ClockRates::new(40_000_000, 20_000_000, 2_500_000),
    touch: Some(TouchController::Xpt2046),
    fonts: FontSet::EMPTY
        .with(Font::Glcd)
        .with(Font::Font2)
        .with(Font::Font4)
        .with(Font::Font6)
        .with(Font::Font7)
        .with(Font::Font8)
        .with(Font::Gfxff),
    smooth_font: true,
};

/// Look up a preset by name
pub fn find(name: &str) -> Option<&'static SetupDescriptor> {
    PRESETS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, setup)| setup)
}

/// Named presets
pub const PRESETS: &[(&str, SetupDescriptor)] = &[("esp32-035-st7796", ESP32_035_ST7796)];
