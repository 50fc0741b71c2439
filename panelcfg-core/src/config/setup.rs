//! Display setup descriptor
//!
//! The complete description of one display wiring, built once and never
//! mutated afterwards.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::{Level, PinMap, Platform, Signal};
use super::types::{ClockRates, Driver, DriverSet, Font, FontSet, TouchController};
use crate::validate::{self, Errors, Report, Warnings};

/// Complete display and touch setup
///
/// All fields are plain data so a setup can be written as a `const` and
/// shared freely between the rendering and touch tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SetupDescriptor {
    /// Setup identifier
    pub setup_id: u16,
    /// Target MCU family
    pub platform: Platform,
    /// Selected display controller(s)
    pub drivers: DriverSet,
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
    /// Signal wiring
    pub pins: PinMap,
    /// Level that switches the backlight on
    pub backlight_on: Level,
    /// Bus clock ceilings
    pub clocks: ClockRates,
    /// Fitted touch controller
    pub touch: Option<TouchController>,
    /// Fonts linked into the program
    pub fonts: FontSet,
    /// Anti-aliased font rendering
    pub smooth_font: bool,
}

impl Default for SetupDescriptor {
    fn default() -> Self {
        Self {
            setup_id: 0,
            platform: Platform::Generic,
            drivers: DriverSet::EMPTY,
            width: 0,
            height: 0,
            pins: PinMap::EMPTY,
            backlight_on: Level::High,
            clocks: ClockRates::default(),
            touch: None,
            fonts: FontSet::EMPTY,
            smooth_font: false,
        }
    }
}

impl SetupDescriptor {
    /// Check the setup against every invariant and collect all problems
    pub fn validate(&self) -> Result<Warnings, Errors> {
        validate::validate(self)
    }

    /// Like [`validate`](Self::validate), but keeps warnings of a rejected setup
    pub fn check(&self) -> Report {
        validate::check(self)
    }

    /// The selected driver when exactly one is selected
    pub fn driver(&self) -> Option<Driver> {
        self.drivers.single()
    }

    /// Whether a touch controller is fitted
    pub fn has_touch(&self) -> bool {
        self.touch.is_some()
    }

    /// Signals whose pins take part in validation
    ///
    /// Touch pins are inactive unless a touch controller is fitted.
    pub fn is_active(&self, signal: Signal) -> bool {
        !signal.is_touch() || self.has_touch()
    }
}

/// Builder for [`SetupDescriptor`]
///
/// # Example
///
/// ```
/// use panelcfg_core::{Driver, SetupBuilder, Signal};
///
/// let setup = SetupBuilder::new()
///     .driver(Driver::Ili9341)
///     .panel(240, 320)
///     .pin(Signal::Mosi, 23)
///     .pin(Signal::Sck, 18)
///     .pin(Signal::Cs, 5)
///     .pin(Signal::Dc, 16)
///     .pin(Signal::Rst, 17)
///     .build();
/// assert_eq!(setup.driver(), Some(Driver::Ili9341));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SetupBuilder {
    setup: SetupDescriptor,
}

impl SetupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn setup_id(mut self, id: u16) -> Self {
        self.setup.setup_id = id;
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.setup.platform = platform;
        self
    }

    /// Select a driver, adding to any already selected
    pub fn driver(mut self, driver: Driver) -> Self {
        self.setup.drivers.insert(driver);
        self
    }

    pub fn panel(mut self, width: u16, height: u16) -> Self {
        self.setup.width = width;
        self.setup.height = height;
        self
    }

    pub fn pin(mut self, signal: Signal, pin: u8) -> Self {
        self.setup.pins.set(signal, Some(pin));
        self
    }

    pub fn backlight_on(mut self, level: Level) -> Self {
        self.setup.backlight_on = level;
        self
    }

    pub fn write_hz(mut self, hz: u32) -> Self {
        self.setup.clocks.write_hz = hz;
        self
    }

    pub fn read_hz(mut self, hz: u32) -> Self {
        self.setup.clocks.read_hz = hz;
        self
    }

    pub fn touch_hz(mut self, hz: u32) -> Self {
        self.setup.clocks.touch_hz = hz;
        self
    }

    pub fn touch(mut self, controller: TouchController) -> Self {
        self.setup.touch = Some(controller);
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.setup.fonts.insert(font);
        self
    }

    pub fn fonts(mut self, fonts: impl IntoIterator<Item = Font>) -> Self {
        for font in fonts {
            self.setup.fonts.insert(font);
        }
        self
    }

    pub fn smooth_font(mut self, enabled: bool) -> Self {
        self.setup.smooth_font = enabled;
        self
    }

    /// Finish without validating
    pub fn build(self) -> SetupDescriptor {
        self.setup
    }

    /// Finish and validate, returning the setup with its warnings
    pub fn build_validated(self) -> Result<(SetupDescriptor, Warnings), Errors> {
        let warnings = self.setup.validate()?;
        Ok((self.setup, warnings))
    }
}
