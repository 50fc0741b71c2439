//! Setup validation
//!
//! Checks a [`SetupDescriptor`] before it is handed to a display driver.
//! Every check runs, so a single pass reports all problems:
//!
//! 1. exactly one driver selected
//! 2. non-zero panel dimensions
//! 3. required signals wired (touch signals only when touch is fitted)
//! 4. no two active signals on the same pin
//! 5. pins usable on the target platform
//! 6. bus clocks non-zero and within the platform limit
//!
//! Findings that do not stop a driver from starting are reported as
//! [`ConfigWarning`]s.

use core::fmt;

use heapless::Vec;

use crate::config::{ClockField, Platform, SetupDescriptor, Signal, TouchController, SIGNAL_COUNT};

/// Capacity of the error and warning lists
///
/// Larger than the worst case: every signal missing, conflicting and out of
/// range, plus every clock and the driver/dimension checks.
pub const MAX_ISSUES: usize = 4 * SIGNAL_COUNT;

/// Errors found by validation
pub type Errors = Vec<ConfigError, MAX_ISSUES>;

/// Warnings found by validation
pub type Warnings = Vec<ConfigWarning, MAX_ISSUES>;

/// A violated setup invariant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Zero or more than one driver selected
    MultipleOrNoDriverSelected { count: u8 },
    /// Width or height is zero
    InvalidPanelDimensions { width: u16, height: u16 },
    /// A required signal has no pin
    MissingPinAssignment(Signal),
    /// Two active signals share a pin; `first` precedes `second` in signal order
    PinConflict {
        first: Signal,
        second: Signal,
        pin: u8,
    },
    /// Pin number beyond the platform's highest GPIO
    PinOutOfRange { signal: Signal, pin: u8, max: u8 },
    /// Output signal on an input-only GPIO
    PinNotOutputCapable { signal: Signal, pin: u8 },
    /// Clock is zero or above the platform's bus limit
    ClockRateOutOfRange {
        field: ClockField,
        value: u32,
        max: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MultipleOrNoDriverSelected { count: 0 } => {
                write!(f, "no display driver selected")
            }
            ConfigError::MultipleOrNoDriverSelected { count } => {
                write!(f, "{count} display drivers selected, expected exactly one")
            }
            ConfigError::InvalidPanelDimensions { width, height } => {
                write!(f, "invalid panel dimensions {width}x{height}")
            }
            ConfigError::MissingPinAssignment(signal) => {
                write!(f, "missing pin assignment for {signal}")
            }
            ConfigError::PinConflict { first, second, pin } => {
                write!(f, "{first} and {second} both use pin {pin}")
            }
            ConfigError::PinOutOfRange { signal, pin, max } => {
                write!(f, "{signal} uses pin {pin}, highest GPIO is {max}")
            }
            ConfigError::PinNotOutputCapable { signal, pin } => {
                write!(f, "{signal} is an output but pin {pin} is input-only")
            }
            ConfigError::ClockRateOutOfRange { field, value, max } => {
                write!(f, "{field} = {value} Hz is outside 1..={max} Hz")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// A finding that does not stop a driver from starting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigWarning {
    /// No bundled font is linked in, so text cannot be drawn
    NoFontsEnabled,
    /// Reads are clocked faster than writes
    ReadFasterThanWrite { read_hz: u32, write_hz: u32 },
    /// Touch clock exceeds what the controller samples reliably at
    TouchClockAboveController {
        controller: TouchController,
        hz: u32,
        max: u32,
    },
    /// Touch pins are wired but no touch controller is fitted
    TouchPinsIgnored,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::NoFontsEnabled => write!(f, "no fonts enabled"),
            ConfigWarning::ReadFasterThanWrite { read_hz, write_hz } => write!(
                f,
                "read clock {read_hz} Hz is faster than write clock {write_hz} Hz"
            ),
            ConfigWarning::TouchClockAboveController { controller, hz, max } => write!(
                f,
                "touch clock {hz} Hz is above the {controller} limit of {max} Hz"
            ),
            ConfigWarning::TouchPinsIgnored => {
                write!(f, "touch pins assigned without a touch controller")
            }
        }
    }
}

/// Every error and warning found in one pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    pub errors: Errors,
    pub warnings: Warnings,
}

impl Report {
    /// True when no invariant is violated
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Split into the warnings of a valid setup or the errors of an invalid one
    pub fn into_result(self) -> Result<Warnings, Errors> {
        if self.is_ok() {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

/// Run every check, keeping warnings alongside any errors
pub fn check(setup: &SetupDescriptor) -> Report {
    let mut errors = Errors::new();

    check_driver(setup, &mut errors);
    check_dimensions(setup, &mut errors);
    check_required_pins(setup, &mut errors);
    check_pin_conflicts(setup, &mut errors);
    check_platform_pins(setup, &mut errors);
    check_clocks(setup, &mut errors);

    Report {
        errors,
        warnings: collect_warnings(setup),
    }
}

/// Validate a setup
///
/// Returns the warnings when no invariant is violated, otherwise every
/// error found. Use [`check`] to see warnings of a rejected setup as well.
/// Pure and idempotent.
pub fn validate(setup: &SetupDescriptor) -> Result<Warnings, Errors> {
    check(setup).into_result()
}

fn push<T, const N: usize>(list: &mut Vec<T, N>, item: T) {
    // Capacity covers the worst case, see MAX_ISSUES
    let pushed = list.push(item);
    debug_assert!(pushed.is_ok());
}

fn check_driver(setup: &SetupDescriptor, errors: &mut Errors) {
    let count = setup.drivers.len();
    if count != 1 {
        push(
            errors,
            ConfigError::MultipleOrNoDriverSelected {
                count: count as u8,
            },
        );
    }
}

fn check_dimensions(setup: &SetupDescriptor, errors: &mut Errors) {
    if setup.width == 0 || setup.height == 0 {
        push(
            errors,
            ConfigError::InvalidPanelDimensions {
                width: setup.width,
                height: setup.height,
            },
        );
    }
}

fn check_required_pins(setup: &SetupDescriptor, errors: &mut Errors) {
    let touch: &[Signal] = if setup.has_touch() { &Signal::TOUCH } else { &[] };

    for &signal in Signal::REQUIRED.iter().chain(touch) {
        if setup.pins.get(signal).is_none() {
            push(errors, ConfigError::MissingPinAssignment(signal));
        }
    }
}

fn check_pin_conflicts(setup: &SetupDescriptor, errors: &mut Errors) {
    for (i, &second) in Signal::ALL.iter().enumerate() {
        if !setup.is_active(second) {
            continue;
        }
        let Some(pin) = setup.pins.get(second) else {
            continue;
        };

        // Report against the first holder only
        let first = Signal::ALL[..i]
            .iter()
            .copied()
            .filter(|&s| setup.is_active(s))
            .find(|&s| setup.pins.get(s) == Some(pin));

        if let Some(first) = first {
            push(errors, ConfigError::PinConflict { first, second, pin });
        }
    }
}

fn check_platform_pins(setup: &SetupDescriptor, errors: &mut Errors) {
    let platform: Platform = setup.platform;

    for (signal, pin) in setup.pins.iter() {
        if !setup.is_active(signal) {
            continue;
        }
        match platform.max_gpio() {
            Some(max) if pin > max => {
                push(errors, ConfigError::PinOutOfRange { signal, pin, max });
            }
            _ if signal.is_output() && platform.is_input_only(pin) => {
                push(errors, ConfigError::PinNotOutputCapable { signal, pin });
            }
            _ => {}
        }
    }
}

fn check_clocks(setup: &SetupDescriptor, errors: &mut Errors) {
    let max = setup.platform.max_spi_hz();

    for field in ClockField::ALL {
        let value = setup.clocks.get(field);
        if value == 0 || value > max {
            push(errors, ConfigError::ClockRateOutOfRange { field, value, max });
        }
    }
}

fn collect_warnings(setup: &SetupDescriptor) -> Warnings {
    let mut warnings = Warnings::new();
    let clocks = &setup.clocks;

    if setup.fonts.is_empty() {
        push(&mut warnings, ConfigWarning::NoFontsEnabled);
    }

    if clocks.read_hz > clocks.write_hz {
        push(
            &mut warnings,
            ConfigWarning::ReadFasterThanWrite {
                read_hz: clocks.read_hz,
                write_hz: clocks.write_hz,
            },
        );
    }

    match setup.touch {
        Some(controller) if clocks.touch_hz > controller.max_spi_hz() => push(
            &mut warnings,
            ConfigWarning::TouchClockAboveController {
                controller,
                hz: clocks.touch_hz,
                max: controller.max_spi_hz(),
            },
        ),
        None if Signal::TOUCH.iter().any(|&s| setup.pins.get(s).is_some()) => {
            push(&mut warnings, ConfigWarning::TouchPinsIgnored)
        }
        _ => {}
    }

    warnings
}
