//! Display and touch setup descriptors
//!
//! This crate describes how an SPI display and its resistive touch
//! controller are wired to an MCU, and checks that description before a
//! driver is started with it:
//!
//! - Setup types (driver, panel, pins, bus clocks, fonts)
//! - A builder and `const` presets
//! - Validation that reports every problem in one pass
//! - Versioned binary storage (with the `serde` feature)
//!
//! A setup is plain `Copy` data. Build it once, validate it, then share it.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod presets;
#[cfg(feature = "serde")]
pub mod storage;
pub mod validate;

pub use config::*;
pub use validate::{
    check, validate, ConfigError, ConfigWarning, Errors, Report, Warnings, MAX_ISSUES,
};
