//! Rust source generation
//!
//! Turns a descriptor into a `const` item so a firmware crate can compile
//! its setup in, the way a setup header is compiled in.

use std::fmt::Write;

use panelcfg_core::SetupDescriptor;

const CORE: &str = "::panelcfg_core";

/// Render `setup` as `pub const <name>: SetupDescriptor = ...;`
///
/// The output only references public `const fn`s of `panelcfg_core`, so it
/// can be `include!`d from a build script's `OUT_DIR`.
pub fn render_const(name: &str, source: &str, setup: &SetupDescriptor) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "// @generated by panelcfg from {source}. Do not edit.");
    let _ = writeln!(out, "pub const {name}: {CORE}::SetupDescriptor = {CORE}::SetupDescriptor {{");
    let _ = writeln!(out, "    setup_id: {},", setup.setup_id);
    let _ = writeln!(out, "    platform: {CORE}::Platform::{:?},", setup.platform);

    let _ = write!(out, "    drivers: {CORE}::DriverSet::EMPTY");
    for driver in setup.drivers.iter() {
        let _ = write!(out, "\n        .with({CORE}::Driver::{driver:?})");
    }
    out.push_str(",\n");

    let _ = writeln!(out, "    width: {},", setup.width);
    let _ = writeln!(out, "    height: {},", setup.height);

    let _ = write!(out, "    pins: {CORE}::PinMap::EMPTY");
    for (signal, pin) in setup.pins.iter() {
        let _ = write!(out, "\n        .with({CORE}::Signal::{signal:?}, {pin})");
    }
    out.push_str(",\n");

    let _ = writeln!(out, "    backlight_on: {CORE}::Level::{:?},", setup.backlight_on);
    let _ = writeln!(
        out,
        "    clocks: {CORE}::ClockRates::new({}, {}, {}),",
        setup.clocks.write_hz, setup.clocks.read_hz, setup.clocks.touch_hz
    );
    match setup.touch {
        Some(touch) => {
            let _ = writeln!(out, "    touch: Some({CORE}::TouchController::{touch:?}),");
        }
        None => out.push_str("    touch: None,\n"),
    }

    let _ = write!(out, "    fonts: {CORE}::FontSet::EMPTY");
    for font in setup.fonts.iter() {
        let _ = write!(out, "\n        .with({CORE}::Font::{font:?})");
    }
    out.push_str(",\n");

    let _ = writeln!(out, "    smooth_font: {},", setup.smooth_font);
    out.push_str("};\n");
    out
}
