//! Human-readable output
//!
//! Validation results are printed in the same boxed layout the build script
//! uses when it rejects a setup, so an author sees identical messages from
//! `panelcfg check` and from a failed firmware build.

use std::fmt::Write;

use panelcfg_core::{Report, SetupDescriptor, Signal};

/// Inner width of a report box
const BOX_WIDTH: usize = 66;

fn rule(out: &mut String, left: char, right: char) {
    out.push(left);
    out.extend(std::iter::repeat('═').take(BOX_WIDTH));
    out.push(right);
    out.push('\n');
}

fn line(out: &mut String, text: &str) {
    let limit = BOX_WIDTH - 4;
    let text = if text.chars().count() > limit {
        let cut: String = text.chars().take(limit - 3).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    };
    let _ = writeln!(out, "║  {:<width$}  ║", text, width = limit);
}

/// Wrap each line of `msg` in box sides, without the top and bottom rules
pub fn boxed_lines(msg: &str) -> String {
    let mut out = String::new();
    for text in msg.lines() {
        line(&mut out, text);
    }
    out.truncate(out.trim_end_matches('\n').len());
    out
}

/// Render a validation report as a box, errors first, then warnings
pub fn render_report(source: &str, report: &Report) -> String {
    let mut out = String::new();
    let title = if report.is_ok() {
        format!("{source}: setup is valid")
    } else {
        format!("ERROR: {} problem(s) in {source}", report.errors.len())
    };

    rule(&mut out, '╔', '╗');
    line(&mut out, &title);

    if !report.errors.is_empty() || !report.warnings.is_empty() {
        rule(&mut out, '╠', '╣');
    }
    for error in &report.errors {
        line(&mut out, &format!("• {error}"));
    }
    for warning in &report.warnings {
        line(&mut out, &format!("warning: {warning}"));
    }

    rule(&mut out, '╚', '╝');
    out
}

fn mhz(hz: u32) -> String {
    format!("{}.{} MHz", hz / 1_000_000, (hz % 1_000_000) / 100_000)
}

/// Render a descriptor as a pin table with clocks and fonts
pub fn render_summary(setup: &SetupDescriptor) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Setup {} ({})", setup.setup_id, setup.platform);
    match setup.driver() {
        Some(driver) => {
            let (w, h) = driver.native_size();
            let _ = writeln!(out, "Driver   {driver} (native {w}x{h})");
        }
        None => {
            let names: Vec<&str> = setup.drivers.iter().map(|d| d.name()).collect();
            let _ = writeln!(out, "Driver   [{}]", names.join(", "));
        }
    }
    let _ = writeln!(out, "Panel    {}x{}", setup.width, setup.height);
    match setup.touch {
        Some(touch) => {
            let _ = writeln!(out, "Touch    {touch}");
        }
        None => {
            let _ = writeln!(out, "Touch    none");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Signal    | GPIO");
    let _ = writeln!(out, "----------+-----");
    for signal in Signal::ALL {
        let pin = match setup.pins.get(signal) {
            Some(pin) => pin.to_string(),
            None => "-".to_string(),
        };
        let _ = writeln!(out, "{:<9} | {pin}", signal.name());
    }

    let _ = writeln!(out);
    let clocks = &setup.clocks;
    let _ = writeln!(
        out,
        "SPI      write {}, read {}, touch {}",
        mhz(clocks.write_hz),
        mhz(clocks.read_hz),
        mhz(clocks.touch_hz)
    );

    let names: Vec<&str> = setup.fonts.iter().map(|f| f.name()).collect();
    let _ = writeln!(out, "Fonts    {}", names.join(" "));
    let _ = writeln!(out, "Flash    ~{} bytes of fixed fonts", setup.fonts.flash_bytes());
    let _ = writeln!(
        out,
        "Smooth   {}",
        if setup.smooth_font { "enabled" } else { "disabled" }
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelcfg_core::presets::ESP32_035_ST7796;

    #[test]
    fn test_valid_report() {
        let report = render_report("user_setup.toml", &ESP32_035_ST7796.check());
        assert!(report.contains("user_setup.toml: setup is valid"));
        assert!(report.starts_with('╔'));
        assert!(report.trim_end().ends_with('╝'));
        assert!(!report.contains('╠'));
    }

    #[test]
    fn test_error_report() {
        let mut setup = ESP32_035_ST7796;
        setup.pins.set(Signal::TouchCs, Some(15));

        let report = render_report("user_setup.toml", &setup.check());
        assert!(report.contains("ERROR: 1 problem(s) in user_setup.toml"));
        assert!(report.contains("• CS and TOUCH_CS both use pin 15"));
    }

    #[test]
    fn test_report_lines_are_aligned() {
        let mut setup = ESP32_035_ST7796;
        setup.drivers = Default::default();
        setup.clocks.write_hz = 0;

        let path = "a/very/long/path/to/some/nested/user_setup_override.toml";
        let report = render_report(path, &setup.check());
        let widths: Vec<usize> = report.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|&w| w == BOX_WIDTH + 2));
    }

    #[test]
    fn test_boxed_lines_match_rule_width() {
        let msg = "setup.toml: unknown driver 'ST9999'\n\
                   a second line that is far too long to fit inside the box and gets cut";
        let body = boxed_lines(msg);
        assert_eq!(body.lines().count(), 2);
        assert!(!body.ends_with('\n'));
        assert!(body.lines().all(|l| l.chars().count() == BOX_WIDTH + 2));
        assert!(body.contains("..."));
    }

    #[test]
    fn test_warning_report() {
        let mut setup = ESP32_035_ST7796;
        setup.fonts = Default::default();

        let report = render_report("setup", &setup.check());
        assert!(report.contains("warning: no fonts enabled"));
    }

    #[test]
    fn test_error_report_keeps_warnings() {
        let mut setup = ESP32_035_ST7796;
        setup.fonts = Default::default();
        setup.width = 0;

        let report = render_report("setup", &setup.check());
        assert!(report.contains("ERROR: 1 problem(s) in setup"));
        assert!(report.contains("• invalid panel dimensions 0x480"));
        assert!(report.contains("warning: no fonts enabled"));
    }

    #[test]
    fn test_summary() {
        let summary = render_summary(&ESP32_035_ST7796);
        assert!(summary.contains("Driver   ST7796 (native 320x480)"));
        assert!(summary.contains("TOUCH_CS  | 21"));
        assert!(summary.contains("MISO      | -"));
        assert!(summary.contains("write 40.0 MHz, read 20.0 MHz, touch 2.5 MHz"));
        assert!(summary.contains("~19562 bytes"));
    }
}
