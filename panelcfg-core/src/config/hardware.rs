//! Hardware configuration types
//!
//! These types describe how a display and its touch controller are wired:
//! which GPIO carries each bus signal and which MCU family the pins belong to.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::UnknownName;

/// Number of logical signals a setup can wire
pub const SIGNAL_COUNT: usize = 9;

/// Logical role of a wire between the MCU and the panel
///
/// Declaration order is the order used for reporting pin conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Signal {
    /// SPI data out (MCU to panel)
    Mosi,
    /// SPI data in (panel to MCU), only needed for reads
    Miso,
    /// SPI clock
    Sck,
    /// Display chip select
    Cs,
    /// Data/command select
    Dc,
    /// Panel reset
    Rst,
    /// Backlight enable
    Bl,
    /// Touch controller chip select
    TouchCs,
    /// Touch controller pen interrupt
    TouchIrq,
}

impl Signal {
    /// All signals in reporting order
    pub const ALL: [Signal; SIGNAL_COUNT] = [
        Signal::Mosi,
        Signal::Miso,
        Signal::Sck,
        Signal::Cs,
        Signal::Dc,
        Signal::Rst,
        Signal::Bl,
        Signal::TouchCs,
        Signal::TouchIrq,
    ];

    /// Signals every setup must wire
    pub const REQUIRED: [Signal; 5] = [
        Signal::Mosi,
        Signal::Sck,
        Signal::Cs,
        Signal::Dc,
        Signal::Rst,
    ];

    /// Signals required once a touch controller is fitted
    pub const TOUCH: [Signal; 2] = [Signal::TouchCs, Signal::TouchIrq];

    /// Upper-case name as used in setup headers (e.g. `TOUCH_CS`)
    pub const fn name(self) -> &'static str {
        match self {
            Signal::Mosi => "MOSI",
            Signal::Miso => "MISO",
            Signal::Sck => "SCK",
            Signal::Cs => "CS",
            Signal::Dc => "DC",
            Signal::Rst => "RST",
            Signal::Bl => "BL",
            Signal::TouchCs => "TOUCH_CS",
            Signal::TouchIrq => "TOUCH_IRQ",
        }
    }

    /// Whether this signal belongs to the touch controller
    pub const fn is_touch(self) -> bool {
        matches!(self, Signal::TouchCs | Signal::TouchIrq)
    }

    /// Whether the MCU drives this signal
    pub const fn is_output(self) -> bool {
        !matches!(self, Signal::Miso | Signal::TouchIrq)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Signal {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Signal::ALL
            .iter()
            .copied()
            .find(|sig| sig.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownName::Signal)
    }
}

/// Signal to GPIO mapping
///
/// Unassigned signals hold `None`. The map itself does not check for
/// duplicates; that is the validator's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinMap {
    pins: [Option<u8>; SIGNAL_COUNT],
}

impl PinMap {
    /// A map with nothing connected
    pub const EMPTY: PinMap = PinMap {
        pins: [None; SIGNAL_COUNT],
    };

    /// Return a copy with `signal` wired to `pin`
    pub const fn with(mut self, signal: Signal, pin: u8) -> Self {
        self.pins[signal.index()] = Some(pin);
        self
    }

    /// Return a copy with `signal` disconnected
    pub const fn without(mut self, signal: Signal) -> Self {
        self.pins[signal.index()] = None;
        self
    }

    /// GPIO assigned to `signal`
    pub const fn get(&self, signal: Signal) -> Option<u8> {
        self.pins[signal.index()]
    }

    /// Wire `signal` to `pin`, or disconnect it with `None`
    pub fn set(&mut self, signal: Signal, pin: Option<u8>) {
        self.pins[signal.index()] = pin;
    }

    /// Iterate over connected signals in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (Signal, u8)> + '_ {
        Signal::ALL
            .into_iter()
            .filter_map(move |sig| self.get(sig).map(|pin| (sig, pin)))
    }

    /// Number of connected signals
    pub fn len(&self) -> usize {
        self.pins.iter().filter(|p| p.is_some()).count()
    }

    /// True when nothing is connected
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Logic level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    Low,
    #[default]
    High,
}

/// Target MCU family
///
/// Bounds the GPIO numbers and SPI clock a setup may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Platform {
    /// No GPIO bound, 80 MHz bus limit
    #[default]
    Generic,
    Esp32,
    Esp32S2,
    Esp32S3,
    Rp2040,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Generic,
        Platform::Esp32,
        Platform::Esp32S2,
        Platform::Esp32S3,
        Platform::Rp2040,
    ];

    /// Key used in setup files
    pub const fn key(self) -> &'static str {
        match self {
            Platform::Generic => "generic",
            Platform::Esp32 => "esp32",
            Platform::Esp32S2 => "esp32s2",
            Platform::Esp32S3 => "esp32s3",
            Platform::Rp2040 => "rp2040",
        }
    }

    /// Highest SPI clock the peripheral can generate, in Hz
    pub const fn max_spi_hz(self) -> u32 {
        match self {
            Platform::Generic | Platform::Esp32 | Platform::Esp32S2 | Platform::Esp32S3 => {
                80_000_000
            }
            // clk_peri / 2
            Platform::Rp2040 => 62_500_000,
        }
    }

    /// Highest GPIO number, if the platform is known
    pub const fn max_gpio(self) -> Option<u8> {
        match self {
            Platform::Generic => None,
            Platform::Esp32 => Some(39),
            Platform::Esp32S2 => Some(46),
            Platform::Esp32S3 => Some(48),
            Platform::Rp2040 => Some(29),
        }
    }

    /// Whether `pin` can only be used as an input
    pub const fn is_input_only(self, pin: u8) -> bool {
        match self {
            Platform::Esp32 => pin >= 34 && pin <= 39,
            Platform::Esp32S2 => pin == 46,
            _ => false,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Platform {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .iter()
            .copied()
            .find(|p| p.key().eq_ignore_ascii_case(s))
            .ok_or(UnknownName::Platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_map() {
        let pins = PinMap::EMPTY.with(Signal::Mosi, 13).with(Signal::Cs, 15);
        assert_eq!(pins.get(Signal::Mosi), Some(13));
        assert_eq!(pins.get(Signal::Cs), Some(15));
        assert_eq!(pins.get(Signal::Sck), None);
        assert_eq!(pins.len(), 2);

        let pins = pins.without(Signal::Mosi);
        assert_eq!(pins.get(Signal::Mosi), None);
        assert!(!pins.is_empty());
        assert!(PinMap::EMPTY.is_empty());
    }

    #[test]
    fn test_pin_iter_order() {
        let pins = PinMap::EMPTY
            .with(Signal::TouchIrq, 22)
            .with(Signal::Mosi, 13)
            .with(Signal::Dc, 2);
        let order: heapless::Vec<Signal, SIGNAL_COUNT> = pins.iter().map(|(s, _)| s).collect();
        assert_eq!(order.as_slice(), &[Signal::Mosi, Signal::Dc, Signal::TouchIrq]);
    }

    #[test]
    fn test_signal_names() {
        assert_eq!("TOUCH_CS".parse::<Signal>(), Ok(Signal::TouchCs));
        assert_eq!("sck".parse::<Signal>(), Ok(Signal::Sck));
        assert_eq!("SDA".parse::<Signal>(), Err(UnknownName::Signal));
        assert!(Signal::Cs.is_output());
        assert!(!Signal::TouchIrq.is_output());
        assert!(Signal::TouchCs.is_touch());
    }

    #[test]
    fn test_platform_limits() {
        assert_eq!(Platform::Generic.max_gpio(), None);
        assert_eq!(Platform::Esp32.max_gpio(), Some(39));
        assert_eq!(Platform::Rp2040.max_spi_hz(), 62_500_000);
        assert!(Platform::Esp32.is_input_only(36));
        assert!(!Platform::Esp32.is_input_only(33));
        assert!(!Platform::Esp32S3.is_input_only(36));
        assert_eq!("ESP32S3".parse::<Platform>(), Ok(Platform::Esp32S3));
    }
}
