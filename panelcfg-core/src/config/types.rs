//! Configuration type definitions
//!
//! Driver, font, touch and bus clock types referenced by a setup.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A name in a setup did not match any known value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnknownName {
    Driver,
    Font,
    Platform,
    Signal,
    TouchController,
}

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            UnknownName::Driver => "driver",
            UnknownName::Font => "font",
            UnknownName::Platform => "platform",
            UnknownName::Signal => "signal",
            UnknownName::TouchController => "touch controller",
        };
        write!(f, "unknown {what}")
    }
}

impl core::error::Error for UnknownName {}

/// Display controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Driver {
    Ili9341,
    Ili9163,
    St7735,
    Ili9481,
    Ili9486,
    Ili9488,
    St7789,
    St7796,
    R61581,
    Hx8357d,
    Gc9a01,
    Ssd1963,
}

impl Driver {
    pub const ALL: [Driver; 12] = [
        Driver::Ili9341,
        Driver::Ili9163,
        Driver::St7735,
        Driver::Ili9481,
        Driver::Ili9486,
        Driver::Ili9488,
        Driver::St7789,
        Driver::St7796,
        Driver::R61581,
        Driver::Hx8357d,
        Driver::Gc9a01,
        Driver::Ssd1963,
    ];

    /// Controller name as printed on datasheets
    pub const fn name(self) -> &'static str {
        match self {
            Driver::Ili9341 => "ILI9341",
            Driver::Ili9163 => "ILI9163",
            Driver::St7735 => "ST7735",
            Driver::Ili9481 => "ILI9481",
            Driver::Ili9486 => "ILI9486",
            Driver::Ili9488 => "ILI9488",
            Driver::St7789 => "ST7789",
            Driver::St7796 => "ST7796",
            Driver::R61581 => "R61581",
            Driver::Hx8357d => "HX8357D",
            Driver::Gc9a01 => "GC9A01",
            Driver::Ssd1963 => "SSD1963",
        }
    }

    /// Native (width, height) in portrait orientation
    pub const fn native_size(self) -> (u16, u16) {
        match self {
            Driver::Ili9341 | Driver::St7789 => (240, 320),
            Driver::Ili9163 => (128, 160),
            Driver::St7735 => (128, 160),
            Driver::Ili9481
            | Driver::Ili9486
            | Driver::Ili9488
            | Driver::St7796
            | Driver::R61581
            | Driver::Hx8357d => (320, 480),
            Driver::Gc9a01 => (240, 240),
            Driver::Ssd1963 => (480, 800),
        }
    }

    const fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Driver {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_suffix("_DRIVER").unwrap_or(s);
        Driver::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownName::Driver)
    }
}

/// Set of selected drivers
///
/// A setup header selects a driver by defining one `*_DRIVER` symbol, which
/// makes zero or several selections possible. The set keeps that shape so
/// the validator can reject it.
///
/// Bits that name no [`Driver`] are rejected when decoding a stored set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32"))]
pub struct DriverSet(u32);

impl DriverSet {
    pub const EMPTY: DriverSet = DriverSet(0);

    /// Every bit that names a driver
    const KNOWN: u32 = {
        let mut bits = 0;
        let mut i = 0;
        while i < Driver::ALL.len() {
            bits |= Driver::ALL[i].bit();
            i += 1;
        }
        bits
    };

    /// A set holding only `driver`
    pub const fn only(driver: Driver) -> Self {
        DriverSet(driver.bit())
    }

    /// Return a copy with `driver` added
    pub const fn with(self, driver: Driver) -> Self {
        DriverSet(self.0 | driver.bit())
    }

    pub fn insert(&mut self, driver: Driver) {
        self.0 |= driver.bit();
    }

    pub const fn contains(&self, driver: Driver) -> bool {
        self.0 & driver.bit() != 0
    }

    pub const fn len(&self) -> u32 {
        (self.0 & Self::KNOWN).count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The selected driver when exactly one is selected
    pub fn single(&self) -> Option<Driver> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Driver> + '_ {
        Driver::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl TryFrom<u32> for DriverSet {
    type Error = UnknownName;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        if bits & !Self::KNOWN != 0 {
            return Err(UnknownName::Driver);
        }
        Ok(DriverSet(bits))
    }
}

impl FromIterator<Driver> for DriverSet {
    fn from_iter<T: IntoIterator<Item = Driver>>(iter: T) -> Self {
        let mut set = DriverSet::EMPTY;
        for driver in iter {
            set.insert(driver);
        }
        set
    }
}

/// Bundled font resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Font {
    /// Font 1, original Adafruit 8 px
    Glcd,
    /// Font 2, 16 px, 96 characters
    Font2,
    /// Font 4, 26 px, 96 characters
    Font4,
    /// Font 6, 48 px, digits and `:-.apm` only
    Font6,
    /// Font 7, 7-segment 48 px, digits and `:.` only
    Font7,
    /// Font 8, 75 px, digits and `:-.` only
    Font8,
    /// Font 8 narrowed to fit a 128 px wide panel
    Font8N,
    /// Adafruit GFX free fonts FF1 to FF48 plus custom fonts
    Gfxff,
}

impl Font {
    pub const ALL: [Font; 8] = [
        Font::Glcd,
        Font::Font2,
        Font::Font4,
        Font::Font6,
        Font::Font7,
        Font::Font8,
        Font::Font8N,
        Font::Gfxff,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Font::Glcd => "GLCD",
            Font::Font2 => "FONT2",
            Font::Font4 => "FONT4",
            Font::Font6 => "FONT6",
            Font::Font7 => "FONT7",
            Font::Font8 => "FONT8",
            Font::Font8N => "FONT8N",
            Font::Gfxff => "GFXFF",
        }
    }

    /// Approximate flash cost in bytes; `None` when it depends on what is used
    pub const fn flash_bytes(self) -> Option<u32> {
        match self {
            Font::Glcd => Some(1820),
            Font::Font2 => Some(3534),
            Font::Font4 => Some(5848),
            Font::Font6 => Some(2666),
            Font::Font7 => Some(2438),
            Font::Font8 | Font::Font8N => Some(3256),
            Font::Gfxff => None,
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Font {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("LOAD_").unwrap_or(s);
        Font::ALL
            .iter()
            .copied()
            .find(|font| font.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownName::Font)
    }
}

/// Set of fonts linked into the program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16"))]
pub struct FontSet(u16);

impl FontSet {
    pub const EMPTY: FontSet = FontSet(0);

    const KNOWN: u16 = {
        let mut bits = 0;
        let mut i = 0;
        while i < Font::ALL.len() {
            bits |= Font::ALL[i].bit();
            i += 1;
        }
        bits
    };

    pub const fn with(self, font: Font) -> Self {
        FontSet(self.0 | font.bit())
    }

    pub fn insert(&mut self, font: Font) {
        self.0 |= font.bit();
    }

    pub const fn contains(&self, font: Font) -> bool {
        self.0 & font.bit() != 0
    }

    pub const fn len(&self) -> u32 {
        (self.0 & Self::KNOWN).count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Font> + '_ {
        Font::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    /// Sum of the known flash costs of the selected fonts
    pub fn flash_bytes(&self) -> u32 {
        self.iter().filter_map(Font::flash_bytes).sum()
    }
}

impl TryFrom<u16> for FontSet {
    type Error = UnknownName;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        if bits & !Self::KNOWN != 0 {
            return Err(UnknownName::Font);
        }
        Ok(FontSet(bits))
    }
}

impl FromIterator<Font> for FontSet {
    fn from_iter<T: IntoIterator<Item = Font>>(iter: T) -> Self {
        let mut set = FontSet::EMPTY;
        for font in iter {
            set.insert(font);
        }
        set
    }
}

/// Resistive touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TouchController {
    Xpt2046,
}

impl TouchController {
    pub const fn name(self) -> &'static str {
        match self {
            TouchController::Xpt2046 => "XPT2046",
        }
    }

    /// Highest SPI clock the controller samples reliably at, in Hz
    pub const fn max_spi_hz(self) -> u32 {
        match self {
            TouchController::Xpt2046 => 2_500_000,
        }
    }
}

impl fmt::Display for TouchController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TouchController {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("XPT2046") {
            Ok(TouchController::Xpt2046)
        } else {
            Err(UnknownName::TouchController)
        }
    }
}

/// Bus clock ceilings for each transaction class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockRates {
    /// Pixel and command writes
    pub write_hz: u32,
    /// Register and framebuffer reads
    pub read_hz: u32,
    /// Touch controller sampling
    pub touch_hz: u32,
}

impl ClockRates {
    pub const fn new(write_hz: u32, read_hz: u32, touch_hz: u32) -> Self {
        Self {
            write_hz,
            read_hz,
            touch_hz,
        }
    }

    /// Rate for one transaction class
    pub const fn get(&self, field: ClockField) -> u32 {
        match field {
            ClockField::Write => self.write_hz,
            ClockField::Read => self.read_hz,
            ClockField::Touch => self.touch_hz,
        }
    }
}

impl Default for ClockRates {
    fn default() -> Self {
        Self::new(27_000_000, 20_000_000, 2_500_000)
    }
}

/// Transaction class of a [`ClockRates`] field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockField {
    Write,
    Read,
    Touch,
}

impl ClockField {
    pub const ALL: [ClockField; 3] = [ClockField::Write, ClockField::Read, ClockField::Touch];

    /// Name of the setting as written in setup headers
    pub const fn name(self) -> &'static str {
        match self {
            ClockField::Write => "SPI_FREQUENCY",
            ClockField::Read => "SPI_READ_FREQUENCY",
            ClockField::Touch => "SPI_TOUCH_FREQUENCY",
        }
    }
}

impl fmt::Display for ClockField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_set() {
        let set = DriverSet::only(Driver::St7796);
        assert_eq!(set.len(), 1);
        assert_eq!(set.single(), Some(Driver::St7796));

        let set = set.with(Driver::Ili9341);
        assert_eq!(set.len(), 2);
        assert_eq!(set.single(), None);
        assert!(set.contains(Driver::Ili9341));

        assert!(DriverSet::EMPTY.is_empty());
        assert_eq!(DriverSet::EMPTY.single(), None);
    }

    #[test]
    fn test_driver_names() {
        assert_eq!("ST7796".parse::<Driver>(), Ok(Driver::St7796));
        assert_eq!("st7796_DRIVER".parse::<Driver>(), Ok(Driver::St7796));
        assert_eq!("ST7797".parse::<Driver>(), Err(UnknownName::Driver));
        assert_eq!(Driver::St7796.native_size(), (320, 480));
    }

    #[test]
    fn test_font_set() {
        let fonts: FontSet = [Font::Glcd, Font::Font2, Font::Gfxff].into_iter().collect();
        assert_eq!(fonts.len(), 3);
        assert!(fonts.contains(Font::Font2));
        assert!(!fonts.contains(Font::Font4));
        // GFXFF has no fixed cost
        assert_eq!(fonts.flash_bytes(), 1820 + 3534);
    }

    #[test]
    fn test_sets_reject_unknown_bits() {
        assert_eq!(DriverSet::try_from(1u32 << 7), Ok(DriverSet::only(Driver::St7796)));
        assert_eq!(DriverSet::try_from(1u32 << 20), Err(UnknownName::Driver));
        assert_eq!(DriverSet::try_from(0u32), Ok(DriverSet::EMPTY));

        assert_eq!(FontSet::try_from(0b1u16), Ok(FontSet::EMPTY.with(Font::Glcd)));
        assert_eq!(FontSet::try_from(1u16 << 12), Err(UnknownName::Font));
    }

    #[test]
    fn test_font_names() {
        assert_eq!("LOAD_FONT8N".parse::<Font>(), Ok(Font::Font8N));
        assert_eq!("gfxff".parse::<Font>(), Ok(Font::Gfxff));
        assert_eq!("FONT3".parse::<Font>(), Err(UnknownName::Font));
    }

    #[test]
    fn test_clock_fields() {
        let clocks = ClockRates::new(40_000_000, 20_000_000, 2_500_000);
        assert_eq!(clocks.get(ClockField::Write), 40_000_000);
        assert_eq!(clocks.get(ClockField::Read), 20_000_000);
        assert_eq!(clocks.get(ClockField::Touch), 2_500_000);
        assert_eq!(ClockField::Read.name(), "SPI_READ_FREQUENCY");
    }
}
