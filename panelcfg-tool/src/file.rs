//! TOML setup files
//!
//! The on-disk layout mirrors a classic setup header:
//!
//! ```toml
//! setup_id = 123
//! platform = "esp32"
//!
//! [display]
//! driver = "ST7796"
//! width = 320
//! height = 480
//!
//! [pins]          # -1 means not connected
//! mosi = 13
//! sck = 14
//! cs = 15
//! dc = 2
//! rst = 4
//!
//! [spi]
//! frequency = 40000000
//!
//! [fonts]
//! load = ["GLCD", "FONT2"]
//! smooth = true
//! ```
//!
//! Unknown keys are rejected. Missing drivers, dimensions and pins are
//! left empty so validation can report them.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use panelcfg_core::{
    ClockRates, Driver, DriverSet, Font, FontSet, Level, PinMap, Platform, SetupDescriptor,
    Signal, TouchController, UnknownName,
};

use crate::error::LoadError;

/// A setup file as written on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupFile {
    #[serde(default)]
    pub setup_id: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub pins: PinsSection,
    #[serde(default)]
    pub spi: SpiSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch: Option<TouchSection>,
    #[serde(default)]
    pub fonts: FontsSection,
}

/// One driver name or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DriverField {
    One(String),
    Many(Vec<String>),
}

impl Default for DriverField {
    fn default() -> Self {
        DriverField::Many(Vec::new())
    }
}

impl DriverField {
    fn names(&self) -> &[String] {
        match self {
            DriverField::One(name) => std::slice::from_ref(name),
            DriverField::Many(names) => names,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplaySection {
    #[serde(default)]
    pub driver: DriverField,
    #[serde(default)]
    pub width: u16,
    #[serde(default)]
    pub height: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backlight_on: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mosi: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miso: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sck: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cs: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rst: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bl: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch_cs: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch_irq: Option<i64>,
}

impl PinsSection {
    fn slot(&mut self, signal: Signal) -> &mut Option<i64> {
        match signal {
            Signal::Mosi => &mut self.mosi,
            Signal::Miso => &mut self.miso,
            Signal::Sck => &mut self.sck,
            Signal::Cs => &mut self.cs,
            Signal::Dc => &mut self.dc,
            Signal::Rst => &mut self.rst,
            Signal::Bl => &mut self.bl,
            Signal::TouchCs => &mut self.touch_cs,
            Signal::TouchIrq => &mut self.touch_irq,
        }
    }

    fn get(&self, signal: Signal) -> Option<i64> {
        match signal {
            Signal::Mosi => self.mosi,
            Signal::Miso => self.miso,
            Signal::Sck => self.sck,
            Signal::Cs => self.cs,
            Signal::Dc => self.dc,
            Signal::Rst => self.rst,
            Signal::Bl => self.bl,
            Signal::TouchCs => self.touch_cs,
            Signal::TouchIrq => self.touch_irq,
        }
    }

    fn to_pin_map(&self) -> Result<PinMap, LoadError> {
        let mut pins = PinMap::EMPTY;

        for signal in Signal::ALL {
            let pin = match self.get(signal) {
                None | Some(-1) => None,
                Some(value) => Some(
                    u8::try_from(value).map_err(|_| LoadError::InvalidPin { signal, value })?,
                ),
            };
            pins.set(signal, pin);
        }
        Ok(pins)
    }

    fn from_pin_map(pins: &PinMap) -> Self {
        let mut section = PinsSection::default();
        for (signal, pin) in pins.iter() {
            *section.slot(signal) = Some(i64::from(pin));
        }
        section
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpiSection {
    #[serde(default = "default_write_hz")]
    pub frequency: u32,
    #[serde(default = "default_read_hz")]
    pub read_frequency: u32,
    #[serde(default = "default_touch_hz")]
    pub touch_frequency: u32,
}

fn default_write_hz() -> u32 {
    ClockRates::default().write_hz
}

fn default_read_hz() -> u32 {
    ClockRates::default().read_hz
}

fn default_touch_hz() -> u32 {
    ClockRates::default().touch_hz
}

impl Default for SpiSection {
    fn default() -> Self {
        let clocks = ClockRates::default();
        Self {
            frequency: clocks.write_hz,
            read_frequency: clocks.read_hz,
            touch_frequency: clocks.touch_hz,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TouchSection {
    pub controller: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontsSection {
    #[serde(default)]
    pub load: Vec<String>,
    #[serde(default)]
    pub smooth: bool,
}

fn lookup<T: std::str::FromStr<Err = UnknownName>>(name: &str) -> Result<T, LoadError> {
    name.parse().map_err(|kind| LoadError::unknown(kind, name))
}

impl SetupFile {
    /// Resolve names and pin numbers into a descriptor
    ///
    /// Does not validate; run [`SetupDescriptor::validate`] on the result.
    pub fn to_descriptor(&self) -> Result<SetupDescriptor, LoadError> {
        let platform = match &self.platform {
            Some(name) => lookup::<Platform>(name)?,
            None => Platform::Generic,
        };

        let drivers = self
            .display
            .driver
            .names()
            .iter()
            .map(|name| lookup::<Driver>(name))
            .collect::<Result<DriverSet, _>>()?;

        let backlight_on = match self.display.backlight_on.as_deref() {
            None => Level::High,
            Some(level) if level.eq_ignore_ascii_case("high") => Level::High,
            Some(level) if level.eq_ignore_ascii_case("low") => Level::Low,
            Some(level) => return Err(LoadError::InvalidLevel(level.to_string())),
        };

        let touch = self
            .touch
            .as_ref()
            .map(|t| lookup::<TouchController>(&t.controller))
            .transpose()?;

        let fonts = self
            .fonts
            .load
            .iter()
            .map(|name| lookup::<Font>(name))
            .collect::<Result<FontSet, _>>()?;

        Ok(SetupDescriptor {
            setup_id: self.setup_id,
            platform,
            drivers,
            width: self.display.width,
            height: self.display.height,
            pins: self.pins.to_pin_map()?,
            backlight_on,
            clocks: ClockRates::new(
                self.spi.frequency,
                self.spi.read_frequency,
                self.spi.touch_frequency,
            ),
            touch,
            fonts,
            smooth_font: self.fonts.smooth,
        })
    }

    /// Describe a descriptor in file form
    pub fn from_descriptor(setup: &SetupDescriptor) -> Self {
        let names: Vec<String> = setup.drivers.iter().map(|d| d.name().to_string()).collect();
        let driver = match names.as_slice() {
            [one] => DriverField::One(one.clone()),
            _ => DriverField::Many(names),
        };

        Self {
            setup_id: setup.setup_id,
            platform: Some(setup.platform.key().to_string()),
            display: DisplaySection {
                driver,
                width: setup.width,
                height: setup.height,
                backlight_on: match setup.backlight_on {
                    Level::High => None,
                    Level::Low => Some("low".to_string()),
                },
            },
            pins: PinsSection::from_pin_map(&setup.pins),
            spi: SpiSection {
                frequency: setup.clocks.write_hz,
                read_frequency: setup.clocks.read_hz,
                touch_frequency: setup.clocks.touch_hz,
            },
            touch: setup.touch.map(|t| TouchSection {
                controller: t.name().to_string(),
            }),
            fonts: FontsSection {
                load: setup.fonts.iter().map(|f| f.name().to_string()).collect(),
                smooth: setup.smooth_font,
            },
        }
    }
}

/// Parse a setup from TOML text
pub fn load_str(input: &str) -> Result<SetupDescriptor, LoadError> {
    let file: SetupFile = toml::from_str(input)?;
    debug!("parsed setup file: {:?}", file);
    file.to_descriptor()
}

/// Read and parse a setup file
pub fn load_file(path: impl AsRef<Path>) -> Result<SetupDescriptor, LoadError> {
    let path = path.as_ref();
    info!("Loading setup from {}", path.display());

    let input = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let setup = load_str(&input)?;

    log_setup_summary(&setup);
    Ok(setup)
}

/// Render a descriptor as TOML
pub fn to_toml(setup: &SetupDescriptor) -> Result<String, LoadError> {
    Ok(toml::to_string(&SetupFile::from_descriptor(setup))?)
}

fn log_setup_summary(setup: &SetupDescriptor) {
    info!("Setup {} loaded", setup.setup_id);
    debug!("  {} driver(s) selected", setup.drivers.len());
    debug!("  panel {}x{}", setup.width, setup.height);
    debug!("  {} pins wired", setup.pins.len());
    debug!("  {} fonts", setup.fonts.len());
}
