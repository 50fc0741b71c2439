//! Tool errors

use std::fmt;
use std::io;
use std::path::PathBuf;

use panelcfg_core::{Signal, UnknownName};

/// Errors loading or writing a setup file
#[derive(Debug)]
pub enum LoadError {
    /// File could not be read or written
    Io { path: PathBuf, source: io::Error },
    /// File is not valid TOML or does not match the setup layout
    Toml(toml::de::Error),
    /// Setup could not be rendered as TOML
    Render(toml::ser::Error),
    /// A name did not match any known driver, font, platform or controller
    UnknownName { kind: UnknownName, name: String },
    /// Pin number is neither -1 nor a GPIO number
    InvalidPin { signal: Signal, value: i64 },
    /// Backlight level is neither "high" nor "low"
    InvalidLevel(String),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unknown(kind: UnknownName, name: &str) -> Self {
        LoadError::UnknownName {
            kind,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            LoadError::Toml(e) => write!(f, "invalid setup file: {e}"),
            LoadError::Render(e) => write!(f, "failed to render setup: {e}"),
            LoadError::UnknownName { kind, name } => write!(f, "{kind} '{name}'"),
            LoadError::InvalidPin { signal, value } => {
                write!(f, "pin {value} for {signal} is not a GPIO number (use -1 for none)")
            }
            LoadError::InvalidLevel(level) => {
                write!(f, "backlight level '{level}' must be 'high' or 'low'")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Toml(e) => Some(e),
            LoadError::Render(e) => Some(e),
            LoadError::UnknownName { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for LoadError {
    fn from(e: toml::de::Error) -> Self {
        LoadError::Toml(e)
    }
}

impl From<toml::ser::Error> for LoadError {
    fn from(e: toml::ser::Error) -> Self {
        LoadError::Render(e)
    }
}
