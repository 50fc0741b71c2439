//! Command line interface
//!
//! ```text
//! panelcfg check <file> [--platform <name>]
//! panelcfg show <file>
//! panelcfg gen <file> [--name <IDENT>]
//! panelcfg encode <file> <out>
//! panelcfg preset [<name>]
//! ```

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use log::{info, warn};

use panelcfg_core::storage::{self, MAX_ENCODED_SIZE};
use panelcfg_core::{presets, Platform};

use crate::{codegen, file, report, LoadError};

/// Validation found errors
pub const EXIT_INVALID: u8 = 1;
/// Bad arguments or unreadable input
pub const EXIT_USAGE: u8 = 2;

const DEFAULT_PRESET: &str = "esp32-035-st7796";

/// Parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Check {
        path: PathBuf,
        platform: Option<Platform>,
    },
    Show {
        path: PathBuf,
    },
    Gen {
        path: PathBuf,
        name: String,
    },
    Encode {
        path: PathBuf,
        out: PathBuf,
    },
    Preset {
        name: String,
    },
}

/// Command line could not be understood
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    MissingCommand,
    UnknownCommand(String),
    MissingArgument(&'static str),
    UnexpectedArgument(String),
    UnknownPlatform(String),
    /// `--name` is not an upper-case Rust identifier
    InvalidConstName(String),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::MissingCommand => write!(f, "no command given"),
            UsageError::UnknownCommand(cmd) => write!(f, "unknown command '{cmd}'"),
            UsageError::MissingArgument(arg) => write!(f, "missing {arg}"),
            UsageError::UnexpectedArgument(arg) => write!(f, "unexpected argument '{arg}'"),
            UsageError::UnknownPlatform(name) => write!(f, "unknown platform '{name}'"),
            UsageError::InvalidConstName(name) => {
                write!(f, "'{name}' is not a valid const name, expected [A-Z_][A-Z0-9_]*")
            }
        }
    }
}

impl std::error::Error for UsageError {}

pub const USAGE: &str = "\
usage: panelcfg <command> [args]

commands:
  check <file> [--platform <name>]  validate a setup file
  show <file>                       print pins, clocks and fonts
  gen <file> [--name <IDENT>]       print the setup as a Rust const
  encode <file> <out>               write the setup as a binary record
  preset [<name>]                   print a built-in setup as TOML";

/// Whether `name` matches `[A-Z_][A-Z0-9_]*`
fn is_const_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

impl Command {
    /// Parse arguments, not including the program name
    pub fn parse<I, S>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let command = args.next().ok_or(UsageError::MissingCommand)?;

        let mut positional = Vec::new();
        let mut platform = None;
        let mut name = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--platform" => {
                    let value = args
                        .next()
                        .ok_or(UsageError::MissingArgument("platform name"))?;
                    let parsed = value
                        .parse::<Platform>()
                        .map_err(|_| UsageError::UnknownPlatform(value.clone()))?;
                    platform = Some(parsed);
                }
                "--name" => {
                    let value = args.next().ok_or(UsageError::MissingArgument("const name"))?;
                    if !is_const_name(&value) {
                        return Err(UsageError::InvalidConstName(value));
                    }
                    name = Some(value);
                }
                _ if arg.starts_with("--") => return Err(UsageError::UnexpectedArgument(arg)),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let mut path = |what| positional.next().map(PathBuf::from).ok_or(UsageError::MissingArgument(what));

        let parsed = match command.as_str() {
            "check" => Command::Check {
                path: path("setup file")?,
                platform,
            },
            "show" => Command::Show {
                path: path("setup file")?,
            },
            "gen" => Command::Gen {
                path: path("setup file")?,
                name: name.unwrap_or_else(|| "USER_SETUP".to_string()),
            },
            "encode" => Command::Encode {
                path: path("setup file")?,
                out: path("output file")?,
            },
            "preset" => Command::Preset {
                name: positional
                    .next()
                    .unwrap_or_else(|| DEFAULT_PRESET.to_string()),
            },
            _ => return Err(UsageError::UnknownCommand(command)),
        };

        match positional.next() {
            Some(extra) => Err(UsageError::UnexpectedArgument(extra)),
            None => Ok(parsed),
        }
    }

    /// Run the command, printing results to stdout
    pub fn run(&self) -> ExitCode {
        match self.execute() {
            Ok(code) => ExitCode::from(code),
            Err(e) => {
                eprintln!("panelcfg: {e}");
                ExitCode::from(EXIT_USAGE)
            }
        }
    }

    fn execute(&self) -> Result<u8, LoadError> {
        match self {
            Command::Check { path, platform } => {
                let mut setup = file::load_file(path)?;
                if let Some(platform) = platform {
                    info!("Checking against platform {platform}");
                    setup.platform = *platform;
                }

                let findings = setup.check();
                print!("{}", report::render_report(&path.display().to_string(), &findings));
                Ok(if findings.is_ok() { 0 } else { EXIT_INVALID })
            }
            Command::Show { path } => {
                let setup = file::load_file(path)?;
                print!("{}", report::render_summary(&setup));
                Ok(0)
            }
            Command::Gen { path, name } => {
                let setup = file::load_file(path)?;
                if let Err(errors) = setup.validate() {
                    warn!("Generating code for a setup with {} error(s)", errors.len());
                }
                print!("{}", codegen::render_const(name, &path.display().to_string(), &setup));
                Ok(0)
            }
            Command::Encode { path, out } => {
                let setup = file::load_file(path)?;
                let mut buf = [0u8; MAX_ENCODED_SIZE];
                let bytes = match storage::encode(&setup, &mut buf) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        eprintln!("panelcfg: {e}");
                        return Ok(EXIT_USAGE);
                    }
                };
                fs::write(out, &*bytes).map_err(|e| LoadError::io(out, e))?;
                info!("Wrote {} bytes to {}", bytes.len(), out.display());
                Ok(0)
            }
            Command::Preset { name } => match presets::find(name) {
                Some(setup) => {
                    print!("{}", file::to_toml(setup)?);
                    Ok(0)
                }
                None => {
                    eprintln!("panelcfg: unknown preset '{name}'");
                    Ok(EXIT_USAGE)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelcfg_core::presets::ESP32_035_ST7796;
    use panelcfg_core::{SetupDescriptor, Signal};

    /// Per-process path in the system temp directory
    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("panelcfg-{}-{name}", std::process::id()))
    }

    fn write_setup(name: &str, setup: &SetupDescriptor) -> PathBuf {
        let path = scratch(name);
        fs::write(&path, file::to_toml(setup).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_parse_check() {
        let cmd = Command::parse(["check", "setup.toml"]).unwrap();
        assert_eq!(
            cmd,
            Command::Check {
                path: PathBuf::from("setup.toml"),
                platform: None
            }
        );

        let cmd = Command::parse(["check", "--platform", "esp32", "setup.toml"]).unwrap();
        assert_eq!(
            cmd,
            Command::Check {
                path: PathBuf::from("setup.toml"),
                platform: Some(Platform::Esp32)
            }
        );
    }

    #[test]
    fn test_parse_gen_default_name() {
        let cmd = Command::parse(["gen", "setup.toml"]).unwrap();
        assert!(matches!(cmd, Command::Gen { name, .. } if name == "USER_SETUP"));
    }

    #[test]
    fn test_parse_encode() {
        let cmd = Command::parse(["encode", "in.toml", "out.bin"]).unwrap();
        assert_eq!(
            cmd,
            Command::Encode {
                path: PathBuf::from("in.toml"),
                out: PathBuf::from("out.bin")
            }
        );
        assert_eq!(
            Command::parse(["encode", "in.toml"]),
            Err(UsageError::MissingArgument("output file"))
        );
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!(
            Command::parse(["preset"]).unwrap(),
            Command::Preset {
                name: DEFAULT_PRESET.to_string()
            }
        );
    }

    #[test]
    fn test_parse_gen_rejects_bad_const_name() {
        assert_eq!(
            Command::parse(["gen", "setup.toml", "--name", "my setup"]),
            Err(UsageError::InvalidConstName("my setup".to_string()))
        );
        assert_eq!(
            Command::parse(["gen", "setup.toml", "--name", "9LIVES"]),
            Err(UsageError::InvalidConstName("9LIVES".to_string()))
        );
        assert_eq!(
            Command::parse(["gen", "setup.toml", "--name", "lower"]),
            Err(UsageError::InvalidConstName("lower".to_string()))
        );

        let cmd = Command::parse(["gen", "setup.toml", "--name", "_BOARD_2"]).unwrap();
        assert!(matches!(cmd, Command::Gen { name, .. } if name == "_BOARD_2"));
    }

    #[test]
    fn test_check_valid_setup() {
        let path = write_setup("check-valid.toml", &ESP32_035_ST7796);
        let cmd = Command::Check {
            path: path.clone(),
            platform: Some(Platform::Esp32),
        };
        assert_eq!(cmd.execute().unwrap(), 0);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_check_invalid_setup() {
        let mut setup = ESP32_035_ST7796;
        setup.pins.set(Signal::TouchCs, Some(15));
        let path = write_setup("check-invalid.toml", &setup);

        let cmd = Command::Check {
            path: path.clone(),
            platform: None,
        };
        assert_eq!(cmd.execute().unwrap(), EXIT_INVALID);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_check_missing_file() {
        let cmd = Command::Check {
            path: scratch("does-not-exist.toml"),
            platform: None,
        };
        assert!(matches!(cmd.execute(), Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_encode_writes_record() {
        let path = write_setup("encode-in.toml", &ESP32_035_ST7796);
        let out = scratch("encode-out.bin");

        let cmd = Command::Encode {
            path: path.clone(),
            out: out.clone(),
        };
        assert_eq!(cmd.execute().unwrap(), 0);

        let bytes = fs::read(&out).unwrap();
        assert_eq!(storage::decode(&bytes), Ok(ESP32_035_ST7796));
        fs::remove_file(path).unwrap();
        fs::remove_file(out).unwrap();
    }

    #[test]
    fn test_gen_and_show() {
        let path = write_setup("gen.toml", &ESP32_035_ST7796);
        let generate = Command::Gen {
            path: path.clone(),
            name: "USER_SETUP".to_string(),
        };
        assert_eq!(generate.execute().unwrap(), 0);
        let show = Command::Show { path: path.clone() };
        assert_eq!(show.execute().unwrap(), 0);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_preset_names() {
        let known = Command::Preset {
            name: DEFAULT_PRESET.to_string(),
        };
        assert_eq!(known.execute().unwrap(), 0);

        let unknown = Command::Preset {
            name: "no-such-board".to_string(),
        };
        assert_eq!(unknown.execute().unwrap(), EXIT_USAGE);
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(
            Command::parse(Vec::<String>::new()),
            Err(UsageError::MissingCommand)
        );
        assert_eq!(
            Command::parse(["flash", "x"]),
            Err(UsageError::UnknownCommand("flash".to_string()))
        );
        assert_eq!(
            Command::parse(["check", "a.toml", "b.toml"]),
            Err(UsageError::UnexpectedArgument("b.toml".to_string()))
        );
        assert_eq!(
            Command::parse(["check", "--platform", "avr", "a.toml"]),
            Err(UsageError::UnknownPlatform("avr".to_string()))
        );
        assert_eq!(
            Command::parse(["show", "--verbose", "a.toml"]),
            Err(UsageError::UnexpectedArgument("--verbose".to_string()))
        );
    }
}
