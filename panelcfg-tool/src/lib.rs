//! Host-side tooling for display setups
//!
//! Reads TOML setup files, validates them with `panelcfg-core`, and renders
//! reports, Rust constants and binary records. Used by the `panelcfg`
//! binary and by build scripts that compile a setup in.

pub mod cli;
pub mod codegen;
pub mod error;
pub mod file;
pub mod report;

pub use codegen::render_const;
pub use error::LoadError;
pub use file::{load_file, load_str, to_toml, SetupFile};
pub use report::{render_report, render_summary};
