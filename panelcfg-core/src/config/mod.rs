//! Configuration types
//!
//! Board-agnostic setup structures, stored as postcard binary data or
//! authored as TOML by the host tool.

pub mod hardware;
pub mod setup;
pub mod types;

pub use hardware::*;
pub use setup::*;
pub use types::*;
