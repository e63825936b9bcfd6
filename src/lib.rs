//! ESPKey - OpenHaystack public key writer for ESP32 boards
//!
//! ESPKey replaces the PlatformIO `write_publickey` custom target with a
//! standalone tool: it base64-decodes a public key file and writes it to a
//! fixed flash region on the target board, delegating all device
//! communication to esptool.

pub mod cli;
pub mod config;
pub mod errors;
pub mod keywriter;
pub mod ports;
pub mod process;
pub mod utils;

// Re-export commonly used types
pub use errors::*;

/// ESPKey version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// ESPKey application name
pub const APP_NAME: &str = "espkey";
