//! Error types for ESPKey

pub mod types;

pub use types::*;
