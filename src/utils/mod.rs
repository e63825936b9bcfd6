//! Utility functions and helpers used throughout ESPKey

pub mod logging;
