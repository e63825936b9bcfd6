//! Custom error types for ESPKey

use std::fmt;

/// Main error type for ESPKey operations
#[derive(Debug)]
pub enum EspKeyError {
    /// Configuration related errors (upload port resolution)
    Config(String),
    /// Key file errors (missing file, malformed base64)
    Key(String),
    /// Flash operation errors reported by the external flashing tool
    Flash(String),
    /// Serial port discovery errors
    Board(String),
    /// File system errors
    FileSystem(String),
    /// General I/O errors
    Io(std::io::Error),
}

impl fmt::Display for EspKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EspKeyError::Config(msg) => write!(f, "Configuration error: {}", msg),
            EspKeyError::Key(msg) => write!(f, "Key file error: {}", msg),
            EspKeyError::Flash(msg) => write!(f, "Flash error: {}", msg),
            EspKeyError::Board(msg) => write!(f, "Board error: {}", msg),
            EspKeyError::FileSystem(msg) => write!(f, "File system error: {}", msg),
            EspKeyError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for EspKeyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EspKeyError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EspKeyError {
    fn from(err: std::io::Error) -> Self {
        EspKeyError::Io(err)
    }
}

/// Result type alias for ESPKey operations
pub type Result<T> = std::result::Result<T, EspKeyError>;
