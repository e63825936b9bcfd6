//! USB serial port discovery

use crate::errors::{EspKeyError, Result};

/// List serial ports that look like USB-attached development boards.
pub fn list_candidate_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports()
        .map_err(|e| EspKeyError::Board(format!("Failed to enumerate serial ports: {}", e)))?;

    let mut names: Vec<String> = ports
        .into_iter()
        .map(|info| info.port_name)
        .filter(|name| is_candidate_port(name))
        .collect();

    names.sort();
    Ok(names)
}

/// ESP boards show up as usbmodem/usbserial on macOS, ttyUSB/ttyACM on
/// Linux and COM ports on Windows.
fn is_candidate_port(name: &str) -> bool {
    name.contains("/dev/cu.usbmodem")
        || name.contains("/dev/cu.usbserial")
        || name.contains("/dev/tty.usbmodem")
        || name.contains("/dev/tty.usbserial")
        || name.contains("/dev/ttyUSB")
        || name.contains("/dev/ttyACM")
        || name.starts_with("COM")
}
