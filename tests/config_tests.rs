//! Tests for upload-port resolution from platformio.ini

use espkey::config;
use espkey::errors::EspKeyError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_ini(dir: &Path, content: &str) {
    fs::write(dir.join(config::PLATFORMIO_INI), content).unwrap();
}

#[test]
fn resolves_port_from_environment_section() {
    let dir = TempDir::new().unwrap();
    write_ini(
        dir.path(),
        "[env:esp32dev]\nplatform = espressif32\nboard = esp32dev\nupload_port = /dev/ttyUSB0\n",
    );

    let port = config::resolve_upload_port(dir.path(), None, None).unwrap();
    assert_eq!(port, "/dev/ttyUSB0");
}

#[test]
fn requested_environment_wins_over_earlier_sections() {
    let dir = TempDir::new().unwrap();
    write_ini(
        dir.path(),
        "[env:nodemcu]\nupload_port = /dev/ttyUSB0\n\n[env:esp32dev]\nupload_port = /dev/ttyUSB1\n",
    );

    let port = config::resolve_upload_port(dir.path(), None, Some("esp32dev")).unwrap();
    assert_eq!(port, "/dev/ttyUSB1");
}

#[test]
fn requested_environment_inherits_global_env_port() {
    let dir = TempDir::new().unwrap();
    write_ini(
        dir.path(),
        "[env]\nupload_port = COM3\n\n[env:esp32dev]\nboard = esp32dev\n",
    );

    let port = config::resolve_upload_port(dir.path(), None, Some("esp32dev")).unwrap();
    assert_eq!(port, "COM3");
}

#[test]
fn unknown_environment_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    write_ini(dir.path(), "[env:esp32dev]\nupload_port = /dev/ttyUSB0\n");

    let err = config::resolve_upload_port(dir.path(), None, Some("nope")).unwrap_err();
    assert!(matches!(err, EspKeyError::Config(_)), "got: {:?}", err);
}

#[test]
fn cli_port_overrides_project_configuration() {
    let dir = TempDir::new().unwrap();
    write_ini(dir.path(), "[env:esp32dev]\nupload_port = /dev/ttyUSB0\n");

    let port = config::resolve_upload_port(dir.path(), Some("/dev/ttyACM7"), None).unwrap();
    assert_eq!(port, "/dev/ttyACM7");
}

#[test]
fn cli_port_works_without_platformio_ini() {
    let dir = TempDir::new().unwrap();

    let port = config::resolve_upload_port(dir.path(), Some("COM3"), None).unwrap();
    assert_eq!(port, "COM3");
}

#[test]
fn empty_cli_port_is_rejected() {
    let dir = TempDir::new().unwrap();

    let err = config::resolve_upload_port(dir.path(), Some("   "), None).unwrap_err();
    assert!(matches!(err, EspKeyError::Config(_)), "got: {:?}", err);
}

#[test]
fn missing_ini_without_cli_port_is_a_config_error() {
    let dir = TempDir::new().unwrap();

    let err = config::resolve_upload_port(dir.path(), None, None).unwrap_err();
    assert!(matches!(err, EspKeyError::Config(_)), "got: {:?}", err);
}

#[test]
fn ini_without_upload_port_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    write_ini(
        dir.path(),
        "[env:esp32dev]\nplatform = espressif32\nboard = esp32dev\n",
    );

    let err = config::resolve_upload_port(dir.path(), None, None).unwrap_err();
    assert!(matches!(err, EspKeyError::Config(_)), "got: {:?}", err);
}
