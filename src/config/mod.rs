//! Upload port resolution from PlatformIO project configuration
//!
//! The original integration ran inside PlatformIO and read `upload_port`
//! from the ambient build environment. Here the same value is resolved
//! explicitly: an optional CLI override first, then the project's
//! `platformio.ini`.

use std::fs;
use std::path::Path;

use crate::errors::{EspKeyError, Result};

/// Name of the PlatformIO project configuration file
pub const PLATFORMIO_INI: &str = "platformio.ini";

/// Resolve the upload port for a project.
///
/// Precedence: an explicit `cli_port`, then the requested `[env:...]`
/// section of `platformio.ini`, then the first environment section (or the
/// global `[env]` section) that declares an `upload_port`.
pub fn resolve_upload_port(
    project_dir: &Path,
    cli_port: Option<&str>,
    environment: Option<&str>,
) -> Result<String> {
    if let Some(port) = cli_port {
        let port = port.trim();
        if port.is_empty() {
            return Err(EspKeyError::Config("upload port must not be empty".to_string()));
        }
        return Ok(port.to_string());
    }

    let platformio_ini = project_dir.join(PLATFORMIO_INI);
    if !platformio_ini.exists() {
        return Err(EspKeyError::Config(format!(
            "{} not found in {} and no --port given",
            PLATFORMIO_INI,
            project_dir.display()
        )));
    }

    let content = fs::read_to_string(&platformio_ini)?;
    find_upload_port(&content, environment).ok_or_else(|| {
        EspKeyError::Config(match environment {
            Some(env) => format!("no upload_port declared for [env:{}] in {}", env, platformio_ini.display()),
            None => format!("no upload_port declared in {}", platformio_ini.display()),
        })
    })
}

/// Parse `[env:...]` sections for an `upload_port` option.
///
/// The global `[env]` section is inherited by every environment, so a port
/// declared there satisfies any requested environment that does not declare
/// its own.
fn find_upload_port(content: &str, environment: Option<&str>) -> Option<String> {
    let mut current_section: Option<String> = None;
    let mut global_port: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();

        // Skip ini comments
        if line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            current_section = if line == "[env]" {
                Some(String::new())
            } else {
                line.strip_prefix("[env:")
                    .and_then(|s| s.strip_suffix(']'))
                    .map(|s| s.to_string())
            };
        } else if let Some(value) = parse_option(line, "upload_port") {
            match (&current_section, environment) {
                (Some(section), Some(wanted)) if section == wanted => return Some(value),
                (Some(section), Some(_)) if section.is_empty() => global_port = Some(value),
                (Some(_), None) => return Some(value),
                _ => {}
            }
        }
    }

    global_port
}

fn parse_option(line: &str, key: &str) -> Option<String> {
    let (k, v) = line.split_once('=')?;
    if k.trim() != key {
        return None;
    }
    let v = v.trim();
    if v.is_empty() { None } else { Some(v.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_option_matches_key_and_trims_value() {
        assert_eq!(
            parse_option("upload_port = /dev/ttyUSB0", "upload_port"),
            Some("/dev/ttyUSB0".to_string())
        );
        assert_eq!(
            parse_option("upload_port=/dev/ttyUSB0", "upload_port"),
            Some("/dev/ttyUSB0".to_string())
        );
        assert_eq!(parse_option("upload_speed = 921600", "upload_port"), None);
        assert_eq!(parse_option("upload_port =", "upload_port"), None);
        assert_eq!(parse_option("not an option line", "upload_port"), None);
    }

    #[test]
    fn find_upload_port_prefers_requested_environment() {
        let ini = "[env:nodemcu]\nupload_port = /dev/ttyUSB0\n\n[env:esp32dev]\nupload_port = /dev/ttyUSB1\n";
        assert_eq!(
            find_upload_port(ini, Some("esp32dev")),
            Some("/dev/ttyUSB1".to_string())
        );
        assert_eq!(
            find_upload_port(ini, None),
            Some("/dev/ttyUSB0".to_string())
        );
        assert_eq!(find_upload_port(ini, Some("missing")), None);
    }

    #[test]
    fn find_upload_port_reads_global_env_section() {
        let ini = "[env]\nupload_port = COM3\n\n[env:esp32dev]\nboard = esp32dev\n";
        assert_eq!(find_upload_port(ini, None), Some("COM3".to_string()));
    }

    #[test]
    fn global_env_port_is_inherited_by_requested_environment() {
        let ini = "[env]\nupload_port = COM3\n\n[env:esp32dev]\nboard = esp32dev\n";
        assert_eq!(
            find_upload_port(ini, Some("esp32dev")),
            Some("COM3".to_string())
        );
    }

    #[test]
    fn environment_port_beats_inherited_global_port() {
        let ini = "[env]\nupload_port = COM3\n\n[env:esp32dev]\nupload_port = /dev/ttyUSB1\n";
        assert_eq!(
            find_upload_port(ini, Some("esp32dev")),
            Some("/dev/ttyUSB1".to_string())
        );
    }

    #[test]
    fn find_upload_port_ignores_comments() {
        let ini = "[env:esp32dev]\n; upload_port = /dev/wrong\n# upload_port = /dev/also_wrong\nupload_port = /dev/ttyACM0\n";
        assert_eq!(
            find_upload_port(ini, Some("esp32dev")),
            Some("/dev/ttyACM0".to_string())
        );
    }
}
