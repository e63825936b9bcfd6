//! CLI command implementations

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config;
use crate::keywriter::{self, WritePublickeyAction};
use crate::ports;
use crate::process::{self, SystemRunner};

pub async fn execute_command(command: Commands, cli: &Cli) -> Result<()> {
    let project_dir = cli
        .project_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    match command {
        Commands::WritePublickey {
            port,
            environment,
            keyfile,
        } => {
            execute_write_publickey(
                &project_dir,
                port.as_deref(),
                environment.as_deref(),
                &keyfile,
            )
            .await
        }
        Commands::Check {
            environment,
            keyfile,
        } => execute_check(&project_dir, environment.as_deref(), &keyfile),
        Commands::ListPorts => execute_list_ports(),
    }
}

async fn execute_write_publickey(
    project_dir: &Path,
    port: Option<&str>,
    environment: Option<&str>,
    keyfile: &Path,
) -> Result<()> {
    let upload_port = config::resolve_upload_port(project_dir, port, environment)
        .context("Failed to resolve upload port")?;
    let keyfile = resolve_keyfile(project_dir, keyfile);

    log::info!(
        "{}: {} -> {} @ {:#x}",
        keywriter::ACTION_TITLE,
        keyfile.display(),
        upload_port,
        keywriter::KEY_FLASH_OFFSET
    );

    let runner = SystemRunner;
    let action = WritePublickeyAction::new(&runner, upload_port, keyfile)?;
    let outcome = action.run().await?;

    println!(
        "✅ Wrote {} key bytes to flash offset {:#x} in {}ms",
        outcome.key_bytes,
        keywriter::KEY_FLASH_OFFSET,
        outcome.duration_ms
    );
    Ok(())
}

/// Preflight checks: tool availability, key file decodability, port resolution.
fn execute_check(project_dir: &Path, environment: Option<&str>, keyfile: &Path) -> Result<()> {
    let mut failures = 0;

    if process::is_tool_available(keywriter::ESPTOOL) {
        println!("✅ {} found in PATH", keywriter::ESPTOOL);
    } else {
        println!(
            "❌ {} not found in PATH (pip install esptool)",
            keywriter::ESPTOOL
        );
        failures += 1;
    }

    let keyfile = resolve_keyfile(project_dir, keyfile);
    match keywriter::decode_key_bytes(&keyfile) {
        Ok(key) => println!("✅ {} decodes to {} bytes", keyfile.display(), key.len()),
        Err(e) => {
            println!("❌ {}", e);
            failures += 1;
        }
    }

    match config::resolve_upload_port(project_dir, None, environment) {
        Ok(port) => println!("✅ upload_port: {}", port),
        Err(e) => {
            println!("❌ {}", e);
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{} preflight check(s) failed", failures);
    }
    Ok(())
}

fn execute_list_ports() -> Result<()> {
    let ports = ports::list_candidate_ports()?;

    if ports.is_empty() {
        println!("⚠️  No USB serial ports found. Connect your board via USB.");
    } else {
        println!("📡 Found {} USB serial port(s):", ports.len());
        for port in ports {
            println!("  🔌 {}", port);
        }
    }
    Ok(())
}

fn resolve_keyfile(project_dir: &Path, keyfile: &Path) -> PathBuf {
    if keyfile.is_absolute() {
        keyfile.to_path_buf()
    } else {
        project_dir.join(keyfile)
    }
}
