//! The write-publickey action
//!
//! Port of the PlatformIO `write_publickey` custom target: decode the
//! base64 key file, erase the key region, write the decoded bytes, remove
//! the temporary artifact. Four steps, strict order, abort on the first
//! failure.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::errors::{EspKeyError, Result};
use crate::process::ToolRunner;

/// Flash offset reserved for the public key blob
pub const KEY_FLASH_OFFSET: u32 = 0xe000;

/// Size of the reserved key region in bytes
pub const KEY_REGION_SIZE: u32 = 0x1000;

/// External flashing tool
pub const ESPTOOL: &str = "esptool.py";

/// Default base64-encoded key artifact
pub const DEFAULT_KEYFILE: &str = "publickey.pub";

/// Decoded binary artifact created during the action
pub const TEMP_FILE: &str = "publickey.b64";

/// Custom-target metadata carried over from the PlatformIO integration
pub const ACTION_NAME: &str = "write_publickey";
pub const ACTION_TITLE: &str = "Write Public Key";
pub const ACTION_DESCRIPTION: &str =
    "Writes the OpenHaystack public key to the target board (erase first)";

/// Read and base64-decode a key file without touching the device.
///
/// Newlines and other whitespace in the encoded input are ignored, matching
/// the decoder the original pipeline used.
pub fn decode_key_bytes(keyfile: &Path) -> Result<Vec<u8>> {
    let encoded = std::fs::read_to_string(keyfile)
        .map_err(|e| EspKeyError::Key(format!("Failed to read {}: {}", keyfile.display(), e)))?;
    let compact: String = encoded.split_whitespace().collect();
    BASE64
        .decode(compact.as_bytes())
        .map_err(|e| EspKeyError::Key(format!("{} is not valid base64: {}", keyfile.display(), e)))
}

/// The `write_publickey` action against one board.
///
/// Device communication goes through the injected [`ToolRunner`]; the
/// action itself only touches the local filesystem.
pub struct WritePublickeyAction<'a> {
    runner: &'a dyn ToolRunner,
    upload_port: String,
    keyfile: PathBuf,
    tmpfile: PathBuf,
}

/// Summary of a completed write-publickey run
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub key_bytes: usize,
    pub duration_ms: u64,
}

impl<'a> WritePublickeyAction<'a> {
    pub fn new(
        runner: &'a dyn ToolRunner,
        upload_port: impl Into<String>,
        keyfile: impl Into<PathBuf>,
    ) -> Result<Self> {
        let upload_port = upload_port.into().trim().to_string();
        if upload_port.is_empty() {
            return Err(EspKeyError::Config("upload port must not be empty".to_string()));
        }
        let keyfile = keyfile.into();
        let tmpfile = keyfile.with_file_name(TEMP_FILE);
        Ok(Self {
            runner,
            upload_port,
            keyfile,
            tmpfile,
        })
    }

    /// Path of the decoded artifact this action creates and removes.
    pub fn tmpfile(&self) -> &Path {
        &self.tmpfile
    }

    /// Run the four steps in order, aborting on the first failure.
    ///
    /// On an erase or write failure the temporary artifact is left on disk
    /// for inspection; only a fully successful run removes it.
    pub async fn run(&self) -> Result<WriteOutcome> {
        let start = Instant::now();

        let key = self.decode_key()?;
        log::info!(
            "Decoded {} ({} bytes) into {}",
            self.keyfile.display(),
            key.len(),
            self.tmpfile.display()
        );

        self.erase_region().await?;
        self.write_flash().await?;
        self.cleanup();

        Ok(WriteOutcome {
            key_bytes: key.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Step 1: base64-decode the key file into the temp artifact.
    fn decode_key(&self) -> Result<Vec<u8>> {
        let decoded = decode_key_bytes(&self.keyfile)?;
        std::fs::write(&self.tmpfile, &decoded).map_err(|e| {
            EspKeyError::FileSystem(format!("Failed to write {}: {}", self.tmpfile.display(), e))
        })?;
        Ok(decoded)
    }

    /// Step 2: erase the key region, leaving the chip in the stub (no reset).
    async fn erase_region(&self) -> Result<()> {
        let args = vec![
            "--after".to_string(),
            "no_reset".to_string(),
            "--port".to_string(),
            self.upload_port.clone(),
            "erase_region".to_string(),
            format!("{:#x}", KEY_FLASH_OFFSET),
            format!("{:#x}", KEY_REGION_SIZE),
        ];
        self.run_esptool("erase", &args).await
    }

    /// Step 3: write the decoded key, skipping the pre-write reset.
    async fn write_flash(&self) -> Result<()> {
        let args = vec![
            "--before".to_string(),
            "no_reset".to_string(),
            "--port".to_string(),
            self.upload_port.clone(),
            "write_flash".to_string(),
            format!("{:#x}", KEY_FLASH_OFFSET),
            self.tmpfile.to_string_lossy().to_string(),
        ];
        self.run_esptool("write", &args).await
    }

    /// Step 4: best-effort removal of the temp artifact.
    fn cleanup(&self) {
        if let Err(e) = std::fs::remove_file(&self.tmpfile) {
            log::warn!("Failed to remove {}: {}", self.tmpfile.display(), e);
        }
    }

    async fn run_esptool(&self, step: &str, args: &[String]) -> Result<()> {
        let output = self.runner.run(ESPTOOL, args).await?;

        if !output.stdout.trim().is_empty() {
            log::debug!("esptool output: {}", output.stdout.trim());
        }

        if output.success() {
            log::info!("{} step completed on {}", step, self.upload_port);
            Ok(())
        } else {
            Err(EspKeyError::Flash(format!(
                "{} step failed on {} (exit code {:?}): {}",
                step,
                self.upload_port,
                output.exit_code,
                output.stderr.trim()
            )))
        }
    }
}
