//! Typed subprocess execution for external flashing tools
//!
//! Flash pipelines talk to the outside world through the [`ToolRunner`]
//! trait, so they can be exercised in tests with a scripted runner instead
//! of real hardware.

use async_trait::async_trait;
use tokio::process::Command;

use crate::errors::{EspKeyError, Result};

/// Captured result of one external tool invocation
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code of the process, if it terminated normally
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Abstraction over external tool invocation
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run `program` with a structured argument vector and capture its output.
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// Runner that spawns real processes via tokio
pub struct SystemRunner;

#[async_trait]
impl ToolRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        log::debug!("Executing: {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| EspKeyError::Flash(format!("Failed to start {}: {}", program, e)))?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Check whether an external tool is available on PATH
pub fn is_tool_available(tool: &str) -> bool {
    which::which(tool).is_ok()
}
