//! Command line argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::keywriter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "espkey")]
#[command(about = "🔑 Writes the OpenHaystack public key to an ESP32 board via esptool")]
pub struct Cli {
    /// Path to the PlatformIO project directory (defaults to current directory)
    #[arg(global = true, long, value_name = "PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease logging verbosity (only errors)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Write the public key to the board's key region (erase first)
    WritePublickey {
        /// Serial port of the target board (overrides platformio.ini upload_port)
        #[arg(short, long)]
        port: Option<String>,

        /// PlatformIO environment whose upload_port should be used
        #[arg(short, long)]
        environment: Option<String>,

        /// Base64-encoded public key file, relative to the project directory
        #[arg(short, long, default_value = keywriter::DEFAULT_KEYFILE)]
        keyfile: PathBuf,
    },
    /// Verify esptool availability, key file decodability and port resolution
    Check {
        /// PlatformIO environment whose upload_port should be used
        #[arg(short, long)]
        environment: Option<String>,

        /// Base64-encoded public key file, relative to the project directory
        #[arg(short, long, default_value = keywriter::DEFAULT_KEYFILE)]
        keyfile: PathBuf,
    },
    /// List candidate USB serial ports
    ListPorts,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
