//! Command line argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(name = "keyflash")]
#[command(about = "🔑 Password Keyboard Flasher - bake credentials into RP2040 firmware and upload it")]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease logging verbosity (only errors)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to <config dir>/keyflash/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the arduino-cli binary
    #[arg(long, global = true, value_name = "FILE")]
    pub toolchain: Option<PathBuf>,

    /// Path to the firmware template sketch
    #[arg(long, global = true, value_name = "FILE")]
    pub template: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List connected boards
    Ports {
        /// Print the port list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check for the RP2040 core and install it if missing
    Deps {
        /// Install without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Render the firmware with credentials, compile it and upload it
    Flash {
        /// Username baked into the firmware
        #[arg(short, long)]
        username: String,
        /// Password baked into the firmware
        #[arg(short = 'P', long, env = "KEYFLASH_PASSWORD", hide_env_values = true)]
        password: String,
        /// Serial port to upload to (defaults to the first detected board)
        #[arg(short, long)]
        port: Option<String>,
        /// Install missing cores without asking
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
