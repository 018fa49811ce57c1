//! keyflash - Password Keyboard Flasher
//!
//! Provisions an RP2040 board with firmware that has a username/password pair
//! baked in. The external `arduino-cli` toolchain does the compiling and
//! uploading; this crate discovers boards, makes sure the board core is
//! installed, renders the firmware template into a throwaway workspace and
//! drives compile and upload while reporting progress.

pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod platform;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use errors::*;
pub use models::*;
pub use services::{FlashOrchestrator, ProgressSink, Toolchain};

/// keyflash version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// keyflash application name
pub const APP_NAME: &str = "keyflash";
