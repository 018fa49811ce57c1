//! Error handling for keyflash

pub mod types;

pub use types::*;
