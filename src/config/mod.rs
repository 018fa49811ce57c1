//! Configuration management for keyflash

pub mod app_config;
pub mod constants;

pub use app_config::*;
pub use constants::*;
