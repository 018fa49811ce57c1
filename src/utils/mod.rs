//! Utility functions and helpers used throughout keyflash

pub mod logging;
