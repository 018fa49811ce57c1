//! Data models and types used throughout keyflash

pub mod board;
pub mod events;
pub mod flash;
pub mod outcome;

// Re-export commonly used types
pub use board::*;
pub use events::*;
pub use flash::*;
pub use outcome::*;
