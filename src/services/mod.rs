//! Services module containing the flashing core
//!
//! These services are shared by every presentation adapter (CLI, TUI) so that
//! discovery, dependency handling and flashing behave the same everywhere.

pub mod dependency_manager;
pub mod orchestrator;
pub mod port_scanner;
pub mod progress;
pub mod template;
pub mod toolchain;
pub mod workspace;

pub use dependency_manager::*;
pub use orchestrator::*;
pub use port_scanner::*;
pub use progress::*;
pub use toolchain::*;
pub use workspace::*;
