//! Progress events emitted during a flash attempt

use std::fmt;

use crate::models::board::PortList;
use crate::models::outcome::FlashOutcome;

/// Phase a progress event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashPhase {
    Discovery,
    Dependencies,
    Validating,
    Staging,
    Compiling,
    Uploading,
    Cleanup,
    Done,
    Failed,
}

impl FlashPhase {
    pub fn name(&self) -> &'static str {
        match self {
            FlashPhase::Discovery => "discovery",
            FlashPhase::Dependencies => "dependencies",
            FlashPhase::Validating => "validating",
            FlashPhase::Staging => "staging",
            FlashPhase::Compiling => "compiling",
            FlashPhase::Uploading => "uploading",
            FlashPhase::Cleanup => "cleanup",
            FlashPhase::Done => "done",
            FlashPhase::Failed => "failed",
        }
    }
}

impl fmt::Display for FlashPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One human-readable progress line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub phase: FlashPhase,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(phase: FlashPhase, message: impl Into<String>) -> Self {
        Self {
            phase,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

/// Application events for communication between the core and presentation adapters
#[derive(Debug)]
pub enum AppEvent {
    Progress(ProgressEvent),
    PortsScanned(PortList),
    FlashFinished(FlashOutcome),
    /// Attempt task ended without an outcome (rejected or panicked)
    FlashAborted(String),
    Tick,
}
