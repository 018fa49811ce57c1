//! Phase results and terminal outcomes

use std::fmt;

use crate::errors::FlasherError;
use crate::models::board::Port;

/// Orchestrator state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashState {
    Idle,
    Validating,
    Staging,
    Compiling,
    Uploading,
    Done,
    Failed(FailedPhase),
}

/// Phase in which a flash attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedPhase {
    Validation,
    Staging,
    Compile,
    Upload,
}

impl fmt::Display for FailedPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailedPhase::Validation => "validation",
            FailedPhase::Staging => "staging",
            FailedPhase::Compile => "compile",
            FailedPhase::Upload => "upload",
        };
        f.write_str(name)
    }
}

/// Terminal outcome of one flash attempt
#[derive(Debug)]
pub enum FlashOutcome {
    Done { port: Port },
    Failed { phase: FailedPhase, error: FlasherError },
}

impl FlashOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FlashOutcome::Done { .. })
    }

    pub fn failed_phase(&self) -> Option<FailedPhase> {
        match self {
            FlashOutcome::Done { .. } => None,
            FlashOutcome::Failed { phase, .. } => Some(*phase),
        }
    }

    /// Final state the attempt reached
    pub fn state(&self) -> FlashState {
        match self {
            FlashOutcome::Done { .. } => FlashState::Done,
            FlashOutcome::Failed { phase, .. } => FlashState::Failed(*phase),
        }
    }

    /// Captured toolchain output for compile/upload failures
    pub fn detail(&self) -> Option<&str> {
        match self {
            FlashOutcome::Done { .. } => None,
            FlashOutcome::Failed { error, .. } => error.captured_output(),
        }
    }
}

impl fmt::Display for FlashOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashOutcome::Done { port } => write!(f, "Flashing to {} complete", port),
            FlashOutcome::Failed { phase, error } => {
                write!(f, "Flash attempt failed during {}: {}", phase, error)
            }
        }
    }
}

/// Result of ensuring the board-support package is installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    AlreadyInstalled,
    Installed,
    Declined,
    Failed { reason: String },
}

impl DependencyStatus {
    /// True when the toolchain can be used for this board
    pub fn is_ready(&self) -> bool {
        matches!(
            self,
            DependencyStatus::AlreadyInstalled | DependencyStatus::Installed
        )
    }
}

/// Exit status and merged stdout/stderr of one toolchain invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Merged output, decoded lossily
    pub output: String,
}

impl ToolOutput {
    pub fn new(exit_code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            exit_code,
            output: output.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_state_and_detail() {
        let outcome = FlashOutcome::Failed {
            phase: FailedPhase::Compile,
            error: FlasherError::Compile {
                exit_code: Some(1),
                output: "undefined reference".to_string(),
            },
        };
        assert!(!outcome.is_success());
        assert_eq!(outcome.state(), FlashState::Failed(FailedPhase::Compile));
        assert_eq!(outcome.detail(), Some("undefined reference"));
        assert!(outcome.to_string().contains("compile"));

        let done = FlashOutcome::Done {
            port: Port::from("COM3"),
        };
        assert_eq!(done.state(), FlashState::Done);
        assert!(done.detail().is_none());
    }

    #[test]
    fn test_dependency_status_readiness() {
        assert!(DependencyStatus::AlreadyInstalled.is_ready());
        assert!(DependencyStatus::Installed.is_ready());
        assert!(!DependencyStatus::Declined.is_ready());
        assert!(
            !DependencyStatus::Failed {
                reason: "x".to_string()
            }
            .is_ready()
        );
    }
}
