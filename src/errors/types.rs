//! Custom error types for keyflash

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for keyflash operations
#[derive(Debug, Error)]
pub enum FlasherError {
    /// Empty or placeholder credential/port supplied by the caller
    #[error("Validation error: {0}")]
    Validation(String),

    /// Firmware template file does not exist
    #[error("Firmware template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Workspace creation, write or cleanup failure
    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Toolchain binary missing or a query exited non-zero
    #[error("Toolchain invocation failed: {0}")]
    ToolchainInvocation(String),

    /// One of the board package install steps failed
    #[error("Dependency install step '{step}' failed{}", exit_suffix(.exit_code))]
    DependencyInstall {
        step: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// `compile` exited non-zero
    #[error("Compile failed{}", exit_suffix(.exit_code))]
    Compile {
        exit_code: Option<i32>,
        output: String,
    },

    /// `upload` exited non-zero
    #[error("Upload failed{}", exit_suffix(.exit_code))]
    Upload {
        exit_code: Option<i32>,
        output: String,
    },

    /// A flash attempt is already running
    #[error("A flash attempt is already in progress")]
    AttemptInProgress,

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {})", code),
        None => " (no exit code)".to_string(),
    }
}

impl FlasherError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        FlasherError::Io {
            context: context.into(),
            source,
        }
    }

    /// Captured toolchain output attached to this error, if any
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            FlasherError::DependencyInstall { output, .. }
            | FlasherError::Compile { output, .. }
            | FlasherError::Upload { output, .. } => Some(output.as_str()),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for FlasherError {
    fn from(err: toml::de::Error) -> Self {
        FlasherError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for FlasherError {
    fn from(err: toml::ser::Error) -> Self {
        FlasherError::Config(err.to_string())
    }
}

/// Result type alias for keyflash operations
pub type Result<T> = std::result::Result<T, FlasherError>;
