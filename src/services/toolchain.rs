//! Typed wrappers around the toolchain's command-line verbs
//!
//! Each method builds one fixed argument vector and returns the raw
//! [`ToolOutput`]. Only the exit status decides success; output is never
//! parsed for semantic errors here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::{FlasherError, Result};
use crate::models::{BoardTarget, Port, ToolOutput};
use crate::platform::{CommandRunner, SystemRunner};

/// Handle to the external toolchain binary
#[derive(Clone)]
pub struct Toolchain {
    binary: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl std::fmt::Debug for Toolchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolchain")
            .field("binary", &self.binary)
            .finish_non_exhaustive()
    }
}

impl Toolchain {
    pub fn new(binary: impl Into<PathBuf>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            binary: binary.into(),
            runner,
        }
    }

    /// Toolchain backed by real subprocesses
    pub fn system(binary: impl Into<PathBuf>) -> Self {
        Self::new(binary, Arc::new(SystemRunner::new()))
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Run the toolchain with `args`; an `Err` means it could not be started
    pub async fn invoke(&self, args: &[&str]) -> Result<ToolOutput> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.runner
            .run(&self.binary, &args)
            .await
            .map_err(|e| {
                FlasherError::ToolchainInvocation(format!(
                    "failed to run {} {}: {}",
                    self.binary.display(),
                    args.join(" "),
                    e
                ))
            })
    }

    /// `board list`
    pub async fn board_list(&self) -> Result<ToolOutput> {
        self.invoke(&["board", "list"]).await
    }

    /// `core list`
    pub async fn core_list(&self) -> Result<ToolOutput> {
        self.invoke(&["core", "list"]).await
    }

    /// `config add board_manager.additional_urls <url>`
    pub async fn add_index_url(&self, url: &str) -> Result<ToolOutput> {
        self.invoke(&["config", "add", "board_manager.additional_urls", url])
            .await
    }

    /// `core update-index`
    pub async fn update_index(&self) -> Result<ToolOutput> {
        self.invoke(&["core", "update-index"]).await
    }

    /// `core install <package>`
    pub async fn install_core(&self, package: &str) -> Result<ToolOutput> {
        self.invoke(&["core", "install", package]).await
    }

    /// `compile --fqbn <target> <dir>`; non-zero exit becomes [`FlasherError::Compile`]
    pub async fn compile(&self, workspace_dir: &Path, target: BoardTarget) -> Result<ToolOutput> {
        let dir = workspace_dir.to_string_lossy();
        let output = self
            .invoke(&["compile", "--fqbn", target.fqbn(), dir.as_ref()])
            .await?;

        if output.success() {
            Ok(output)
        } else {
            Err(FlasherError::Compile {
                exit_code: output.exit_code,
                output: output.output,
            })
        }
    }

    /// `upload -p <port> --fqbn <target> <dir>`; non-zero exit becomes [`FlasherError::Upload`]
    pub async fn upload(
        &self,
        workspace_dir: &Path,
        target: BoardTarget,
        port: &Port,
    ) -> Result<ToolOutput> {
        let dir = workspace_dir.to_string_lossy();
        let output = self
            .invoke(&[
                "upload",
                "-p",
                port.as_str(),
                "--fqbn",
                target.fqbn(),
                dir.as_ref(),
            ])
            .await?;

        if output.success() {
            Ok(output)
        } else {
            Err(FlasherError::Upload {
                exit_code: output.exit_code,
                output: output.output,
            })
        }
    }
}
