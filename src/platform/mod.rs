//! Platform-specific process spawning for the external toolchain
//!
//! Everything above this module is platform-agnostic: it hands a program and
//! an argument vector to a [`CommandRunner`] and gets back the exit status and
//! the merged stdout/stderr stream.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::config::TOOLCHAIN_NAME;
use crate::models::ToolOutput;

#[cfg(target_os = "windows")]
pub mod windows;

/// Run an external command and capture its combined output
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Spawn `program` with `args` and wait for it to exit.
    ///
    /// An `Err` means the process could not be run at all (binary missing,
    /// permission denied). A non-zero exit is an `Ok` with the status recorded.
    async fn run(&self, program: &Path, args: &[String]) -> std::io::Result<ToolOutput>;
}

/// Spawns real processes with tokio, hiding the console window on Windows
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &Path, args: &[String]) -> std::io::Result<ToolOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        suppress_console_window(&mut cmd);

        log::debug!("Executing: {} {}", program.display(), args.join(" "));
        let mut child = cmd.spawn()?;

        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let mut readers = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            readers.push(tokio::spawn(forward_lines(stdout, tx.clone())));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(tokio::spawn(forward_lines(stderr, tx.clone())));
        }
        drop(tx);

        let mut merged = Vec::new();
        while let Some(chunk) = rx.recv().await {
            log::trace!("{}", String::from_utf8_lossy(&chunk).trim_end());
            merged.extend_from_slice(&chunk);
        }
        for reader in readers {
            let _ = reader.await;
        }

        let status = child.wait().await?;
        Ok(ToolOutput::new(
            status.code(),
            String::from_utf8_lossy(&merged).into_owned(),
        ))
    }
}

/// Forward raw lines (newline included) from one pipe into the shared channel
async fn forward_lines<R>(pipe: R, tx: mpsc::UnboundedSender<Vec<u8>>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(pipe);
    loop {
        let mut line = Vec::new();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::debug!("Stopped reading toolchain output: {}", e);
                break;
            }
        }
    }
}

#[cfg(target_os = "windows")]
fn suppress_console_window(cmd: &mut Command) {
    windows::hide_console(cmd);
}

#[cfg(not(target_os = "windows"))]
fn suppress_console_window(_cmd: &mut Command) {}

/// Toolchain binary file name for the current platform
pub fn toolchain_file_name() -> String {
    format!("{}{}", TOOLCHAIN_NAME, std::env::consts::EXE_SUFFIX)
}

/// Directory containing the running executable
pub fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Resolve the toolchain binary.
///
/// Order: explicit override, next to the executable, on `PATH`. When none of
/// those exist the executable-relative path is returned anyway so the failure
/// surfaces at invocation time.
pub fn resolve_toolchain_path(override_path: Option<&Path>) -> PathBuf {
    if let Some(path) = override_path {
        return path.to_path_buf();
    }

    let bundled = executable_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(toolchain_file_name());
    if bundled.exists() {
        return bundled;
    }

    match which::which(TOOLCHAIN_NAME) {
        Ok(path) => {
            log::debug!("Using {} from PATH: {}", TOOLCHAIN_NAME, path.display());
            path
        }
        Err(_) => {
            log::warn!(
                "{} not found next to the executable or on PATH",
                TOOLCHAIN_NAME
            );
            bundled
        }
    }
}
