//! End-to-end flash attempt: validate, render, stage, compile, upload, clean up
//!
//! Used by both the CLI and the TUI. The orchestrator never touches UI state;
//! it reports progress through a [`ProgressSink`] and returns a [`FlashOutcome`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::errors::{FlasherError, Result};
use crate::models::{
    AppEvent, BoardTarget, FailedPhase, FlashOutcome, FlashPhase, FlashRequest, FlashState,
};
use crate::services::progress::ProgressSink;
use crate::services::template::{credential_substitutions, load_template, render};
use crate::services::toolchain::Toolchain;
use crate::services::workspace::BuildWorkspace;

/// Runs flash attempts one at a time
#[derive(Debug)]
pub struct FlashOrchestrator {
    toolchain: Toolchain,
    template_path: PathBuf,
    target: BoardTarget,
    workspace_root: Option<PathBuf>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag on every exit path of `run`
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl FlashOrchestrator {
    pub fn new(toolchain: Toolchain, template_path: impl Into<PathBuf>, target: BoardTarget) -> Self {
        Self {
            toolchain,
            template_path: template_path.into(),
            target,
            workspace_root: None,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Create workspaces under `root` instead of the OS temp directory
    pub fn with_workspace_root(mut self, root: Option<PathBuf>) -> Self {
        self.workspace_root = root;
        self
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn target(&self) -> BoardTarget {
        self.target
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one attempt to completion.
    ///
    /// Returns `Err(AttemptInProgress)` without doing anything if another
    /// attempt is still running. Every other failure is reported as
    /// `FlashOutcome::Failed`.
    pub async fn run(&self, request: FlashRequest, sink: &dyn ProgressSink) -> Result<FlashOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("Rejected flash request: another attempt is in progress");
            return Err(FlasherError::AttemptInProgress);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let outcome = self.attempt(request, sink).await;
        match &outcome {
            FlashOutcome::Done { .. } => {
                sink.emit(
                    FlashPhase::Done,
                    "✅ Upload complete! You may unplug your board now.",
                );
            }
            FlashOutcome::Failed { phase, error } => {
                let mut message = format!("❌ Error during {}: {}", phase, error);
                if let Some(output) = error.captured_output() {
                    if !output.trim().is_empty() {
                        message.push('\n');
                        message.push_str(output.trim_end());
                    }
                }
                sink.emit(FlashPhase::Failed, &message);
            }
        }
        log::debug!("Flash attempt finished in state {:?}", outcome.state());
        Ok(outcome)
    }

    /// Run the attempt on a tokio task, posting events to `tx`.
    ///
    /// The terminal outcome is sent as `AppEvent::FlashFinished` after the
    /// last progress event, and also returned through the handle.
    pub fn spawn(
        self: Arc<Self>,
        request: FlashRequest,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> JoinHandle<Result<()>> {
        tokio::spawn(async move {
            let outcome = self.run(request, &tx).await?;
            let _ = tx.send(AppEvent::FlashFinished(outcome));
            Ok(())
        })
    }

    async fn attempt(&self, request: FlashRequest, sink: &dyn ProgressSink) -> FlashOutcome {
        let mut state = FlashState::Idle;
        let FlashRequest { credentials, port } = request;

        transition(&mut state, FlashState::Validating);
        sink.emit(FlashPhase::Validating, "Validating input...");
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return fail(
                FailedPhase::Validation,
                FlasherError::Validation("Please enter both username and password.".to_string()),
            );
        }
        if port.is_placeholder() {
            return fail(
                FailedPhase::Validation,
                FlasherError::Validation("Please select a port.".to_string()),
            );
        }

        transition(&mut state, FlashState::Staging);
        sink.emit(
            FlashPhase::Staging,
            &format!("Starting flashing process on port {}...", port),
        );
        let workspace = match self.stage(&credentials) {
            Ok(workspace) => workspace,
            Err(e) => return fail(FailedPhase::Staging, e),
        };
        sink.emit(
            FlashPhase::Staging,
            &format!("📁 Staged sketch in {}", workspace.path().display()),
        );

        let result = self.build_and_upload(&mut state, &workspace, &port, sink).await;

        sink.emit(FlashPhase::Cleanup, "🧹 Removing build workspace");
        workspace.cleanup();

        match result {
            Ok(()) => {
                transition(&mut state, FlashState::Done);
                FlashOutcome::Done { port }
            }
            Err((phase, error)) => {
                transition(&mut state, FlashState::Failed(phase));
                FlashOutcome::Failed { phase, error }
            }
        }
    }

    fn stage(&self, credentials: &crate::models::Credentials) -> Result<BuildWorkspace> {
        let template = load_template(&self.template_path)?;
        let rendered = render(&template, &credential_substitutions(credentials));
        match &self.workspace_root {
            Some(root) => BuildWorkspace::stage_in(root, &rendered),
            None => BuildWorkspace::stage(&rendered),
        }
    }

    async fn build_and_upload(
        &self,
        state: &mut FlashState,
        workspace: &BuildWorkspace,
        port: &crate::models::Port,
        sink: &dyn ProgressSink,
    ) -> std::result::Result<(), (FailedPhase, FlasherError)> {
        transition(state, FlashState::Compiling);
        sink.emit(FlashPhase::Compiling, "🛠 Compiling sketch...");
        self.toolchain
            .compile(workspace.path(), self.target)
            .await
            .map_err(|e| (FailedPhase::Compile, e))?;
        sink.emit(FlashPhase::Compiling, "Compilation finished");

        transition(state, FlashState::Uploading);
        sink.emit(FlashPhase::Uploading, &format!("🚀 Uploading to {}...", port));
        self.toolchain
            .upload(workspace.path(), self.target, port)
            .await
            .map_err(|e| (FailedPhase::Upload, e))?;

        Ok(())
    }
}

fn transition(state: &mut FlashState, next: FlashState) {
    log::trace!("Flash state {:?} -> {:?}", state, next);
    *state = next;
}

fn fail(phase: FailedPhase, error: FlasherError) -> FlashOutcome {
    FlashOutcome::Failed { phase, error }
}
