//! Board-support package verification and installation

use crate::errors::FlasherError;
use crate::models::{DependencyStatus, FlashPhase, ToolOutput};
use crate::services::progress::ProgressSink;
use crate::services::toolchain::Toolchain;

/// Asks the user before global toolchain configuration is changed
pub trait InstallConsent: Send + Sync {
    /// Return true to add the package index and install `package`
    fn confirm_install(&self, package: &str, index_url: &str) -> bool;
}

/// Consent given up front (e.g. `--yes`)
#[derive(Debug, Clone, Copy)]
pub struct AlwaysConsent;

impl InstallConsent for AlwaysConsent {
    fn confirm_install(&self, _package: &str, _index_url: &str) -> bool {
        true
    }
}

/// Consent never given
#[derive(Debug, Clone, Copy)]
pub struct NeverConsent;

impl InstallConsent for NeverConsent {
    fn confirm_install(&self, _package: &str, _index_url: &str) -> bool {
        false
    }
}

/// Ensures the toolchain has the board-support package installed
#[derive(Debug, Clone)]
pub struct DependencyManager {
    toolchain: Toolchain,
    index_url: String,
}

impl DependencyManager {
    pub fn new(toolchain: Toolchain, index_url: impl Into<String>) -> Self {
        Self {
            toolchain,
            index_url: index_url.into(),
        }
    }

    /// True when `core list` mentions `package`.
    ///
    /// A failed query counts as "not installed"; the install steps will surface
    /// the real problem if the toolchain is unusable.
    pub async fn is_installed(&self, package: &str) -> bool {
        match self.toolchain.core_list().await {
            Ok(output) if output.success() => output.output.contains(package),
            Ok(output) => {
                log::warn!(
                    "core list exited with {:?}: {}",
                    output.exit_code,
                    output.output.trim()
                );
                false
            }
            Err(e) => {
                log::warn!("Installed core query failed: {}", e);
                false
            }
        }
    }

    /// Make sure `package` is installed, asking `consent` before changing anything
    pub async fn ensure(
        &self,
        package: &str,
        consent: &dyn InstallConsent,
        sink: &dyn ProgressSink,
    ) -> DependencyStatus {
        sink.emit(FlashPhase::Dependencies, "🔍 Checking for required cores...");

        if self.is_installed(package).await {
            sink.emit(
                FlashPhase::Dependencies,
                &format!("✅ {} core is installed", package),
            );
            return DependencyStatus::AlreadyInstalled;
        }

        if !consent.confirm_install(package, &self.index_url) {
            log::info!("Installation of {} declined", package);
            sink.emit(
                FlashPhase::Dependencies,
                &format!("{} core installation declined", package),
            );
            return DependencyStatus::Declined;
        }

        sink.emit(
            FlashPhase::Dependencies,
            &format!("⬇️ Installing {} core...", package),
        );

        match self.install(package).await {
            Ok(()) => {
                sink.emit(
                    FlashPhase::Dependencies,
                    &format!("✅ {} core installed.", package),
                );
                DependencyStatus::Installed
            }
            Err(e) => {
                let mut reason = format!("Failed to verify/install {} core: {}", package, e);
                if let Some(output) = e.captured_output() {
                    if !output.trim().is_empty() {
                        reason.push('\n');
                        reason.push_str(output.trim_end());
                    }
                }
                sink.emit(FlashPhase::Dependencies, &format!("❌ {}", reason));
                DependencyStatus::Failed { reason }
            }
        }
    }

    /// Register index, refresh, install; the first failing step aborts the rest
    async fn install(&self, package: &str) -> Result<(), FlasherError> {
        let url = self.index_url.clone();
        check_step("config add", self.toolchain.add_index_url(&url).await)?;
        check_step("core update-index", self.toolchain.update_index().await)?;
        check_step("core install", self.toolchain.install_core(package).await)?;
        Ok(())
    }
}

fn check_step(
    step: &str,
    result: crate::errors::Result<ToolOutput>,
) -> Result<(), FlasherError> {
    let output = match result {
        Ok(output) => output,
        Err(e) => {
            return Err(FlasherError::DependencyInstall {
                step: step.to_string(),
                exit_code: None,
                output: e.to_string(),
            });
        }
    };

    if output.success() {
        log::debug!("{} succeeded", step);
        Ok(())
    } else {
        Err(FlasherError::DependencyInstall {
            step: step.to_string(),
            exit_code: output.exit_code,
            output: output.output,
        })
    }
}
