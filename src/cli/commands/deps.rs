use anyhow::{Result, anyhow};

use crate::cli::commands::ConsoleSink;
use crate::cli::consent::TerminalConsent;
use crate::cli::context::AppContext;
use crate::models::DependencyStatus;
use crate::services::{AlwaysConsent, InstallConsent};

pub async fn execute_deps_command(ctx: &AppContext, yes: bool) -> Result<()> {
    match ensure_dependencies(ctx, yes).await? {
        DependencyStatus::Declined => {
            println!("Nothing was installed.");
        }
        _ => {
            println!("🎉 Toolchain is ready for {}", ctx.target);
        }
    }
    Ok(())
}

/// Ensure the board core is installed.
///
/// `Declined` is returned as a value so callers can exit cleanly; a failed
/// install becomes an error carrying the captured toolchain output.
pub async fn ensure_dependencies(ctx: &AppContext, yes: bool) -> Result<DependencyStatus> {
    let consent: &dyn InstallConsent = if yes {
        &AlwaysConsent
    } else {
        &TerminalConsent
    };

    let status = ctx
        .dependency_manager()
        .ensure(&ctx.target.package(), consent, &ConsoleSink::default())
        .await;

    match status {
        DependencyStatus::Failed { reason } => Err(anyhow!(reason)),
        other => Ok(other),
    }
}
