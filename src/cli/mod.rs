//! Command Line Interface module
//!
//! Thin presentation adapters over the flashing core: one-shot commands and
//! an interactive Terminal User Interface (TUI).

pub mod args;
pub mod commands;
pub mod consent;
pub mod context;
pub mod tui;

pub use args::*;

use anyhow::Result;

use crate::models::DependencyStatus;
use crate::utils::logging::init_cli_logging;
use context::AppContext;

/// Main CLI application runner
pub async fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let (ctx, default_level) = AppContext::load(&cli)?;
    let tui_mode = cli.command.is_none();
    init_cli_logging(cli.verbose, cli.quiet, tui_mode, default_level)?;

    match &cli.command {
        Some(command) => commands::execute_command(command.clone(), &ctx).await,
        None => {
            // Cores first, then the UI
            match commands::deps::ensure_dependencies(&ctx, false).await? {
                DependencyStatus::Declined => {
                    println!("Core installation declined, exiting.");
                    Ok(())
                }
                _ => tui::run_tui(&ctx).await,
            }
        }
    }
}
