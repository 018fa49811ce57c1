//! CLI command implementations

pub mod deps;
pub mod flash;
pub mod ports;

use crate::cli::args::Commands;
use crate::cli::context::AppContext;
use crate::models::ProgressEvent;
use crate::services::ProgressSink;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute_command(command: Commands, ctx: &AppContext) -> Result<()> {
    match command {
        Commands::Ports { json } => ports::execute_ports_command(ctx, json).await,
        Commands::Deps { yes } => deps::execute_deps_command(ctx, yes).await,
        Commands::Flash {
            username,
            password,
            port,
            yes,
        } => flash::execute_flash_command(ctx, &username, &password, port, yes).await,
    }
}

/// Prints progress events to stdout as they arrive
#[derive(Debug, Default)]
pub struct ConsoleSink {
    /// Also print the phase name in front of each message
    pub show_phase: bool,
}

impl ProgressSink for ConsoleSink {
    fn append(&self, event: ProgressEvent) {
        log::debug!("{}", event);
        if self.show_phase {
            println!("{}", event);
        } else {
            println!("{}", event.message);
        }
    }
}
