use anyhow::{Result, anyhow};

use crate::cli::commands::ConsoleSink;
use crate::cli::commands::deps::ensure_dependencies;
use crate::cli::context::AppContext;
use crate::models::{Credentials, DependencyStatus, FlashOutcome, FlashRequest, Port};
use crate::services::LogSink;

pub async fn execute_flash_command(
    ctx: &AppContext,
    username: &str,
    password: &str,
    port: Option<String>,
    yes: bool,
) -> Result<()> {
    println!("⚡ keyflash - flashing {}", ctx.target);

    if ensure_dependencies(ctx, yes).await? == DependencyStatus::Declined {
        println!("Core installation declined, nothing to do.");
        return Ok(());
    }

    let port = match port {
        Some(port) => Port::new(port.trim()),
        None => {
            let ports = ctx.port_scanner().scan(&LogSink).await;
            let first = ports.first().clone();
            if !first.is_placeholder() {
                println!("🔌 Using port {}", first);
            }
            first
        }
    };

    let request = FlashRequest::new(Credentials::new(username, password), port);
    let outcome = ctx
        .orchestrator()
        .run(request, &ConsoleSink::default())
        .await?;

    match outcome {
        FlashOutcome::Done { .. } => {
            println!("🎉 Flashing complete!");
            Ok(())
        }
        FlashOutcome::Failed { phase, error } => {
            Err(anyhow!("Flashing failed during {}: {}", phase, error))
        }
    }
}
