use anyhow::{Context, Result};

use crate::cli::context::AppContext;
use crate::services::LogSink;

pub async fn execute_ports_command(ctx: &AppContext, json: bool) -> Result<()> {
    let ports = ctx.port_scanner().scan(&LogSink).await;

    if json {
        let out = serde_json::to_string_pretty(&ports).context("Failed to encode port list")?;
        println!("{}", out);
        return Ok(());
    }

    if ports.is_empty_scan() {
        println!("⚠️  {}", ports.first());
        println!("   Connect the board via USB and run `keyflash ports` again.");
        return Ok(());
    }

    println!("📡 Detected ports:");
    for (index, port) in ports.iter().enumerate() {
        let marker = if index == 0 { " (default)" } else { "" };
        println!("  🔌 {}{}", port, marker);
    }
    Ok(())
}
