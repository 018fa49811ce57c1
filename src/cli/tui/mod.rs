//! Terminal User Interface components

pub mod app;
pub mod event_loop;
pub mod ui;


use crate::cli::context::AppContext;
use anyhow::Result;

/// Run the Terminal User Interface
pub async fn run_tui(ctx: &AppContext) -> Result<()> {
    let app = app::App::new();
    event_loop::run_tui_event_loop(app, ctx.port_scanner(), ctx.orchestrator()).await
}
