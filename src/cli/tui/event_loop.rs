//! TUI event loop and handling

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::sync::Arc;
use std::{io, time::Duration};
use tokio::sync::mpsc;

use crate::cli::tui::app::{Action, App};
use crate::cli::tui::ui::ui;
use crate::models::{AppEvent, FlashRequest};
use crate::services::{FlashOrchestrator, PortScanner};

/// Run the main TUI event loop
pub async fn run_tui_event_loop(
    mut app: App,
    scanner: PortScanner,
    orchestrator: Arc<FlashOrchestrator>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel();

    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(250));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Initial port load
    if app.begin_scan() {
        spawn_port_scan(scanner.clone(), tx.clone());
    }

    let result = loop {
        if let Err(e) = terminal.draw(|f| ui(f, &app)) {
            break Err(e.into());
        }

        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }

        match event::poll(Duration::from_millis(50)) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => break Err(e.into()),
        }
        let key = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
            Ok(_) => continue,
            Err(e) => break Err(e.into()),
        };

        match app.handle_key(key) {
            Action::None => {}
            Action::Quit => break Ok(()),
            Action::RefreshPorts => spawn_port_scan(scanner.clone(), tx.clone()),
            Action::Flash(request) => spawn_flash(orchestrator.clone(), request, tx.clone()),
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn spawn_port_scan(scanner: PortScanner, tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let ports = scanner.scan(&tx).await;
        let _ = tx.send(AppEvent::PortsScanned(ports));
    });
}

/// Run the attempt off the UI task; report if it ends without an outcome
fn spawn_flash(
    orchestrator: Arc<FlashOrchestrator>,
    request: FlashRequest,
    tx: mpsc::UnboundedSender<AppEvent>,
) {
    let handle = orchestrator.spawn(request, tx.clone());
    tokio::spawn(async move {
        let reason = match handle.await {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(e) => format!("Flash task ended unexpectedly: {}", e),
        };
        log::error!("{}", reason);
        let _ = tx.send(AppEvent::FlashAborted(reason));
    });
}
