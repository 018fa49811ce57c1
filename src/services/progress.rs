//! Progress sinks: where orchestrator events go

use std::sync::Mutex;
use tokio::sync::mpsc;

use crate::models::{AppEvent, FlashPhase, ProgressEvent};

/// Append-only destination for progress events
pub trait ProgressSink: Send + Sync {
    fn append(&self, event: ProgressEvent);

    fn emit(&self, phase: FlashPhase, message: &str) {
        self.append(ProgressEvent::new(phase, message));
    }
}

/// Posts events to a presentation adapter over a channel, in emission order
impl ProgressSink for mpsc::UnboundedSender<AppEvent> {
    fn append(&self, event: ProgressEvent) {
        log::info!("{}", event);
        if let Err(e) = self.send(AppEvent::Progress(event)) {
            // Receiver gone: the adapter is shutting down
            log::debug!("Dropped progress event: {}", e);
        }
    }
}

/// Writes events to the log only
#[derive(Debug, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn append(&self, event: ProgressEvent) {
        log::info!("{}", event);
    }
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn phases(&self) -> Vec<FlashPhase> {
        self.events().iter().map(|e| e.phase).collect()
    }

    pub fn count(&self, phase: FlashPhase) -> usize {
        self.events().iter().filter(|e| e.phase == phase).count()
    }
}

impl ProgressSink for RecordingSink {
    fn append(&self, event: ProgressEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
