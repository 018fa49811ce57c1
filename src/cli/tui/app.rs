//! TUI application state and input handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::{AppEvent, Credentials, FlashOutcome, FlashRequest, Port, PortList};

/// Maximum number of log lines kept in memory
const LOG_CAPACITY: usize = 2000;

/// Input field that currently has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
    Ports,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Username => Field::Password,
            Field::Password => Field::Ports,
            Field::Ports => Field::Username,
        }
    }

    fn previous(self) -> Self {
        match self {
            Field::Username => Field::Ports,
            Field::Password => Field::Username,
            Field::Ports => Field::Password,
        }
    }
}

/// Blocking notification that must be dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub message: String,
    pub success: bool,
}

/// What the event loop should do after a key press
#[derive(Debug)]
pub enum Action {
    None,
    Quit,
    RefreshPorts,
    Flash(FlashRequest),
}

pub struct App {
    pub username: String,
    pub password: String,
    pub ports: PortList,
    pub selected_port: usize,
    pub focus: Field,
    pub log: Vec<String>,
    pub flashing: bool,
    pub scanning: bool,
    pub modal: Option<Modal>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            ports: PortList::default(),
            selected_port: 0,
            focus: Field::Username,
            log: Vec::new(),
            flashing: false,
            scanning: false,
            modal: None,
        }
    }

    pub fn selected_port(&self) -> &Port {
        self.ports
            .ports()
            .get(self.selected_port)
            .unwrap_or_else(|| self.ports.first())
    }

    pub fn push_log(&mut self, message: &str) {
        for line in message.lines() {
            self.log.push(line.to_string());
        }
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(..excess);
        }
    }

    /// Mark a port scan as started; false if one is already running
    pub fn begin_scan(&mut self) -> bool {
        if self.scanning {
            return false;
        }
        self.scanning = true;
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.modal.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.modal = None;
            }
            return Action::None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return Action::Quit,
            KeyCode::Esc => return Action::Quit,
            KeyCode::Char('f') if ctrl => return self.request_flash(),
            KeyCode::F(5) => return self.request_refresh(),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return Action::None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return Action::None;
            }
            _ => {}
        }

        match self.focus {
            Field::Username | Field::Password => {
                let field = if self.focus == Field::Username {
                    &mut self.username
                } else {
                    &mut self.password
                };
                match key.code {
                    KeyCode::Char(c) if !ctrl => field.push(c),
                    KeyCode::Backspace => {
                        field.pop();
                    }
                    KeyCode::Enter => self.focus = self.focus.next(),
                    _ => {}
                }
                Action::None
            }
            Field::Ports => match key.code {
                KeyCode::Up => {
                    self.selected_port = self.selected_port.saturating_sub(1);
                    Action::None
                }
                KeyCode::Down => {
                    if self.selected_port + 1 < self.ports.len() {
                        self.selected_port += 1;
                    }
                    Action::None
                }
                KeyCode::Char('r') => self.request_refresh(),
                KeyCode::Enter => self.request_flash(),
                _ => Action::None,
            },
        }
    }

    fn request_refresh(&mut self) -> Action {
        if self.begin_scan() {
            Action::RefreshPorts
        } else {
            Action::None
        }
    }

    /// Build a flash request unless one is already running
    fn request_flash(&mut self) -> Action {
        if self.flashing {
            self.push_log("⏳ A flash attempt is already in progress");
            return Action::None;
        }
        self.flashing = true;
        self.push_log("────────────────────────────");
        Action::Flash(FlashRequest::new(
            Credentials::new(&self.username, &self.password),
            self.selected_port().clone(),
        ))
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Progress(event) => self.push_log(&event.message),
            AppEvent::PortsScanned(ports) => {
                self.ports = ports;
                self.selected_port = 0;
                self.scanning = false;
            }
            AppEvent::FlashFinished(outcome) => {
                self.flashing = false;
                self.modal = Some(outcome_modal(&outcome));
            }
            AppEvent::FlashAborted(reason) => {
                self.flashing = false;
                self.push_log(&format!("❌ {}", reason));
                self.modal = Some(Modal {
                    title: "Flashing Error".to_string(),
                    message: reason,
                    success: false,
                });
            }
            AppEvent::Tick => {}
        }
    }
}

fn outcome_modal(outcome: &FlashOutcome) -> Modal {
    match outcome {
        FlashOutcome::Done { port } => Modal {
            title: "Success".to_string(),
            message: format!("Flashing to {} complete! You may unplug your board now.", port),
            success: true,
        },
        FlashOutcome::Failed { phase, error } => Modal {
            title: "Flashing Error".to_string(),
            message: format!(
                "The attempt failed during {}: {}\nCheck the log for details.",
                phase, error
            ),
            success: false,
        },
    }
}
