//! TUI rendering logic

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::cli::tui::app::{App, Field};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_input(f, chunks[0], "Username", &app.username, app.focus == Field::Username);
    let masked = "*".repeat(app.password.chars().count());
    render_input(f, chunks[1], "Password", &masked, app.focus == Field::Password);
    render_ports(f, chunks[2], app);
    render_flash_button(f, chunks[3], app);
    render_log(f, chunks[4], app);

    let help = Paragraph::new(
        "Tab: next field | ↑↓: select port | F5/r: refresh | Ctrl+F/Enter: flash | Esc: quit",
    )
    .style(Style::default().fg(Color::Gray));
    f.render_widget(help, chunks[5]);

    if let Some(modal) = &app.modal {
        let area = centered_rect(60, 30, f.area());
        let color = if modal.success { Color::Green } else { Color::Red };
        let text: Vec<Line> = modal
            .message
            .lines()
            .map(|l| Line::from(l.to_string()))
            .chain([
                Line::from(""),
                Line::from(Span::styled(
                    "Press Enter to continue",
                    Style::default().fg(Color::Gray),
                )),
            ])
            .collect();
        let popup = Paragraph::new(text)
            .block(
                Block::default()
                    .title(modal.title.clone())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(Clear, area);
        f.render_widget(popup, area);
    }
}

fn focused_block(title: &str, focused: bool) -> Block<'_> {
    let block = Block::default().title(title).borders(Borders::ALL);
    if focused {
        block.border_style(Style::default().fg(Color::Cyan))
    } else {
        block
    }
}

fn render_input(f: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let cursor = if focused { "▏" } else { "" };
    let input = Paragraph::new(format!("{}{}", value, cursor)).block(focused_block(title, focused));
    f.render_widget(input, area);
}

fn render_ports(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .ports
        .iter()
        .map(|port| {
            let style = if port.is_placeholder() {
                Style::default().fg(Color::Gray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw("🔌 "),
                Span::styled(port.to_string(), style),
            ]))
        })
        .collect();

    let title = if app.scanning {
        "Select Port 🔄"
    } else {
        "Select Port"
    };
    let list = List::new(items)
        .block(focused_block(title, app.focus == Field::Ports))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(Some(app.selected_port));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_flash_button(f: &mut Frame, area: Rect, app: &App) {
    let (label, style) = if app.flashing {
        (
            "⏳ Flashing...",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )
    } else {
        (
            "Flash to RP2040 (Ctrl+F)",
            Style::default()
                .fg(Color::White)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    };
    let button = Paragraph::new(label)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, area);
}

fn render_log(f: &mut Frame, area: Rect, app: &App) {
    // Keep the tail visible
    let visible = area.height.saturating_sub(2) as usize;
    let start = app.log.len().saturating_sub(visible);
    let lines: Vec<Line> = app.log[start..]
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();
    let log = Paragraph::new(lines)
        .block(Block::default().title("Log").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(log, area);
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
