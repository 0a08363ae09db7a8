use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use strum::IntoEnumIterator;

use crate::{
    router::{Router, Tab},
    state::AppState,
    states::LibraryDialog,
};

/// Draw the TUI interface
pub fn draw(f: &mut Frame, state: &AppState, router: &Router) {
    // Main horizontal split: Sidebar (left) and Main Content (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Length(15), // Sidebar navigation
            Constraint::Min(40),    // Main content area
        ])
        .split(f.area());

    draw_sidebar(f, main_chunks[0], router.current().tab());
    draw_main_content(f, main_chunks[1], state, router);

    if state.library.is_dialog_open() {
        draw_library_dialog(f, f.area(), state);
    }
}

/// Draw the sidebar navigation
fn draw_sidebar(f: &mut Frame, area: Rect, active: Tab) {
    let block = Block::default()
        .title(" Navigation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let nav_text: Vec<Line> = Tab::iter()
        .map(|tab| {
            let is_active = active == tab;
            let prefix = if is_active { "▶ " } else { "  " };
            let style = if is_active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!("{}{}", prefix, tab), style))
        })
        .collect();

    f.render_widget(Paragraph::new(nav_text), inner);
}

fn draw_main_content(f: &mut Frame, area: Rect, state: &AppState, router: &Router) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Route content
            Constraint::Length(3), // Controls info
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    router.current().render(f, chunks[0], state);

    draw_controls(f, chunks[1], state, router);
    draw_status(f, chunks[2], state);
}

/// Draw the controls help section from the current route
fn draw_controls(f: &mut Frame, area: Rect, state: &AppState, router: &Router) {
    let mut spans = Vec::new();
    for (key, label) in router.current().help_items(state) {
        let color = match key {
            "Q" => Color::Red,
            "Tab" | "Esc" => Color::Magenta,
            _ => Color::Yellow,
        };
        spans.push(Span::styled(format!("[{}]", key), Style::default().fg(color)));
        spans.push(Span::raw(format!(" {}  ", label)));
    }

    let title = if router.depth() > 1 {
        format!(" Controls: {} ", router.breadcrumbs().join(" › "))
    } else {
        " Controls ".to_string()
    };

    let paragraph =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

/// Draw the status section
fn draw_status(f: &mut Frame, area: Rect, state: &AppState) {
    let status_style = if state.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if state.transport.is_playing {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let snapshot = &state.queue.snapshot;
    let repeat_icon = if snapshot.repeat { "🔁 On" } else { "➡️ Off" };
    let status_text = format!(
        "{}  |  Repeat: {}  |  Queue: {}  |  {}",
        state.status_message,
        repeat_icon,
        snapshot.items.len(),
        snapshot.status()
    );

    let paragraph = Paragraph::new(status_text)
        .style(status_style)
        .block(Block::default().borders(Borders::ALL).title(" Status "));

    f.render_widget(paragraph, area);
}

/// Draw the play-now / add-to-queue dialog overlay
fn draw_library_dialog(f: &mut Frame, area: Rect, state: &AppState) {
    if let LibraryDialog::Open { track, selected } = &state.library.dialog {
        let dialog_width = 40.min(area.width);
        let dialog_height = 6.min(area.height);
        let x = (area.width.saturating_sub(dialog_width)) / 2;
        let y = (area.height.saturating_sub(dialog_height)) / 2;
        let dialog_area = Rect::new(x, y, dialog_width, dialog_height);

        // Clear the area behind dialog
        f.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(" {} ", track.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        let inner = block.inner(dialog_area);
        f.render_widget(block, dialog_area);

        let options = [
            ("▶ Play Now", *selected == 0),
            ("+ Add to Queue", *selected == 1),
        ];

        let text: Vec<Line> = options
            .iter()
            .map(|(label, is_selected)| {
                let style = if *is_selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let prefix = if *is_selected { "> " } else { "  " };
                Line::from(Span::styled(format!("{}{}", prefix, label), style))
            })
            .collect();

        f.render_widget(Paragraph::new(text), inner);
    }
}
