use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tuneq_core::{commands::QueueCommand, engine::QueueEngineHandle};

use crate::{
    router::{RouteAction, RouteHandler, Tab},
    state::AppState,
};

/// Queue route
#[derive(Debug, Clone)]
pub struct QueueRoute;

impl RouteHandler for QueueRoute {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        draw_queue_panel(frame, area, state);
    }

    fn handle_input(
        &mut self,
        key: KeyCode,
        state: &mut AppState,
        handle: &QueueEngineHandle,
    ) -> anyhow::Result<RouteAction> {
        match key {
            KeyCode::Up => state.queue.prev(),
            KeyCode::Down => state.queue.next(),
            KeyCode::Enter => {
                if let Some(idx) = state.queue.selected() {
                    handle.send(QueueCommand::PlayIndex(idx))?;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(idx) = state.queue.selected() {
                    handle.send(QueueCommand::Remove(idx))?;
                }
            }
            // move the selected upcoming track down / up
            KeyCode::Char('J') => {
                if let Some(from) = state.queue.selected_upcoming() {
                    if from + 1 < state.queue.snapshot.upcoming_len() {
                        handle.send(QueueCommand::Reorder { from, to: from + 1 })?;
                        state.queue.next();
                    }
                }
            }
            KeyCode::Char('K') => {
                if let Some(from) = state.queue.selected_upcoming() {
                    if from > 0 {
                        handle.send(QueueCommand::Reorder { from, to: from - 1 })?;
                        state.queue.prev();
                    }
                }
            }
            _ => {}
        }
        Ok(RouteAction::None)
    }

    fn tab(&self) -> Tab {
        Tab::Queue
    }

    fn name(&self) -> &str {
        "Queue"
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![
            ("↑/↓", "Navigate"),
            ("Enter", "Play"),
            ("D", "Remove"),
            ("Shift+J/K", "Move"),
            ("X", "Shuffle"),
            ("C", "Clear"),
            ("Q", "Quit"),
        ]
    }
}

/// Draw the queue panel
pub fn draw_queue_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let snapshot = &state.queue.snapshot;
    let title = format!(" Queue ({} tracks) ", snapshot.items.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = snapshot
        .items
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let (prefix, style) = match snapshot.pointer {
                Some(p) if p == i => (
                    "▶ ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Some(p) if i < p => ("  ", Style::default().fg(Color::DarkGray)),
                _ => ("  ", Style::default().fg(Color::White)),
            };
            ListItem::new(format!(
                "{}{:>3}. {}  ({})",
                prefix,
                i + 1,
                track,
                track.formatted_duration()
            ))
            .style(style)
        })
        .collect();

    if items.is_empty() {
        let empty_msg = Paragraph::new("Queue is empty. Add tracks from the Library.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty_msg, area);
    } else {
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = state.queue.list_state.clone();
        f.render_stateful_widget(list, area, &mut list_state);
    }
}
