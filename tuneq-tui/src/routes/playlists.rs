use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tuneq_core::{commands::QueueCommand, engine::QueueEngineHandle};

use crate::{
    router::{RouteAction, RouteHandler, Tab},
    routes::library::LibraryRoute,
    state::AppState,
};

#[derive(Debug, Clone)]
pub struct PlaylistsRoute;

impl RouteHandler for PlaylistsRoute {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        draw_playlists_panel(frame, area, state);
    }

    fn handle_input(
        &mut self,
        key: KeyCode,
        state: &mut AppState,
        handle: &QueueEngineHandle,
    ) -> anyhow::Result<RouteAction> {
        match key {
            KeyCode::Up => state.playlists.prev(),
            KeyCode::Down => state.playlists.next(),
            KeyCode::Enter => {
                if let Some(playlist) = state.playlists.selected() {
                    log::info!("Queueing playlist {:?}", playlist.name);
                    handle.send(QueueCommand::EnqueuePlaylist(playlist.id.clone()))?;
                }
            }
            KeyCode::Char('o') => {
                if let Some(playlist) = state.playlists.selected().cloned() {
                    state.library.restrict_to(playlist);
                    return Ok(RouteAction::Push(Box::new(LibraryRoute { scoped: true })));
                }
            }
            _ => {}
        }
        Ok(RouteAction::None)
    }

    fn tab(&self) -> Tab {
        Tab::Playlists
    }

    fn name(&self) -> &str {
        "Playlists"
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![
            ("↑/↓", "Navigate"),
            ("Enter", "Queue Playlist"),
            ("O", "Open"),
            ("Tab", "Switch Tab"),
            ("Q", "Quit"),
        ]
    }
}

pub fn draw_playlists_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!(" Playlists ({}) ", state.playlists.items.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if state.playlists.items.is_empty() {
        let empty_msg = Paragraph::new("No playlists in this library.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty_msg, area);
        return;
    }

    let items: Vec<ListItem> = state
        .playlists
        .items
        .iter()
        .map(|playlist| {
            ListItem::new(Line::from(vec![
                Span::styled("📁 ", Style::default().fg(Color::Blue)),
                Span::raw(playlist.name.as_str()),
                Span::styled(
                    format!("  {} tracks", playlist.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut list_state = state.playlists.list_state.clone();
    f.render_stateful_widget(list, area, &mut list_state);
}
