use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tuneq_core::{commands::QueueCommand, engine::QueueEngineHandle};

use crate::{
    handlers,
    router::{RouteAction, RouteHandler, Tab},
    state::AppState,
    states::{FilterField, LibraryDialog},
};

/// Library route. When `scoped` it was pushed from the playlists tab and
/// only shows that playlist's tracks.
#[derive(Debug, Clone, Default)]
pub struct LibraryRoute {
    pub scoped: bool,
}

impl LibraryRoute {
    fn handle_dialog(
        &mut self,
        key: KeyCode,
        state: &mut AppState,
        handle: &QueueEngineHandle,
    ) -> anyhow::Result<RouteAction> {
        handlers!(state, handle, key => {
            fn toggle(KeyCode::Up | KeyCode::Down) {
                state.library.dialog_toggle();
            }
            fn confirm(KeyCode::Enter) {
                if let LibraryDialog::Open { track, selected } = &state.library.dialog {
                    let cmd = if *selected == 0 {
                        QueueCommand::PlayNow(track.id.clone())
                    } else {
                        QueueCommand::Enqueue(vec![track.id.clone()])
                    };
                    handle.send(cmd)?;
                }
                state.library.close_dialog();
            }
            fn close(KeyCode::Esc) {
                state.library.close_dialog();
            }
        })
    }

    fn handle_text_edit(&mut self, key: KeyCode, state: &mut AppState) {
        match key {
            KeyCode::Char(c) => state.library.push_char(c),
            KeyCode::Backspace => state.library.pop_char(),
            KeyCode::Enter | KeyCode::Esc => state.library.stop_editing(),
            _ => {}
        }
    }
}

impl RouteHandler for LibraryRoute {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        draw_library_panel(frame, area, state);
    }

    fn handle_input(
        &mut self,
        key: KeyCode,
        state: &mut AppState,
        handle: &QueueEngineHandle,
    ) -> anyhow::Result<RouteAction> {
        if state.library.is_dialog_open() {
            return self.handle_dialog(key, state, handle);
        }
        if state.library.is_editing() {
            self.handle_text_edit(key, state);
            return Ok(RouteAction::None);
        }

        if key == KeyCode::Esc && self.scoped {
            return Ok(RouteAction::Pop);
        }

        handlers!(state, handle, key => {
            fn up(KeyCode::Up) {
                state.library.prev();
            }
            fn down(KeyCode::Down) {
                state.library.next();
            }
            fn open(KeyCode::Enter) {
                state.library.open_dialog();
            }
            fn enqueue_all(KeyCode::Char('a'), |s: &AppState| !s.library.items.is_empty()) {
                handle.send(QueueCommand::Enqueue(state.library.visible_ids()))?;
            }
            fn search(KeyCode::Char('/')) {
                state.library.start_editing(FilterField::Name);
            }
            fn search_artist(KeyCode::Char('s')) {
                state.library.start_editing(FilterField::Artist);
            }
            fn tag(KeyCode::Char('t')) {
                state.library.cycle_tag();
            }
            fn exclude_tag(KeyCode::Char('e')) {
                state.library.cycle_exclude_tag();
            }
            fn reset(KeyCode::Char('f')) {
                state.library.reset_filter();
            }
        })
    }

    fn tab(&self) -> Tab {
        if self.scoped { Tab::Playlists } else { Tab::Library }
    }

    fn name(&self) -> &str {
        if self.scoped { "Playlist Tracks" } else { "Library" }
    }

    fn on_exit(&mut self, state: &mut AppState, _handle: &QueueEngineHandle) -> anyhow::Result<()> {
        if self.scoped {
            state.library.clear_scope();
        }
        Ok(())
    }

    fn can_exit(&self, state: &AppState) -> bool {
        !state.library.is_editing()
    }

    fn help_items(&self, state: &AppState) -> Vec<(&str, &str)> {
        if state.library.is_dialog_open() {
            return vec![("↑/↓", "Choose"), ("Enter", "Confirm"), ("Esc", "Cancel")];
        }
        if let Some(field) = state.library.editing {
            let label = match field {
                FilterField::Name => "Filter by title",
                FilterField::Artist => "Filter by artist",
            };
            return vec![("Type", label), ("Enter/Esc", "Done")];
        }
        let mut items = vec![
            ("↑/↓", "Navigate"),
            ("Enter", "Select"),
            ("A", "Add All"),
            ("/", "Title"),
            ("S", "Artist"),
            ("T", "Tag"),
            ("E", "Exclude"),
            ("F", "Reset"),
        ];
        if self.scoped {
            items.push(("Esc", "Back"));
        }
        items.push(("Q", "Quit"));
        items
    }
}

/// Draw the library panel
pub fn draw_library_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let library = &state.library;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter line
            Constraint::Min(0),    // Tracks
        ])
        .split(area);

    let filter = &library.filter;
    let cursor = |field: FilterField| if library.editing == Some(field) { "_" } else { "" };
    let first_or = |tags: &[String], none: &'static str| {
        tags.first().cloned().unwrap_or_else(|| none.to_string())
    };
    let label = Style::default().fg(Color::Yellow);
    let filter_line = Line::from(vec![
        Span::styled(format!("{}: ", FilterField::Name), label),
        Span::raw(format!("{}{}", filter.name, cursor(FilterField::Name))),
        Span::styled(format!("   {}: ", FilterField::Artist), label),
        Span::raw(format!("{}{}", filter.artist, cursor(FilterField::Artist))),
        Span::styled("   Tag: ", label),
        Span::raw(first_or(filter.include_tags.as_slice(), "any")),
        Span::styled("   Not: ", label),
        Span::raw(first_or(filter.exclude_tags.as_slice(), "none")),
    ]);
    let filter_style = if library.is_editing() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(filter_line).block(
            Block::default()
                .title(" Filter ")
                .borders(Borders::ALL)
                .border_style(filter_style),
        ),
        chunks[0],
    );

    let title = match &library.scope {
        Some(playlist) => format!(" Playlist: {} ({}) ", playlist.name, library.items.len()),
        None => format!(" Library ({}) ", library.items.len()),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = library
        .items
        .iter()
        .map(|track| {
            let mut spans = vec![
                Span::styled("🎵 ", Style::default().fg(Color::White)),
                Span::raw(track.to_string()),
                Span::styled(
                    format!("  {}", track.formatted_duration()),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if !track.metadata.tags.is_empty() {
                spans.push(Span::styled(
                    format!("  [{}]", track.metadata.tags.join(", ")),
                    Style::default().fg(Color::Blue),
                ));
            }
            ListItem::new(Line::from(spans))
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

    let mut list_state = library.list_state.clone();
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}
