use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};
use tuneq_core::engine::QueueEngineHandle;

use crate::{
    router::{RouteAction, RouteHandler, Tab},
    state::AppState,
    states::TransportState,
};

/// Seconds skipped by the seek keys
const SEEK_STEP: f32 = 5.0;

/// How many upcoming tracks the playback panel previews
const UP_NEXT_PREVIEW: usize = 5;

// ==================================================================
// Playback Route Implementation
// ==================================================================

#[derive(Debug, Clone)]
pub struct PlaybackRoute;

impl RouteHandler for PlaybackRoute {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        draw_playback_panel(frame, area, state);
    }

    fn handle_input(
        &mut self,
        key: KeyCode,
        state: &mut AppState,
        _handle: &QueueEngineHandle,
    ) -> anyhow::Result<RouteAction> {
        match key {
            KeyCode::Right => state.transport.seek(SEEK_STEP),
            KeyCode::Left => state.transport.seek(-SEEK_STEP),
            _ => {}
        }
        Ok(RouteAction::None)
    }

    fn tab(&self) -> Tab {
        Tab::Playback
    }

    fn name(&self) -> &str {
        "Playback"
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![
            ("Space", "Play/Pause"),
            ("N/P", "Next/Prev"),
            ("R", "Repeat"),
            ("←/→", "Seek"),
            ("Tab", "Switch Tab"),
            ("Q", "Quit"),
        ]
    }
}

/// Draw the playback panel
pub fn draw_playback_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Now playing info
            Constraint::Length(3), // Progress bar
            Constraint::Min(0),    // Up next
        ])
        .split(area);

    draw_now_playing(f, chunks[0], state);
    draw_progress(f, chunks[1], state);
    draw_up_next(f, chunks[2], state);
}

/// Draw the now playing section
fn draw_now_playing(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" 🎵 Now Playing ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(ref track) = state.now_playing {
        let meta = &track.metadata;
        let details = [
            meta.genre.clone(),
            meta.mood.clone(),
            meta.release_year.map(|y| y.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");

        let text = vec![
            Line::from(vec![Span::styled(
                track.title.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![Span::styled(
                track.artist.as_str(),
                Style::default().fg(Color::Gray),
            )]),
            Line::from(vec![Span::styled(
                details,
                Style::default().fg(Color::DarkGray),
            )]),
        ];

        f.render_widget(Paragraph::new(text), inner);
    } else {
        let text = Paragraph::new("Nothing playing").style(Style::default().fg(Color::DarkGray));
        f.render_widget(text, inner);
    }
}

/// Draw the progress bar
fn draw_progress(f: &mut Frame, area: Rect, state: &AppState) {
    let transport = &state.transport;
    let progress_pct = (transport.progress() * 100.0) as u16;
    let duration_str = if transport.duration > 0.0 {
        TransportState::format_time(transport.duration)
    } else {
        "--:--".to_string()
    };

    let label = format!(
        "{} / {}",
        TransportState::format_time(transport.position),
        duration_str
    );

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .percent(progress_pct.min(100))
        .label(label);

    f.render_widget(gauge, area);
}

fn draw_up_next(f: &mut Frame, area: Rect, state: &AppState) {
    let snapshot = &state.queue.snapshot;
    let start = snapshot.pointer.map_or(0, |p| p + 1);

    let items: Vec<ListItem> = snapshot
        .items
        .iter()
        .skip(start)
        .take(UP_NEXT_PREVIEW)
        .map(|t| ListItem::new(format!("  {}  ({})", t, t.formatted_duration())))
        .collect();

    let title = format!(" Up Next ({}) ", snapshot.upcoming_len());
    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(list, area);
}
