use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};

use tuneq_core::{
    Catalog, PlaybackQueue,
    commands::QueueCommand,
    engine::{QueueEngine, QueueEngineHandle},
};

mod args;
mod macros;
mod router;
mod routes;
mod state;
mod states;
mod ui;

use args::Args;
use router::Router;
use routes::playback::PlaybackRoute;
use state::AppState;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print {
        tuneq_core::init_logger();
        let catalog = load_catalog(&args)?;
        return print_queue(&catalog, args.playlist.as_deref());
    }

    // Initialize tui_logger for TUI log display
    tui_logger::init_logger(log::LevelFilter::Debug)?;
    tui_logger::set_default_level(log::LevelFilter::Debug);

    log::info!("Starting tuneq");

    let catalog = load_catalog(&args)?;
    let state = AppState::new(catalog.clone());

    // Create queue engine and get communication handle
    let (engine, handle) = QueueEngine::new(catalog, args.engine_config());
    let engine_thread = engine.spawn()?;

    if let Some(playlist) = &args.playlist {
        handle.send(QueueCommand::EnqueuePlaylist(playlist.clone()))?;
    }

    let result = run_tui(state, &handle);

    // Ensure clean shutdown
    let _ = handle.send(QueueCommand::Quit);
    if engine_thread.join().is_err() {
        log::error!("Queue engine thread panicked");
    }

    result
}

fn load_catalog(args: &Args) -> anyhow::Result<Catalog> {
    Catalog::load(&args.library)
        .with_context(|| format!("failed to load library {}", args.library.display()))
}

/// Build the startup queue without the engine and print it
fn print_queue(catalog: &Catalog, playlist: Option<&str>) -> anyhow::Result<()> {
    let mut queue = PlaybackQueue::new();
    match playlist {
        Some(id) => {
            let playlist = catalog
                .playlist(id)
                .with_context(|| format!("unknown playlist {}", id))?;
            queue.enqueue_playlist(playlist, catalog);
        }
        None => {
            queue.enqueue(catalog.tracks().iter().cloned());
        }
    }

    for (i, track) in queue.items().iter().enumerate() {
        let marker = if queue.pointer() == Some(i) { "▶" } else { " " };
        println!(
            "{} {:>3}. {}  ({})",
            marker,
            i + 1,
            track,
            track.formatted_duration()
        );
    }
    println!("{} tracks, {}", queue.len(), queue.status());
    Ok(())
}

fn run_tui(mut state: AppState, handle: &QueueEngineHandle) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut router = Router::new(Box::new(PlaybackRoute));

    let result = event_loop(&mut terminal, &mut state, handle, &mut router);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut ratatui::Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    handle: &QueueEngineHandle,
    router: &mut Router,
) -> anyhow::Result<()> {
    loop {
        // Handle queue engine responses
        while let Ok(response) = handle.resp_rx.try_recv() {
            state.handle_response(response);
        }

        if state.transport.tick(Instant::now()) {
            log::debug!("Track finished playing");
            handle.send(QueueCommand::TrackEnded)?;
        }

        // Draw UI
        terminal.draw(|f| ui::draw(f, state, router))?;

        // Handle input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let should_quit = handle_global_keys(key.code, state, handle, router)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Handle global keys and delegate route-specific input to router
fn handle_global_keys(
    key: KeyCode,
    state: &mut AppState,
    handle: &QueueEngineHandle,
    router: &mut Router,
) -> anyhow::Result<bool> {
    // Dialogs and text entry get every key
    if !state.captures_input() {
        let cmd = match key {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char(' ') => {
                state.transport.toggle();
                return Ok(false);
            }
            KeyCode::Char('n') => Some(QueueCommand::Next),
            KeyCode::Char('p') => Some(QueueCommand::Previous),
            KeyCode::Char('r') => Some(QueueCommand::ToggleRepeat),
            KeyCode::Char('x') => Some(QueueCommand::Shuffle),
            KeyCode::Char('c') => Some(QueueCommand::Clear),
            KeyCode::Tab => {
                let next = router.current().tab().next();
                router.switch_tab(next, state, handle)?;
                return Ok(false);
            }
            KeyCode::Esc if router.depth() > 1 => {
                router.pop(state, handle)?;
                return Ok(false);
            }
            _ => None,
        };
        if let Some(cmd) = cmd {
            handle.send(cmd)?;
            return Ok(false);
        }
    }

    // Delegate to the current route's input handler
    let action = router.current_mut().handle_input(key, state, handle)?;
    router.execute_action(action, state, handle)?;
    Ok(false)
}

#[cfg(test)]
mod tests {
    use tuneq_core::{Playlist, Track};

    use super::*;
    use crate::router::{Tab, route_for_tab};

    #[test]
    fn tab_cycle_reaches_every_tab() {
        let mut tab = Tab::Playback;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(route_for_tab(tab).name().to_string());
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Playback);
        assert_eq!(seen, ["Playback", "Queue", "Library", "Playlists", "Log"]);
    }

    #[test]
    fn print_rejects_unknown_playlist() {
        let catalog = Catalog::new(
            vec![Track::new("1", "One", "A")],
            vec![Playlist::new("p", "P", ["1"])],
        );
        assert!(print_queue(&catalog, Some("p")).is_ok());
        assert!(print_queue(&catalog, Some("missing")).is_err());
    }
}
