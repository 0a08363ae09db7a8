use tuneq_core::{Catalog, Track, commands::QueueResponse};

use crate::states::{LibraryState, PlaylistsState, QueueState, TransportState};

/// Application state for the TUI
pub struct AppState {
    pub transport: TransportState,
    /// Track the engine reports as current
    pub now_playing: Option<Track>,
    pub queue: QueueState,
    pub library: LibraryState,
    pub playlists: PlaylistsState,
    /// Status message to display
    pub status_message: String,
    /// Error message if any
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        let playlists = PlaylistsState::new(catalog.playlists().to_vec());
        Self {
            transport: TransportState::new(),
            now_playing: None,
            queue: QueueState::new(),
            library: LibraryState::new(catalog),
            playlists,
            status_message: "Queue is empty. Add tracks from the Library.".to_string(),
            error_message: None,
        }
    }

    /// Handle response from the queue engine
    pub fn handle_response(&mut self, response: QueueResponse) {
        self.error_message = None;

        match response {
            QueueResponse::QueueUpdated(snapshot) => {
                if let (Some(current), Some(loaded)) =
                    (snapshot.current(), self.transport.track_id.as_deref())
                {
                    if current.id == loaded {
                        if let Some(seconds) = current.metadata.duration {
                            self.transport.set_duration(seconds);
                        }
                    }
                }
                self.library.absorb_durations(&snapshot.items);
                self.queue.update(snapshot);
            }
            QueueResponse::TrackChanged { index, track } => {
                self.transport.load(&track);
                self.queue.list_state.select(Some(index));
                self.status_message = format!(
                    "Track {}/{}: {}",
                    index + 1,
                    self.queue.len().max(index + 1),
                    track
                );
                self.now_playing = Some(track);
            }
            QueueResponse::Stopped => {
                // keep the finished track loaded only if it is still current
                let still_current = match (self.queue.snapshot.current(), &self.transport.track_id) {
                    (Some(current), Some(loaded)) => current.id == *loaded,
                    _ => false,
                };
                if still_current {
                    self.transport.pause();
                } else {
                    self.transport.stop();
                    self.now_playing = None;
                }
                self.status_message = "Stopped".to_string();
            }
            QueueResponse::RepeatChanged(repeat) => {
                self.status_message = format!("Repeat {}", if repeat { "on" } else { "off" });
            }
            QueueResponse::Error(msg) => {
                self.status_message = format!("Error: {}", msg);
                self.error_message = Some(msg);
            }
            QueueResponse::Shutdown => {
                self.status_message = "Engine shutdown".to_string();
            }
        }
    }

    /// Whether keystrokes should skip the global bindings
    pub fn captures_input(&self) -> bool {
        self.library.is_dialog_open() || self.library.is_editing()
    }
}
