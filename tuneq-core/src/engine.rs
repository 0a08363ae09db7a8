use std::collections::HashSet;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, select, unbounded};

use crate::catalog::{Catalog, TrackLookup};
use crate::commands::{QueueCommand, QueueResponse, QueueSnapshot};
use crate::config::EngineConfig;
use crate::error::{QueueError, Result};
use crate::probe::probe_duration;
use crate::queue::PlaybackQueue;

/// Upper bound on how long the loop sleeps with nothing scheduled
const IDLE_WAIT: Duration = Duration::from_millis(500);

/// Frontend side of the engine channels
#[derive(Debug, Clone)]
pub struct QueueEngineHandle {
    pub cmd_tx: Sender<QueueCommand>,
    pub resp_rx: Receiver<QueueResponse>,
}

impl QueueEngineHandle {
    pub fn send(&self, cmd: QueueCommand) -> Result<()> {
        self.cmd_tx.send(cmd).map_err(|_| QueueError::EngineGone)
    }
}

enum Event {
    Command(QueueCommand),
    Probed { id: String, seconds: u32 },
    Tick,
    Disconnected,
}

/// Owns the queue and the catalog, applies commands in arrival order
pub struct QueueEngine {
    queue: PlaybackQueue,
    catalog: Catalog,
    config: EngineConfig,
    cmd_rx: Receiver<QueueCommand>,
    resp_tx: Sender<QueueResponse>,
    probe_tx: Sender<(String, u32)>,
    probe_rx: Receiver<(String, u32)>,
    /// Deadline of the auto-advance scheduled by `TrackEnded`
    pending_advance: Option<Instant>,
    probing: HashSet<String>,
}

impl QueueEngine {
    pub fn new(catalog: Catalog, config: EngineConfig) -> (Self, QueueEngineHandle) {
        let (cmd_tx, cmd_rx) = unbounded();
        let (resp_tx, resp_rx) = unbounded();
        let (probe_tx, probe_rx) = unbounded();

        let mut queue = PlaybackQueue::new();
        queue.set_repeat(config.repeat);

        let engine = Self {
            queue,
            catalog,
            config,
            cmd_rx,
            resp_tx,
            probe_tx,
            probe_rx,
            pending_advance: None,
            probing: HashSet::new(),
        };
        (engine, QueueEngineHandle { cmd_tx, resp_rx })
    }

    /// Run the engine on a dedicated thread
    pub fn spawn(self) -> std::io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("queue-engine".to_string())
            .spawn(move || self.run())
    }

    pub fn run(mut self) {
        log::info!(
            "Queue engine started ({} tracks in catalog)",
            self.catalog.tracks().len()
        );

        loop {
            match self.next_event() {
                Event::Command(QueueCommand::Quit) | Event::Disconnected => break,
                Event::Command(cmd) => self.handle_command(cmd),
                Event::Probed { id, seconds } => {
                    self.handle_command(QueueCommand::SetDuration { id, seconds })
                }
                Event::Tick => {}
            }
            self.fire_pending_advance();
        }

        log::info!("Queue engine shutting down");
        self.send(QueueResponse::Shutdown);
    }

    fn next_event(&self) -> Event {
        let wait = match self.pending_advance {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => IDLE_WAIT,
        };

        select! {
            recv(self.cmd_rx) -> msg => match msg {
                Ok(cmd) => Event::Command(cmd),
                Err(_) => Event::Disconnected,
            },
            recv(self.probe_rx) -> msg => match msg {
                Ok((id, seconds)) => Event::Probed { id, seconds },
                Err(_) => Event::Tick,
            },
            default(wait) => Event::Tick,
        }
    }

    fn handle_command(&mut self, cmd: QueueCommand) {
        log::debug!("Queue command: {:?}", cmd);
        let had_current = self.queue.pointer().is_some();

        match cmd {
            QueueCommand::Enqueue(ids) => {
                let tracks: Vec<_> = ids
                    .iter()
                    .filter_map(|id| {
                        let track = self.catalog.resolve(id);
                        if track.is_none() {
                            log::debug!("Skipping unknown track {}", id);
                        }
                        track
                    })
                    .collect();
                let len = self.queue.enqueue(tracks);
                log::info!("Queue now holds {} tracks", len);
                self.publish(!had_current && self.queue.pointer().is_some());
            }
            QueueCommand::EnqueuePlaylist(id) => match self.catalog.playlist(&id).cloned() {
                Some(playlist) => {
                    self.queue.enqueue_playlist(&playlist, &self.catalog);
                    self.publish(!had_current && self.queue.pointer().is_some());
                }
                None => self.report(QueueError::UnknownPlaylist(id)),
            },
            QueueCommand::PlayNow(id) => match self.catalog.resolve(&id) {
                Some(track) => {
                    self.pending_advance = None;
                    self.queue.play_now(track);
                    self.publish(true);
                }
                None => self.report(QueueError::UnknownTrack(id)),
            },
            QueueCommand::PlayIndex(index) => match self.queue.jump_to(index) {
                Ok(()) => {
                    self.pending_advance = None;
                    self.publish(true);
                }
                Err(e) => self.report(e),
            },
            QueueCommand::Next => {
                self.pending_advance = None;
                let moved = self.queue.advance();
                self.publish(moved);
            }
            QueueCommand::Previous => {
                let moved = self.queue.retreat();
                // a retreat at the first track leaves the pending advance running
                if moved {
                    self.pending_advance = None;
                }
                self.publish(moved);
            }
            QueueCommand::ToggleRepeat => {
                let repeat = self.queue.toggle_repeat();
                log::info!("Repeat {}", if repeat { "on" } else { "off" });
                self.send(QueueResponse::RepeatChanged(repeat));
                self.publish(false);
            }
            QueueCommand::Reorder { from, to } => match self.queue.reorder_upcoming(from, to) {
                Ok(()) => self.publish(false),
                Err(e) => self.report(e),
            },
            QueueCommand::Remove(index) => {
                let was_current = self.queue.pointer() == Some(index);
                let was_last = index + 1 == self.queue.len();
                match self.queue.remove_at(index) {
                    Some(track) => {
                        log::info!("Removed {} from queue", track);
                        if was_current {
                            self.pending_advance = None;
                        }
                        // nothing follows the removed current track: hold instead of replaying history
                        if self.queue.is_empty() || (was_current && was_last) {
                            self.publish(false);
                            self.send(QueueResponse::Stopped);
                        } else {
                            self.publish(was_current);
                        }
                    }
                    None => self.report(QueueError::IndexOutOfBounds {
                        index,
                        len: self.queue.len(),
                    }),
                }
            }
            QueueCommand::Shuffle => {
                self.queue.shuffle();
                self.publish(false);
            }
            QueueCommand::Clear => {
                self.pending_advance = None;
                self.queue.clear();
                self.publish(false);
                if had_current {
                    self.send(QueueResponse::Stopped);
                }
            }
            QueueCommand::TrackEnded => {
                if had_current {
                    self.pending_advance = Some(Instant::now() + self.config.advance_delay);
                    log::debug!("Track ended, advancing in {:?}", self.config.advance_delay);
                }
            }
            QueueCommand::SetDuration { id, seconds } => {
                self.probing.remove(&id);
                self.catalog.set_duration(&id, seconds);
                if self.queue.set_duration(&id, seconds) > 0 {
                    self.publish(false);
                }
            }
            QueueCommand::Quit => {}
        }
    }

    fn fire_pending_advance(&mut self) {
        let Some(deadline) = self.pending_advance else {
            return;
        };
        if Instant::now() < deadline {
            return;
        }
        self.pending_advance = None;

        if self.queue.advance() {
            self.publish(true);
        } else {
            log::info!("Reached the end of the queue");
            self.send(QueueResponse::Stopped);
        }
    }

    /// Send the queue snapshot, then the current track when it changed
    fn publish(&mut self, track_changed: bool) {
        self.send(QueueResponse::QueueUpdated(self.snapshot()));

        if !track_changed {
            return;
        }
        if let (Some(index), Some(track)) = (self.queue.pointer(), self.queue.current()) {
            let track = track.clone();
            log::info!("Now playing {} ({}/{})", track, index + 1, self.queue.len());
            if track.metadata.duration.is_none() {
                self.start_probe(&track.id, &track.source);
            }
            self.send(QueueResponse::TrackChanged { index, track });
        }
    }

    fn start_probe(&mut self, id: &str, source: &str) {
        if !self.probing.insert(id.to_string()) {
            return;
        }
        let id = id.to_string();
        let source = source.to_string();
        let timeout = self.config.probe_timeout;
        let probe_tx = self.probe_tx.clone();

        thread::spawn(move || {
            let seconds = probe_duration(&source, timeout);
            let _ = probe_tx.send((id, seconds));
        });
    }

    fn report(&self, error: QueueError) {
        log::warn!("Queue command rejected: {}", error);
        self.send(QueueResponse::Error(error.to_string()));
    }

    fn send(&self, response: QueueResponse) {
        // the frontend may already be gone during shutdown
        let _ = self.resp_tx.send(response);
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            items: self.queue.items().to_vec(),
            pointer: self.queue.pointer(),
            repeat: self.queue.repeat(),
        }
    }
}
