use crate::{queue::QueueStatus, track::Track};

/// Commands sent from a frontend to the queue engine
#[derive(Debug, Clone)]
pub enum QueueCommand {
    /// Append catalog tracks by id (unknown ids are skipped)
    Enqueue(Vec<String>),
    /// Append every resolvable track of a playlist
    EnqueuePlaylist(String),
    /// Insert a catalog track after the current one and play it
    PlayNow(String),
    /// Jump to an absolute queue index
    PlayIndex(usize),
    /// Skip to next track
    Next,
    /// Skip to previous track
    Previous,
    ToggleRepeat,
    /// Move an upcoming track, indices relative to the upcoming list
    Reorder { from: usize, to: usize },
    /// Remove the entry at an absolute queue index
    Remove(usize),
    /// Shuffle the upcoming tracks
    Shuffle,
    Clear,
    /// The playback surface finished the current track
    TrackEnded,
    /// A duration probe resolved
    SetDuration { id: String, seconds: u32 },
    /// Shutdown the queue engine
    Quit,
}

/// Cloned view of the queue for frontends
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueSnapshot {
    pub items: Vec<Track>,
    pub pointer: Option<usize>,
    pub repeat: bool,
}

impl QueueSnapshot {
    pub fn current(&self) -> Option<&Track> {
        self.pointer.and_then(|i| self.items.get(i))
    }

    /// Number of tracks after the current one
    pub fn upcoming_len(&self) -> usize {
        match self.pointer {
            Some(p) => self.items.len().saturating_sub(p + 1),
            None => 0,
        }
    }

    pub fn status(&self) -> QueueStatus {
        match self.pointer {
            None => QueueStatus::Empty,
            Some(p) if p + 1 == self.items.len() => QueueStatus::LastTrack,
            Some(_) => QueueStatus::Playing,
        }
    }
}

/// Responses sent from the queue engine to a frontend
#[derive(Debug, Clone)]
pub enum QueueResponse {
    /// Queue contents or order changed
    QueueUpdated(QueueSnapshot),
    /// A different track (or the same one again, after a wrap) became current
    TrackChanged { index: usize, track: Track },
    /// The queue emptied, nothing is current anymore
    Stopped,
    RepeatChanged(bool),
    /// A command was rejected
    Error(String),
    /// Engine is shutting down
    Shutdown,
}
