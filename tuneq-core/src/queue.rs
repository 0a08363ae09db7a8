use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::TrackLookup;
use crate::error::{QueueError, Result};
use crate::track::{Playlist, Track};

/// Where the pointer sits relative to the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum QueueStatus {
    /// Nothing queued, pointer is unset
    #[strum(serialize = "⏹ Empty")]
    Empty,
    /// Current track has at least one track after it
    #[strum(serialize = "▶ Playing")]
    Playing,
    /// Current track is the last entry
    #[strum(serialize = "⏭ Last track")]
    LastTrack,
}

/// The playback queue state
///
/// ```text
///   history      current    upcoming
/// [ a, b, c ]  [    d    ]  [ e, f ]
///                  ^ pointer
/// ```
///
/// `pointer` is `None` exactly when `items` is empty.
#[derive(Debug, Clone, Default)]
pub struct PlaybackQueue {
    items: Vec<Track>,
    pointer: Option<usize>,
    repeat: bool,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append tracks in order, returns the new length
    ///
    /// Starts the queue at the first added track when it was empty.
    pub fn enqueue<I>(&mut self, tracks: I) -> usize
    where
        I: IntoIterator<Item = Track>,
    {
        let was_empty = self.items.is_empty();
        self.items.extend(tracks);
        if was_empty && !self.items.is_empty() {
            self.pointer = Some(0);
        }
        self.items.len()
    }

    pub fn enqueue_one(&mut self, track: Track) -> usize {
        self.enqueue(std::iter::once(track))
    }

    /// Resolve the playlist's ids through `lookup` and enqueue the hits in order
    pub fn enqueue_playlist<L>(&mut self, playlist: &Playlist, lookup: &L) -> usize
    where
        L: TrackLookup + ?Sized,
    {
        let resolved: Vec<Track> = playlist
            .track_ids
            .iter()
            .filter_map(|id| {
                let track = lookup.resolve(id);
                if track.is_none() {
                    log::debug!("Playlist {} references unknown track {}", playlist.id, id);
                }
                track
            })
            .collect();
        log::info!(
            "Queueing playlist {:?}: {}/{} tracks resolved",
            playlist.name,
            resolved.len(),
            playlist.track_ids.len()
        );
        self.enqueue(resolved)
    }

    /// Insert right after the current track and make it current
    pub fn play_now(&mut self, track: Track) {
        match self.pointer {
            Some(p) => {
                self.items.insert(p + 1, track);
                self.pointer = Some(p + 1);
            }
            None => {
                self.enqueue_one(track);
            }
        }
    }

    /// Move to the next track, returns true if the current track changed
    ///
    /// At the last track this wraps to the start when repeat is on and holds otherwise.
    pub fn advance(&mut self) -> bool {
        let Some(p) = self.pointer else {
            return false;
        };
        if p + 1 < self.items.len() {
            self.pointer = Some(p + 1);
            true
        } else if self.repeat {
            self.pointer = Some(0);
            true
        } else {
            false
        }
    }

    /// Move to the previous track, never wraps
    pub fn retreat(&mut self) -> bool {
        match self.pointer {
            Some(p) if p > 0 => {
                self.pointer = Some(p - 1);
                true
            }
            _ => false,
        }
    }

    /// Point at an absolute index
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(QueueError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        self.pointer = Some(index);
        Ok(())
    }

    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        self.repeat
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    /// Move an upcoming track, both indices relative to the upcoming list
    pub fn reorder_upcoming(&mut self, from: usize, to: usize) -> Result<()> {
        let upcoming = self.upcoming().len();
        for index in [from, to] {
            if index >= upcoming {
                return Err(QueueError::IndexOutOfBounds {
                    index,
                    len: upcoming,
                });
            }
        }
        if from == to {
            return Ok(());
        }

        // upcoming is non-empty here, so the pointer is set
        let base = self.pointer.map_or(0, |p| p + 1);
        let track = self.items.remove(base + from);
        self.items.insert(base + to, track);
        Ok(())
    }

    /// Remove the first track with `id`
    pub fn remove(&mut self, id: &str) -> Option<Track> {
        let pos = self.items.iter().position(|t| t.id == id)?;
        self.remove_at(pos)
    }

    /// Remove by absolute index, keeping the current track current where possible
    ///
    /// Removing the current track leaves the pointer on the same slot, so the
    /// following track becomes current (or the new last track at the end).
    pub fn remove_at(&mut self, pos: usize) -> Option<Track> {
        if pos >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(pos);

        if let Some(idx) = self.pointer {
            if self.items.is_empty() {
                self.pointer = None;
            } else if pos < idx {
                self.pointer = Some(idx - 1);
            } else if pos == idx && idx >= self.items.len() {
                self.pointer = Some(self.items.len() - 1);
            }
        }
        Some(removed)
    }

    /// Shuffle the upcoming tracks using Fisher-Yates
    pub fn shuffle(&mut self) {
        let mut rng = rand::rng();
        self.shuffle_with(&mut rng);
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(p) = self.pointer {
            self.items[p + 1..].shuffle(rng);
        }
    }

    /// Clear all tracks, repeat is left as is
    pub fn clear(&mut self) {
        self.items.clear();
        self.pointer = None;
    }

    /// Record a resolved duration on every queued copy of the track
    pub fn set_duration(&mut self, id: &str, seconds: u32) -> usize {
        let mut updated = 0;
        for track in self.items.iter_mut().filter(|t| t.id == id) {
            track.metadata.duration = Some(seconds);
            updated += 1;
        }
        updated
    }

    pub fn items(&self) -> &[Track] {
        &self.items
    }

    pub fn pointer(&self) -> Option<usize> {
        self.pointer
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get current track
    pub fn current(&self) -> Option<&Track> {
        self.pointer.and_then(|i| self.items.get(i))
    }

    /// Get item by index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.items.get(index)
    }

    /// Tracks before the current one
    pub fn history(&self) -> &[Track] {
        match self.pointer {
            Some(p) => &self.items[..p],
            None => &[],
        }
    }

    /// Tracks after the current one
    pub fn upcoming(&self) -> &[Track] {
        match self.pointer {
            Some(p) => &self.items[p + 1..],
            None => &[],
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
