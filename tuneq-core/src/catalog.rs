use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::track::{Playlist, Track};

/// Resolves a track id to a track, if the id is known
pub trait TrackLookup {
    fn resolve(&self, id: &str) -> Option<Track>;
}

impl TrackLookup for HashMap<String, Track> {
    fn resolve(&self, id: &str) -> Option<Track> {
        self.get(id).cloned()
    }
}

impl<F> TrackLookup for F
where
    F: Fn(&str) -> Option<Track>,
{
    fn resolve(&self, id: &str) -> Option<Track> {
        self(id)
    }
}

/// On-disk shape of a library file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryFile {
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub playlists: Vec<Playlist>,
}

/// Name/artist/tag filter applied to the library view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackFilter {
    /// Case-insensitive substring of the title
    pub name: String,
    /// Case-insensitive substring of the artist
    pub artist: String,
    /// Every tag here must be present
    pub include_tags: Vec<String>,
    /// Any tag here rejects the track
    pub exclude_tags: Vec<String>,
}

impl TrackFilter {
    pub fn matches(&self, track: &Track) -> bool {
        if !self.name.is_empty()
            && !track.title.to_lowercase().contains(&self.name.to_lowercase())
        {
            return false;
        }
        if !self.artist.is_empty()
            && !track
                .artist
                .to_lowercase()
                .contains(&self.artist.to_lowercase())
        {
            return false;
        }
        if !self.include_tags.iter().all(|t| track.has_tag(t)) {
            return false;
        }
        if self.exclude_tags.iter().any(|t| track.has_tag(t)) {
            return false;
        }
        true
    }
}

/// In-memory track and playlist catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
    index: HashMap<String, usize>,
    playlists: Vec<Playlist>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>, playlists: Vec<Playlist>) -> Self {
        let mut index = HashMap::with_capacity(tracks.len());
        for (i, track) in tracks.iter().enumerate() {
            if index.insert(track.id.clone(), i).is_some() {
                log::warn!("Duplicate track id in catalog: {}", track.id);
            }
        }
        Self {
            tracks,
            index,
            playlists,
        }
    }

    /// Load a JSON library file (`{ "tracks": [...], "playlists": [...] }`)
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let file: LibraryFile = serde_json::from_str(&raw)?;
        log::info!(
            "Loaded {} tracks and {} playlists from {:?}",
            file.tracks.len(),
            file.playlists.len(),
            path
        );
        Ok(Self::new(file.tracks, file.playlists))
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.index.get(id).and_then(|&i| self.tracks.get(i))
    }

    pub fn playlist(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    /// Resolve a playlist's ids in order, dropping ids the catalog doesn't know
    pub fn playlist_tracks(&self, playlist: &Playlist) -> Vec<Track> {
        playlist
            .track_ids
            .iter()
            .filter_map(|id| self.resolve(id))
            .collect()
    }

    /// Tracks matching `filter`, drawn from `playlist` when given, else the whole catalog
    pub fn filter(&self, filter: &TrackFilter, playlist: Option<&Playlist>) -> Vec<Track> {
        let source = match playlist {
            Some(p) => self.playlist_tracks(p),
            None => self.tracks.clone(),
        };
        source.into_iter().filter(|t| filter.matches(t)).collect()
    }

    /// Every distinct tag in the catalog, sorted
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .tracks
            .iter()
            .flat_map(|t| t.metadata.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Record a resolved duration, returns true if the track exists
    pub fn set_duration(&mut self, id: &str, seconds: u32) -> bool {
        match self.index.get(id) {
            Some(&i) => {
                self.tracks[i].metadata.duration = Some(seconds);
                true
            }
            None => false,
        }
    }
}

impl TrackLookup for Catalog {
    fn resolve(&self, id: &str) -> Option<Track> {
        self.track(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn sample() -> Catalog {
        Catalog::new(
            vec![
                Track::new("1", "Morning Light", "Aurora Fields").with_tags(["calm", "piano"]),
                Track::new("2", "Night Drive", "Neon Coast").with_tags(["synth", "night"]),
                Track::new("3", "Last Light", "Neon Coast").with_tags(["synth", "calm"]),
            ],
            vec![Playlist::new("p1", "Evening", ["3", "missing", "1"])],
        )
    }

    #[test]
    fn playlist_tracks_skip_unknown_ids() {
        let catalog = sample();
        let playlist = catalog.playlist("p1").unwrap();
        let ids: Vec<_> = catalog
            .playlist_tracks(playlist)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn filter_by_name_and_artist_is_case_insensitive() {
        let catalog = sample();
        let filter = TrackFilter {
            name: "LIGHT".into(),
            artist: "neon".into(),
            ..Default::default()
        };
        let ids: Vec<_> = catalog.filter(&filter, None).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn include_tags_require_all_and_exclude_tags_reject_any() {
        let catalog = sample();
        let filter = TrackFilter {
            include_tags: vec!["synth".into()],
            exclude_tags: vec!["night".into()],
            ..Default::default()
        };
        let ids: Vec<_> = catalog.filter(&filter, None).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["3"]);

        let filter = TrackFilter {
            include_tags: vec!["synth".into(), "piano".into()],
            ..Default::default()
        };
        assert!(catalog.filter(&filter, None).is_empty());
    }

    #[test]
    fn filter_within_playlist_keeps_playlist_order() {
        let catalog = sample();
        let playlist = catalog.playlist("p1").cloned().unwrap();
        let filter = TrackFilter {
            include_tags: vec!["calm".into()],
            ..Default::default()
        };
        let ids: Vec<_> = catalog
            .filter(&filter, Some(&playlist))
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn closures_and_maps_are_lookups() {
        let lookup = |id: &str| (id == "a").then(|| Track::new("a", "A", "X"));
        assert!(lookup.resolve("a").is_some());
        assert!(lookup.resolve("b").is_none());

        let mut map = HashMap::new();
        map.insert("k".to_string(), Track::new("k", "K", "Y"));
        assert_eq!(map.resolve("k").map(|t| t.title), Some("K".to_string()));
    }

    #[test]
    fn load_reads_library_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "tracks": [
                    {{ "id": "a", "title": "A", "artist": "X", "source": "a.mp3" }},
                    {{ "id": "b", "title": "B", "artist": "Y", "source": "b.mp3",
                       "metadata": {{ "tags": ["live"] }} }}
                ],
                "playlists": [ {{ "id": "p", "name": "P", "createdAt": 1700000000000, "trackIds": ["b"] }} ]
            }}"#
        )
        .unwrap();

        let mut catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.tracks().len(), 2);
        assert_eq!(catalog.playlist("p").unwrap().created_at, 1_700_000_000_000);
        assert_eq!(catalog.tags(), vec!["live".to_string()]);

        assert!(catalog.set_duration("a", 200));
        assert!(!catalog.set_duration("zzz", 1));
        assert_eq!(catalog.track("a").unwrap().metadata.duration, Some(200));
    }

    #[test]
    fn load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Catalog::load(file.path()),
            Err(crate::error::QueueError::Parse(_))
        ));
    }
}
