use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Descriptive metadata attached to a track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackMetadata {
    /// Year of release (if known)
    #[serde(default)]
    pub release_year: Option<i32>,
    /// Genre (if any)
    #[serde(default, alias = "genrer")]
    pub genre: Option<String>,
    /// Free-form mood label (if any)
    #[serde(default)]
    pub mood: Option<String>,
    /// Duration in whole seconds, `None` until resolved
    #[serde(default)]
    pub duration: Option<u32>,
    /// Free-form tags used for filtering
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Page the track was taken from
    #[serde(default)]
    pub link: String,
    /// Playable URL or local path
    pub source: String,
    #[serde(default)]
    pub added_at: String,
    #[serde(default)]
    pub metadata: TrackMetadata,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            link: String::new(),
            source: String::new(),
            added_at: String::new(),
            metadata: TrackMetadata::default(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.metadata.duration = Some(seconds);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.metadata.tags.iter().any(|t| t == tag)
    }

    /// Duration as `MM:SS`, or `HH:MM:SS` past one hour
    pub fn formatted_duration(&self) -> String {
        match self.metadata.duration {
            Some(seconds) => format_seconds(seconds),
            None => "--:--".to_string(),
        }
    }
}

impl Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// Format whole seconds the way the player footer shows them
pub fn format_seconds(seconds: u32) -> String {
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Named, ordered list of track ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    /// Creation time in unix milliseconds
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub track_ids: Vec<String>,
}

impl Playlist {
    pub fn new<I, S>(id: impl Into<String>, name: impl Into<String>, track_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: 0,
            track_ids: track_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.track_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.track_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_genre_key_is_accepted() {
        let json = r#"{
            "id": "a1",
            "title": "Intro",
            "artist": "Someone",
            "source": "https://cdn.example.com/a1.mp3",
            "metadata": { "genrer": "ambient", "duration": 125, "tags": ["calm"] }
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.metadata.genre.as_deref(), Some("ambient"));
        assert_eq!(track.metadata.duration, Some(125));
        assert!(track.has_tag("calm"));
        assert!(track.link.is_empty());
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(125), "02:05");
        assert_eq!(format_seconds(3725), "01:02:05");
        assert_eq!(Track::new("x", "t", "a").formatted_duration(), "--:--");
    }
}
