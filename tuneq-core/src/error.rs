//! Error types for the queue engine and catalog

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    /// Relative or absolute index outside the addressed list
    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Unknown track: {0}")]
    UnknownTrack(String),

    #[error("Unknown playlist: {0}")]
    UnknownPlaylist(String),

    /// Library file could not be read
    #[error("Library I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Library file is not valid JSON for the expected shape
    #[error("Library parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The engine thread has stopped and dropped its channel
    #[error("Queue engine is no longer running")]
    EngineGone,
}

pub type Result<T> = std::result::Result<T, QueueError>;
