pub mod catalog;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod probe;
pub mod queue;
pub mod track;

pub use catalog::{Catalog, TrackFilter, TrackLookup};
pub use error::{QueueError, Result};
pub use queue::{PlaybackQueue, QueueStatus};
pub use track::{Playlist, Track, TrackMetadata};

/// Install `env_logger` for headless use, honoring `RUST_LOG`
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
