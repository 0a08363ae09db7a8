pub mod library;
pub mod log;
pub mod playback;
pub mod playlists;
pub mod queue;
