pub mod library;
pub mod playlists;
pub mod queue;
pub mod transport;

pub use library::{FilterField, LibraryDialog, LibraryState};
pub use playlists::PlaylistsState;
pub use queue::QueueState;
pub use transport::TransportState;
