use ratatui::widgets::ListState;
use tuneq_core::Playlist;

#[derive(Debug, Clone)]
pub struct PlaylistsState {
    pub items: Vec<Playlist>,
    pub list_state: ListState,
}

impl PlaylistsState {
    pub fn new(items: Vec<Playlist>) -> Self {
        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(0));
        }
        Self { items, list_state }
    }

    pub fn next(&mut self) {
        if !self.items.is_empty() {
            let i = self.list_state.selected().map_or(0, |i| (i + 1) % self.items.len());
            self.list_state.select(Some(i));
        }
    }

    pub fn prev(&mut self) {
        if !self.items.is_empty() {
            let len = self.items.len();
            let i = self.list_state.selected().map_or(0, |i| (i + len - 1) % len);
            self.list_state.select(Some(i));
        }
    }

    pub fn selected(&self) -> Option<&Playlist> {
        self.list_state.selected().and_then(|i| self.items.get(i))
    }
}
