use ratatui::widgets::ListState;
use tuneq_core::commands::QueueSnapshot;

/// Queue-related state (last engine snapshot and list selection)
#[derive(Debug, Clone)]
pub struct QueueState {
    pub snapshot: QueueSnapshot,
    pub list_state: ListState,
}

impl QueueState {
    pub fn new() -> Self {
        Self {
            snapshot: QueueSnapshot::default(),
            list_state: ListState::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshot.items.len()
    }

    /// Replace the snapshot, keeping the selection in range
    pub fn update(&mut self, snapshot: QueueSnapshot) {
        self.snapshot = snapshot;
        let len = self.len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(self.snapshot.pointer.or(Some(0))),
            Some(_) => {}
        }
    }

    pub fn next(&mut self) {
        if self.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.len() => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn prev(&mut self) {
        if self.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Get currently selected queue index
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Selected entry as an index into the upcoming list, if it is upcoming
    pub fn selected_upcoming(&self) -> Option<usize> {
        let selected = self.selected()?;
        let pointer = self.snapshot.pointer?;
        selected.checked_sub(pointer + 1)
    }
}

#[cfg(test)]
mod tests {
    use tuneq_core::Track;

    use super::*;

    fn snapshot(n: usize, pointer: usize) -> QueueSnapshot {
        QueueSnapshot {
            items: (0..n).map(|i| Track::new(i.to_string(), "T", "A")).collect(),
            pointer: Some(pointer),
            repeat: false,
        }
    }

    #[test]
    fn selection_follows_pointer_and_clamps() {
        let mut state = QueueState::new();
        state.update(snapshot(4, 2));
        assert_eq!(state.selected(), Some(2));

        state.list_state.select(Some(3));
        state.update(snapshot(2, 0));
        assert_eq!(state.selected(), Some(1));

        state.update(QueueSnapshot::default());
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn upcoming_index_is_relative_to_pointer() {
        let mut state = QueueState::new();
        state.update(snapshot(5, 1));
        state.list_state.select(Some(4));
        assert_eq!(state.selected_upcoming(), Some(2));
        state.list_state.select(Some(1));
        assert_eq!(state.selected_upcoming(), None);
    }

    #[test]
    fn navigation_wraps() {
        let mut state = QueueState::new();
        state.update(snapshot(3, 0));
        state.prev();
        assert_eq!(state.selected(), Some(2));
        state.next();
        assert_eq!(state.selected(), Some(0));
    }
}
