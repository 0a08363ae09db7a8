use ratatui::widgets::ListState;
use tuneq_core::{Catalog, Playlist, Track, TrackFilter};

/// Dialog shown when selecting a track in the library
#[derive(Debug, Clone, Default)]
pub enum LibraryDialog {
    #[default]
    None,
    /// Dialog open for a track with selected option (0=Play Now, 1=Add to Queue)
    Open { track: Track, selected: usize },
}

/// Text field of the filter being typed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum FilterField {
    Name,
    Artist,
}

/// Library view: the catalog narrowed by a filter and optionally a playlist
#[derive(Debug, Clone)]
pub struct LibraryState {
    catalog: Catalog,
    pub filter: TrackFilter,
    /// Playlist the view is restricted to
    pub scope: Option<Playlist>,
    pub items: Vec<Track>,
    pub list_state: ListState,
    pub dialog: LibraryDialog,
    /// Text field receiving keystrokes, if any
    pub editing: Option<FilterField>,
    tag_cursor: Option<usize>,
    exclude_cursor: Option<usize>,
}

impl LibraryState {
    pub fn new(catalog: Catalog) -> Self {
        let mut state = Self {
            catalog,
            filter: TrackFilter::default(),
            scope: None,
            items: Vec::new(),
            list_state: ListState::default(),
            dialog: LibraryDialog::None,
            editing: None,
            tag_cursor: None,
            exclude_cursor: None,
        };
        state.refresh();
        state
    }

    /// Recompute the visible tracks
    pub fn refresh(&mut self) {
        self.items = self.catalog.filter(&self.filter, self.scope.as_ref());
        if self.items.is_empty() {
            self.list_state.select(None);
        } else {
            let i = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(i.min(self.items.len() - 1)));
        }
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.items.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.list_state.selected().and_then(|i| self.items.get(i))
    }

    pub fn visible_ids(&self) -> Vec<String> {
        self.items.iter().map(|t| t.id.clone()).collect()
    }

    pub fn restrict_to(&mut self, playlist: Playlist) {
        log::debug!("Library restricted to playlist {:?}", playlist.name);
        self.scope = Some(playlist);
        self.list_state.select(Some(0));
        self.refresh();
    }

    pub fn clear_scope(&mut self) {
        self.scope = None;
        self.refresh();
    }

    pub fn start_editing(&mut self, field: FilterField) {
        self.editing = Some(field);
    }

    pub fn stop_editing(&mut self) {
        self.editing = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    fn edited_text(&mut self) -> Option<&mut String> {
        match self.editing? {
            FilterField::Name => Some(&mut self.filter.name),
            FilterField::Artist => Some(&mut self.filter.artist),
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(text) = self.edited_text() {
            text.push(c);
            self.refresh();
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(text) = self.edited_text() {
            text.pop();
            self.refresh();
        }
    }

    /// Step the include-tag filter through every catalog tag, then back to none
    pub fn cycle_tag(&mut self) {
        let tags = self.catalog.tags();
        self.tag_cursor = step_cursor(self.tag_cursor, tags.len());
        self.filter.include_tags = pick(&tags, self.tag_cursor);
        self.refresh();
    }

    /// Same as [`Self::cycle_tag`] for the exclude-tag filter
    pub fn cycle_exclude_tag(&mut self) {
        let tags = self.catalog.tags();
        self.exclude_cursor = step_cursor(self.exclude_cursor, tags.len());
        self.filter.exclude_tags = pick(&tags, self.exclude_cursor);
        self.refresh();
    }

    pub fn reset_filter(&mut self) {
        self.filter = TrackFilter::default();
        self.tag_cursor = None;
        self.exclude_cursor = None;
        self.editing = None;
        self.refresh();
    }

    /// Copy durations the engine resolved into the library view
    pub fn absorb_durations(&mut self, tracks: &[Track]) {
        let mut changed = false;
        for track in tracks {
            let Some(seconds) = track.metadata.duration else {
                continue;
            };
            let known = self
                .catalog
                .track(&track.id)
                .and_then(|t| t.metadata.duration);
            if known != Some(seconds) {
                changed |= self.catalog.set_duration(&track.id, seconds);
            }
        }
        if changed {
            self.refresh();
        }
    }

    /// Open the dialog for the selected track
    pub fn open_dialog(&mut self) {
        if let Some(track) = self.selected_track().cloned() {
            self.dialog = LibraryDialog::Open { track, selected: 0 };
        }
    }

    /// Navigate dialog selection
    pub fn dialog_toggle(&mut self) {
        if let LibraryDialog::Open { selected, .. } = &mut self.dialog {
            *selected = if *selected == 0 { 1 } else { 0 };
        }
    }

    /// Close the dialog
    pub fn close_dialog(&mut self) {
        self.dialog = LibraryDialog::None;
    }

    /// Check if dialog is open
    pub fn is_dialog_open(&self) -> bool {
        !matches!(self.dialog, LibraryDialog::None)
    }
}

fn step_cursor(cursor: Option<usize>, len: usize) -> Option<usize> {
    match cursor {
        None if len > 0 => Some(0),
        Some(i) if i + 1 < len => Some(i + 1),
        _ => None,
    }
}

fn pick(tags: &[String], cursor: Option<usize>) -> Vec<String> {
    cursor.and_then(|i| tags.get(i).cloned()).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> LibraryState {
        LibraryState::new(Catalog::new(
            vec![
                Track::new("1", "Alpha", "A").with_tags(["live"]),
                Track::new("2", "Beta", "B").with_tags(["studio"]),
                Track::new("3", "Alphabet", "C").with_tags(["live", "studio"]),
            ],
            vec![Playlist::new("p", "P", ["3", "2"])],
        ))
    }

    #[test]
    fn name_filter_narrows_view() {
        let mut state = library();
        assert_eq!(state.items.len(), 3);
        state.start_editing(FilterField::Name);
        for c in "alpha".chars() {
            state.push_char(c);
        }
        assert_eq!(state.visible_ids(), vec!["1", "3"]);
        state.reset_filter();
        assert_eq!(state.items.len(), 3);
    }

    #[test]
    fn artist_filter_edits_its_own_field() {
        let mut state = library();
        state.push_char('x');
        assert_eq!(state.items.len(), 3);

        state.start_editing(FilterField::Artist);
        state.push_char('b');
        assert_eq!(state.filter.artist, "b");
        assert!(state.filter.name.is_empty());
        assert_eq!(state.visible_ids(), vec!["2"]);

        state.pop_char();
        state.stop_editing();
        assert!(!state.is_editing());
        assert_eq!(state.items.len(), 3);
    }

    #[test]
    fn exclude_tag_cycle_hides_tagged_tracks() {
        let mut state = library();
        state.cycle_exclude_tag();
        assert_eq!(state.filter.exclude_tags, vec!["live"]);
        assert_eq!(state.visible_ids(), vec!["2"]);
        state.cycle_exclude_tag();
        assert_eq!(state.visible_ids(), vec!["1"]);
        state.cycle_exclude_tag();
        assert!(state.filter.exclude_tags.is_empty());
        assert_eq!(state.items.len(), 3);

        state.cycle_exclude_tag();
        state.reset_filter();
        assert!(state.filter.exclude_tags.is_empty());
        assert_eq!(state.items.len(), 3);
    }

    #[test]
    fn resolved_durations_reach_the_view() {
        let mut state = library();
        assert_eq!(state.items[1].metadata.duration, None);
        state.absorb_durations(&[Track::new("2", "Beta", "B").with_duration(75)]);
        assert_eq!(state.items[1].metadata.duration, Some(75));
        assert_eq!(state.items[0].metadata.duration, None);
    }

    #[test]
    fn tag_cycle_walks_all_tags_then_clears() {
        let mut state = library();
        state.cycle_tag();
        assert_eq!(state.filter.include_tags, vec!["live"]);
        assert_eq!(state.visible_ids(), vec!["1", "3"]);
        state.cycle_tag();
        assert_eq!(state.filter.include_tags, vec!["studio"]);
        state.cycle_tag();
        assert!(state.filter.include_tags.is_empty());
        assert_eq!(state.items.len(), 3);
    }

    #[test]
    fn scope_uses_playlist_order() {
        let mut state = library();
        state.restrict_to(Playlist::new("p", "P", ["3", "2"]));
        assert_eq!(state.visible_ids(), vec!["3", "2"]);
        state.clear_scope();
        assert_eq!(state.items.len(), 3);
    }

    #[test]
    fn dialog_opens_on_selected_track() {
        let mut state = library();
        state.next();
        state.open_dialog();
        match &state.dialog {
            LibraryDialog::Open { track, selected } => {
                assert_eq!(track.id, "2");
                assert_eq!(*selected, 0);
            }
            LibraryDialog::None => panic!("dialog should be open"),
        }
        state.dialog_toggle();
        assert!(matches!(state.dialog, LibraryDialog::Open { selected: 1, .. }));
        state.close_dialog();
        assert!(!state.is_dialog_open());
    }
}
