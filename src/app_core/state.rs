//! Shared application state and state-mutation methods.
//!
//! All *applied* filter state lives in the controller's param store; this
//! struct only holds the loaded records, transient UI state (focus, cursors,
//! the sidebar's local specialty-narrowing text), and the derived view. The
//! view is re-derived whenever the store version moves, never cached beyond
//! the current values.

use crate::controller::SelectionController;
use crate::model::{ConsultMode, Doctor};
use crate::query::{SortKey, encode_query_line};
use crate::records::RecordStore;
use crate::sort;
use crate::theme::ThemeConfig;
use ratatui::widgets::ListState;

/// Which control currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Search,
    Sort,
    Specialties,
    Mode,
    List,
}

/// Radio choices for the mode control, in display order.
pub const MODE_CHOICES: [Option<ConsultMode>; 3] = [
    None,
    Some(ConsultMode::Video),
    Some(ConsultMode::InClinic),
];

/// Radio choices for the sort control, in display order.
pub const SORT_CHOICES: [Option<SortKey>; 3] =
    [None, Some(SortKey::Fees), Some(SortKey::Experience)];

/// Application state for the ratatui app.
pub struct AppState {
    /// The immutable record set, loaded once.
    pub records: RecordStore,
    /// Routes interactions into the param store.
    pub controller: SelectionController,
    /// Indices into the record store for the current filtered, sorted view.
    pub view_indices: Vec<usize>,
    /// Store version the current view was derived from.
    seen_version: u64,
    /// List selection state managed by ratatui.
    pub list_state: ListState,
    /// Which pane currently has keyboard focus.
    pub focused_pane: Pane,
    /// Draft of the search box; pushed to the store on every edit.
    pub search_text: String,
    /// Cursor position in the search box, in chars.
    pub search_cursor: usize,
    /// Local narrowing of the specialty checkbox list. Pure UI state, never
    /// written to the param store.
    pub specialty_search: String,
    /// Cursor into the currently visible specialty labels.
    pub specialty_cursor: usize,
    /// Cursor into [`MODE_CHOICES`].
    pub mode_cursor: usize,
    /// Cursor into [`SORT_CHOICES`].
    pub sort_cursor: usize,
    /// Deduplicated specialty labels derived from the record set.
    pub specialty_catalog: Vec<String>,
    /// Theme configuration.
    pub theme: ThemeConfig,
    /// Where the listing came from, for the status bar.
    pub source_label: String,
    /// Present when the fetch failed; the view stays empty but alive.
    pub load_notice: Option<String>,
    /// Flag to quit app.
    pub should_quit: bool,
    /// Whether the help overlay is visible.
    pub show_help: bool,
}

impl AppState {
    pub fn new(
        records: RecordStore,
        controller: SelectionController,
        theme: ThemeConfig,
        source_label: String,
    ) -> Self {
        let specialty_catalog = records.specialty_catalog();
        let query = controller.query();
        let search_cursor = query.search.chars().count();
        let mode_cursor = MODE_CHOICES
            .iter()
            .position(|m| *m == query.mode)
            .unwrap_or(0);
        let sort_cursor = SORT_CHOICES
            .iter()
            .position(|k| *k == query.sort)
            .unwrap_or(0);

        let mut app = Self {
            records,
            controller,
            view_indices: Vec::new(),
            seen_version: 0,
            list_state: ListState::default(),
            focused_pane: Pane::List,
            search_text: query.search,
            search_cursor,
            specialty_search: String::new(),
            specialty_cursor: 0,
            mode_cursor,
            sort_cursor,
            specialty_catalog,
            theme,
            source_label,
            load_notice: None,
            should_quit: false,
            show_help: false,
        };
        app.refresh_view();
        app
    }

    /// Re-derives the view from the current records and query. Selection is
    /// reset to the top of the new result set.
    pub fn refresh_view(&mut self) {
        let query = self.controller.query();
        self.view_indices = sort::derive_view(self.records.doctors(), &query);
        if self.view_indices.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
        self.seen_version = self.controller.store_version();
    }

    /// Recomputes the view if the param store changed since the last
    /// derivation. Returns `true` when a recomputation happened.
    pub fn sync_if_stale(&mut self) -> bool {
        if self.controller.store_version() != self.seen_version {
            self.refresh_view();
            true
        } else {
            false
        }
    }

    /// The persisted/shareable form of the current view state.
    pub fn params_line(&self) -> String {
        encode_query_line(&self.controller.params_snapshot())
    }

    pub fn selected_doctor(&self) -> Option<&Doctor> {
        self.list_state
            .selected()
            .and_then(|idx| self.view_indices.get(idx))
            .and_then(|&idx| self.records.doctors().get(idx))
    }

    /// Clamps the current list selection to valid bounds.
    pub fn clamp_selection(&mut self) {
        let len = self.view_indices.len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        if let Some(selected) = self.list_state.selected()
            && selected >= len
        {
            self.list_state.select(Some(len - 1));
        }
    }

    /// Moves the list selection by `direction` (+1 or -1).
    pub fn move_selection(&mut self, direction: i32) {
        if direction < 0 {
            self.list_state.select_previous();
        } else {
            self.list_state.select_next();
        }
        self.clamp_selection();
    }

    pub fn focus_pane(&mut self, pane: Pane) {
        self.focused_pane = pane;
    }

    pub fn focus_next_pane(&mut self) {
        let next = match self.focused_pane {
            Pane::Search => Pane::Sort,
            Pane::Sort => Pane::Specialties,
            Pane::Specialties => Pane::Mode,
            Pane::Mode => Pane::List,
            Pane::List => Pane::Search,
        };
        self.focus_pane(next);
    }

    pub fn focus_prev_pane(&mut self) {
        let prev = match self.focused_pane {
            Pane::Search => Pane::List,
            Pane::Sort => Pane::Search,
            Pane::Specialties => Pane::Sort,
            Pane::Mode => Pane::Specialties,
            Pane::List => Pane::Mode,
        };
        self.focus_pane(prev);
    }

    // -- search box editing ------------------------------------------------

    pub fn search_add_char(&mut self, c: char) {
        let byte_idx = self
            .search_text
            .char_indices()
            .nth(self.search_cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(self.search_text.len());
        self.search_text.insert(byte_idx, c);
        self.search_cursor += 1;
    }

    pub fn search_backspace(&mut self) {
        if self.search_cursor > 0 {
            self.search_cursor -= 1;
            if let Some((byte_idx, _)) = self.search_text.char_indices().nth(self.search_cursor) {
                self.search_text.remove(byte_idx);
            }
        }
    }

    pub fn search_delete(&mut self) {
        let char_count = self.search_text.chars().count();
        if self.search_cursor < char_count
            && let Some((byte_idx, _)) = self.search_text.char_indices().nth(self.search_cursor)
        {
            self.search_text.remove(byte_idx);
        }
    }

    pub fn search_move_cursor_left(&mut self) {
        if self.search_cursor > 0 {
            self.search_cursor -= 1;
        }
    }

    pub fn search_move_cursor_right(&mut self) {
        let char_count = self.search_text.chars().count();
        if self.search_cursor < char_count {
            self.search_cursor += 1;
        }
    }

    pub fn search_move_to_start(&mut self) {
        self.search_cursor = 0;
    }

    pub fn search_move_to_end(&mut self) {
        self.search_cursor = self.search_text.chars().count();
    }

    pub fn search_clear(&mut self) {
        self.search_text.clear();
        self.search_cursor = 0;
    }

    /// Pushes the current draft into the store as the applied search term.
    pub fn apply_search(&mut self) {
        self.controller.on_search_change(&self.search_text);
    }

    // -- sidebar controls --------------------------------------------------

    /// Specialty labels currently shown in the checkbox list: the catalog
    /// narrowed by the sidebar's local search box.
    pub fn visible_specialties(&self) -> Vec<String> {
        if self.specialty_search.is_empty() {
            return self.specialty_catalog.clone();
        }
        let needle = self.specialty_search.to_lowercase();
        self.specialty_catalog
            .iter()
            .filter(|label| label.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn specialty_move(&mut self, direction: i32) {
        let len = self.visible_specialties().len();
        if len == 0 {
            self.specialty_cursor = 0;
            return;
        }
        if direction < 0 {
            self.specialty_cursor = self.specialty_cursor.saturating_sub(1);
        } else {
            self.specialty_cursor = (self.specialty_cursor + 1).min(len - 1);
        }
    }

    pub fn toggle_specialty_under_cursor(&mut self) {
        let visible = self.visible_specialties();
        if let Some(label) = visible.get(self.specialty_cursor) {
            self.controller.on_toggle_specialty(label);
        }
    }

    /// Edits the local narrowing box; the cursor snaps back to the top since
    /// the visible list just changed.
    pub fn specialty_search_edit(&mut self, edit: impl FnOnce(&mut String)) {
        edit(&mut self.specialty_search);
        self.specialty_cursor = 0;
    }

    pub fn mode_move(&mut self, direction: i32) {
        self.mode_cursor = step_cursor(self.mode_cursor, direction, MODE_CHOICES.len());
    }

    pub fn apply_mode(&mut self) {
        self.controller.on_mode_change(MODE_CHOICES[self.mode_cursor]);
    }

    pub fn sort_move(&mut self, direction: i32) {
        self.sort_cursor = step_cursor(self.sort_cursor, direction, SORT_CHOICES.len());
    }

    pub fn apply_sort(&mut self) {
        self.controller.on_sort_change(SORT_CHOICES[self.sort_cursor]);
    }

    /// Resets the param store wholesale and every derived UI cache with it.
    pub fn clear_all(&mut self) {
        self.controller.on_clear_all();
        self.search_clear();
        self.specialty_search.clear();
        self.specialty_cursor = 0;
        self.mode_cursor = 0;
        self.sort_cursor = 0;
    }
}

fn step_cursor(cursor: usize, direction: i32, len: usize) -> usize {
    if direction < 0 {
        cursor.saturating_sub(1)
    } else {
        (cursor + 1).min(len - 1)
    }
}
