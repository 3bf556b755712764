//! Application state.
//!
//! [`App`] owns everything the UI renders: the current record list, the
//! scroll selection, the status line, and the quit/refresh flags set by the
//! input layer.  It contains no I/O — the loader feeds it via
//! [`App::set_quakes`] and [`crate::ui`] reads from it.

use ratatui::widgets::ListState;

use crate::source::Quake;

pub struct App {
    /// Records from the most recent delivery, in feed order.
    pub quakes: Vec<Quake>,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Whether the user has requested a reload; consumed by the main loop.
    pub refresh_requested: bool,
    /// Last load status message.
    pub status: String,
}

impl App {
    pub fn new() -> Self {
        Self {
            quakes: Vec::new(),
            list_state: ListState::default(),
            quit: false,
            refresh_requested: false,
            status: "Loading…".into(),
        }
    }

    /// Replace the record list wholesale with a fresh delivery.
    ///
    /// There is no merging: each load cycle discards the previous list.
    /// The selection is clamped so it never points past the new end.
    pub fn set_quakes(&mut self, quakes: Vec<Quake>) {
        self.quakes = quakes;
        match self.list_state.selected() {
            Some(_) if self.quakes.is_empty() => self.list_state.select(None),
            Some(i) if i >= self.quakes.len() => {
                self.list_state.select(Some(self.quakes.len() - 1));
            }
            _ => {}
        }
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.quakes.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.quakes.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.quakes.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.quakes.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.quakes.is_empty() {
            self.list_state.select(Some(self.quakes.len() - 1));
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
