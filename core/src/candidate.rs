//! Candidate types for prefix conversion.
//!
//! This module provides:
//! - `CandidateEntry`: A single output text with its ranking weight
//! - `CandidateList`: Ranked entries with a clamped cursor and a fixed-size
//!   visible window used for digit selection

use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::Arc;

/// Number of candidates shown at once (and reachable with digit keys 1-5).
pub const VISIBLE_WINDOW: usize = 5;

/// A single output text with its ranking weight.
///
/// Weights are non-negative; higher ranks first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub text: String,
    pub weight: f64,
}

impl CandidateEntry {
    pub fn new<T: Into<String>>(text: T, weight: f64) -> Self {
        CandidateEntry {
            text: text.into(),
            weight,
        }
    }
}

impl<T: Into<String>> From<(T, f64)> for CandidateEntry {
    fn from((text, weight): (T, f64)) -> Self {
        CandidateEntry::new(text, weight)
    }
}

impl<T: Into<String>> From<(T, u32)> for CandidateEntry {
    fn from((text, weight): (T, u32)) -> Self {
        CandidateEntry::new(text, weight as f64)
    }
}

/// Ranked candidates with cursor navigation.
///
/// The entries are a shared, read-only view straight out of the
/// `CandidateIndex`. The cursor moves over the whole list and clamps at both
/// ends; the visible window is the page of `VISIBLE_WINDOW` entries that
/// contains the cursor.
#[derive(Debug, Clone)]
pub struct CandidateList {
    entries: Arc<[CandidateEntry]>,
    cursor: usize,
}

impl CandidateList {
    /// Create a new empty candidate list.
    pub fn new() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
            cursor: 0,
        }
    }

    /// Replace the entries, moving the cursor back to the first one.
    pub fn set_entries(&mut self, entries: Arc<[CandidateEntry]>) {
        self.entries = entries;
        self.cursor = 0;
    }

    /// All entries, in rank order.
    pub fn entries(&self) -> &[CandidateEntry] {
        &self.entries
    }

    /// The shared slice backing this list.
    pub fn shared(&self) -> &Arc<[CandidateEntry]> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Global cursor position (0-based).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the page holding the cursor.
    pub fn current_page(&self) -> usize {
        self.cursor / VISIBLE_WINDOW
    }

    pub fn num_pages(&self) -> usize {
        self.entries.len().div_ceil(VISIBLE_WINDOW)
    }

    fn visible_range(&self) -> Range<usize> {
        let start = self.current_page() * VISIBLE_WINDOW;
        let end = (start + VISIBLE_WINDOW).min(self.entries.len());
        start.min(end)..end
    }

    /// Entries in the visible window.
    pub fn visible(&self) -> &[CandidateEntry] {
        &self.entries[self.visible_range()]
    }

    /// Cursor position relative to the visible window.
    pub fn visible_cursor(&self) -> usize {
        self.cursor - self.visible_range().start
    }

    /// The entry under the cursor.
    pub fn selected(&self) -> Option<&CandidateEntry> {
        self.entries.get(self.cursor)
    }

    /// Move the cursor by `delta`, clamping at the first and last entry.
    /// Returns true if the cursor moved.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let last = self.entries.len() - 1;
        let target = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta as usize).min(last)
        };
        let moved = target != self.cursor;
        self.cursor = target;
        moved
    }

    /// Entry at `index` within the visible window.
    pub fn select_by_index(&self, index: usize) -> Option<&CandidateEntry> {
        if index >= VISIBLE_WINDOW {
            return None;
        }
        self.visible().get(index)
    }

    /// Clear the list.
    pub fn clear(&mut self) {
        self.entries = Arc::from(Vec::new());
        self.cursor = 0;
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(n: usize) -> CandidateList {
        let entries: Vec<CandidateEntry> = (0..n)
            .map(|i| CandidateEntry::new(format!("c{}", i), (n - i) as f64))
            .collect();
        let mut list = CandidateList::new();
        list.set_entries(Arc::from(entries));
        list
    }

    #[test]
    fn test_empty_list() {
        let mut list = CandidateList::new();
        assert!(list.is_empty());
        assert_eq!(list.num_pages(), 0);
        assert!(list.visible().is_empty());
        assert!(list.selected().is_none());
        assert!(!list.move_cursor(1));
        assert!(list.select_by_index(0).is_none());
    }

    #[test]
    fn test_cursor_clamps_at_bounds() {
        let mut list = list_of(3);
        assert!(list.move_cursor(1));
        assert!(list.move_cursor(1));
        assert_eq!(list.cursor(), 2);
        assert!(!list.move_cursor(1));
        assert_eq!(list.cursor(), 2);

        assert!(list.move_cursor(-1));
        assert!(list.move_cursor(-1));
        assert!(!list.move_cursor(-1));
        assert_eq!(list.cursor(), 0);
    }

    #[test]
    fn test_visible_window_follows_cursor() {
        let mut list = list_of(7);
        assert_eq!(list.num_pages(), 2);
        assert_eq!(list.visible().len(), 5);
        assert_eq!(list.visible()[0].text, "c0");

        for _ in 0..5 {
            list.move_cursor(1);
        }
        assert_eq!(list.cursor(), 5);
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.visible().len(), 2);
        assert_eq!(list.visible()[0].text, "c5");
        assert_eq!(list.visible_cursor(), 0);
    }

    #[test]
    fn test_select_by_index_is_window_relative() {
        let mut list = list_of(7);
        assert_eq!(list.select_by_index(4).unwrap().text, "c4");
        assert!(list.select_by_index(5).is_none());

        for _ in 0..6 {
            list.move_cursor(1);
        }
        assert_eq!(list.select_by_index(1).unwrap().text, "c6");
        assert!(list.select_by_index(2).is_none());
    }

    #[test]
    fn test_set_entries_resets_cursor() {
        let mut list = list_of(3);
        list.move_cursor(2);
        list.set_entries(Arc::from(vec![CandidateEntry::new("x", 1.0)]));
        assert_eq!(list.cursor(), 0);
        assert_eq!(list.selected().unwrap().text, "x");
    }

    #[test]
    fn test_entry_conversions() {
        let a: CandidateEntry = ("สวัสดี", 100u32).into();
        let b: CandidateEntry = ("สวัสดี", 100.0).into();
        assert_eq!(a, b);
    }
}
