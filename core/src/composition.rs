//! Incremental composition buffer for phonetic input.
//!
//! The buffer holds the raw letters typed so far (the prefix) and the ranked
//! candidates for that prefix. Candidates are recomputed from the shared
//! `CandidateIndex` on every prefix change, so they are never stale relative
//! to the prefix.

use crate::candidate::{CandidateEntry, CandidateList};
use crate::index::CandidateIndex;
use std::sync::Arc;

/// Prefix, derived candidates and cursor for one session.
#[derive(Debug, Clone)]
pub struct CompositionBuffer {
    index: Arc<CandidateIndex>,
    prefix: String,
    candidates: CandidateList,
}

impl CompositionBuffer {
    /// Create an idle buffer backed by `index`.
    pub fn new(index: Arc<CandidateIndex>) -> Self {
        Self {
            index,
            prefix: String::new(),
            candidates: CandidateList::new(),
        }
    }

    /// The raw letters typed so far.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn is_idle(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Append a letter (lowercased) and recompute candidates.
    ///
    /// A prefix with no candidates is still kept; it commits verbatim.
    pub fn append(&mut self, letter: char) {
        self.prefix.extend(letter.to_lowercase());
        self.refresh();
    }

    /// Remove the last letter. Returns false when the buffer was already idle.
    pub fn backspace(&mut self) -> bool {
        if self.prefix.pop().is_none() {
            return false;
        }
        self.refresh();
        true
    }

    /// Move the candidate cursor by `delta`, clamping at the ends.
    /// Returns true if the cursor moved.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        self.candidates.move_cursor(delta)
    }

    pub fn current_candidate(&self) -> Option<&CandidateEntry> {
        self.candidates.selected()
    }

    /// Candidate at `index` within the visible window.
    pub fn select_by_index(&self, index: usize) -> Option<&CandidateEntry> {
        self.candidates.select_by_index(index)
    }

    /// Text a commit would insert now: the current candidate, or the raw
    /// prefix when there are no candidates.
    pub fn commit_text(&self) -> String {
        match self.current_candidate() {
            Some(entry) => entry.text.clone(),
            None => self.prefix.clone(),
        }
    }

    /// Back to the idle state. Idempotent.
    pub fn reset(&mut self) {
        self.prefix.clear();
        self.candidates.clear();
    }

    fn refresh(&mut self) {
        if self.prefix.is_empty() {
            self.candidates.clear();
        } else {
            self.candidates.set_entries(self.index.lookup(&self.prefix));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_index() -> Arc<CandidateIndex> {
        Arc::new(CandidateIndex::from_groups(vec![
            ("sa", vec![("สา", 30.0), ("สะ", 20.0), ("ซา", 10.0)]),
            ("sawasdee", vec![("สวัสดี", 100.0)]),
        ]))
    }

    fn typed(buf: &mut CompositionBuffer, s: &str) {
        for ch in s.chars() {
            buf.append(ch);
        }
    }

    #[test]
    fn test_new_is_idle() {
        let buf = CompositionBuffer::new(test_index());
        assert!(buf.is_idle());
        assert!(buf.candidates().is_empty());
        assert!(buf.current_candidate().is_none());
    }

    #[test]
    fn test_append_recomputes_and_resets_cursor() {
        let mut buf = CompositionBuffer::new(test_index());
        typed(&mut buf, "sa");
        assert_eq!(buf.prefix(), "sa");
        assert_eq!(buf.candidates().len(), 3);
        buf.move_cursor(1);
        assert_eq!(buf.candidates().cursor(), 1);

        buf.append('w');
        assert_eq!(buf.prefix(), "saw");
        assert!(buf.candidates().is_empty());
        assert_eq!(buf.candidates().cursor(), 0);
    }

    #[test]
    fn test_append_case_folds() {
        let mut buf = CompositionBuffer::new(test_index());
        buf.append('S');
        buf.append('A');
        assert_eq!(buf.prefix(), "sa");
        assert_eq!(buf.current_candidate().unwrap().text, "สา");
    }

    #[test]
    fn test_backspace() {
        let mut buf = CompositionBuffer::new(test_index());
        assert!(!buf.backspace());

        typed(&mut buf, "saw");
        assert!(buf.backspace());
        assert_eq!(buf.prefix(), "sa");
        assert_eq!(buf.candidates().len(), 3);

        assert!(buf.backspace());
        assert!(buf.backspace());
        assert!(buf.is_idle());
        assert!(buf.candidates().is_empty());
        assert!(!buf.backspace());
    }

    #[test]
    fn test_commit_text_falls_back_to_prefix() {
        let mut buf = CompositionBuffer::new(test_index());
        typed(&mut buf, "xyz");
        assert_eq!(buf.commit_text(), "xyz");

        buf.reset();
        typed(&mut buf, "sawasdee");
        assert_eq!(buf.commit_text(), "สวัสดี");
    }

    #[test]
    fn test_select_by_index() {
        let mut buf = CompositionBuffer::new(test_index());
        typed(&mut buf, "sa");
        assert_eq!(buf.select_by_index(2).unwrap().text, "ซา");
        assert!(buf.select_by_index(3).is_none());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut buf = CompositionBuffer::new(test_index());
        typed(&mut buf, "sa");
        buf.reset();
        assert!(buf.is_idle());
        assert!(buf.candidates().is_empty());
        buf.reset();
        assert!(buf.is_idle());
        assert!(buf.candidates().is_empty());
        assert_eq!(buf.candidates().cursor(), 0);
    }
}
