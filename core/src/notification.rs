//! Per-key output for the host.
//!
//! Every key event yields a `KeyResult`: whether the engine consumed the key,
//! plus the ordered UI updates the host should apply. Hosts apply the
//! notifications in order; there are no callbacks and no deferred refresh.

use crate::candidate::CandidateList;

/// A single UI update for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Show or replace the preedit text. `caret` is a char offset.
    UpdatePreedit { text: String, caret: usize },
    HidePreedit,
    /// Show or replace the candidate window with the visible entries.
    /// `cursor` is relative to `entries`.
    UpdateCandidates { entries: Vec<String>, cursor: usize },
    HideCandidates,
    /// Insert text into the client.
    Commit(String),
}

impl Notification {
    pub fn preedit(text: &str) -> Self {
        Notification::UpdatePreedit {
            text: text.to_string(),
            caret: text.chars().count(),
        }
    }

    pub fn candidates(list: &CandidateList) -> Self {
        Notification::UpdateCandidates {
            entries: list.visible().iter().map(|e| e.text.clone()).collect(),
            cursor: list.visible_cursor(),
        }
    }

    pub fn commit<T: Into<String>>(text: T) -> Self {
        Notification::Commit(text.into())
    }
}

/// Outcome of one key event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyResult {
    pub consumed: bool,
    pub notifications: Vec<Notification>,
}

impl KeyResult {
    /// Key left to the host; nothing changed.
    pub fn not_consumed() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            consumed: true,
            notifications: Vec::new(),
        }
    }

    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn with(mut self, notification: Notification) -> Self {
        self.notifications.push(notification);
        self
    }

    pub fn extend<I: IntoIterator<Item = Notification>>(mut self, notifications: I) -> Self {
        self.notifications.extend(notifications);
        self
    }

    /// Texts committed by this key, in order.
    pub fn commits(&self) -> impl Iterator<Item = &str> {
        self.notifications.iter().filter_map(|n| match n {
            Notification::Commit(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// All committed text concatenated.
    pub fn committed_text(&self) -> String {
        self.commits().collect()
    }
}
