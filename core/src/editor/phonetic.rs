//! Phonetic editor: multi-letter composition with ranked candidate selection.
//!
//! Letters accumulate in a `CompositionBuffer`; the candidates for the
//! current prefix come from the shared `CandidateIndex`. Keys are checked in
//! a fixed order (chords, backspace, escape, enter/space, arrows, digits,
//! letters) and anything left over goes back to the host.

use super::Editor;
use crate::composition::CompositionBuffer;
use crate::index::CandidateIndex;
use crate::notification::{KeyResult, Notification};
use crate::symbol::{InputSymbol, KeyPress};
use crate::Config;
use std::sync::Arc;
use tracing::debug;

/// Phonetic input editor.
pub struct PhoneticEditor {
    buffer: CompositionBuffer,
    show_candidates: bool,
    space_commits_trailing_space: bool,
}

impl PhoneticEditor {
    pub fn new(index: Arc<CandidateIndex>, config: &Config) -> Self {
        Self {
            buffer: CompositionBuffer::new(index),
            show_candidates: config.show_candidates_while_composing,
            space_commits_trailing_space: config.space_commits_trailing_space,
        }
    }

    pub fn buffer(&self) -> &CompositionBuffer {
        &self.buffer
    }

    /// Preedit + candidate window refresh after the prefix changed.
    fn composition_updates(&self, result: &mut KeyResult) {
        result.push(Notification::preedit(self.buffer.prefix()));
        if self.buffer.is_idle() {
            result.push(Notification::HidePreedit);
            result.push(Notification::HideCandidates);
        } else if self.show_candidates && !self.buffer.candidates().is_empty() {
            result.push(Notification::candidates(self.buffer.candidates()));
        } else {
            result.push(Notification::HideCandidates);
        }
    }

    /// Commit `text`, then return to idle.
    fn commit_and_reset(&mut self, text: String, trailing_space: bool) -> KeyResult {
        debug!(prefix = self.buffer.prefix(), text = %text, "commit");
        self.buffer.reset();
        let mut result = KeyResult::consumed().with(Notification::Commit(text));
        if trailing_space {
            result.push(Notification::commit(" "));
        }
        result
            .with(Notification::HidePreedit)
            .with(Notification::HideCandidates)
    }

    fn handle_letter(&mut self, ch: char) -> KeyResult {
        self.buffer.append(ch);
        let mut result = KeyResult::consumed();
        self.composition_updates(&mut result);
        result
    }

    fn handle_backspace(&mut self) -> KeyResult {
        if !self.buffer.backspace() {
            return KeyResult::not_consumed();
        }
        let mut result = KeyResult::consumed();
        self.composition_updates(&mut result);
        result
    }

    fn handle_escape(&mut self) -> KeyResult {
        if self.buffer.is_idle() {
            return KeyResult::not_consumed();
        }
        self.buffer.reset();
        KeyResult::consumed()
            .with(Notification::HidePreedit)
            .with(Notification::HideCandidates)
    }

    /// Enter or space: commit the current candidate, or the raw prefix when
    /// there is none. Idle space and enter belong to the host.
    fn handle_commit(&mut self, is_space: bool) -> KeyResult {
        if self.buffer.is_idle() {
            return KeyResult::not_consumed();
        }
        let text = self.buffer.commit_text();
        self.commit_and_reset(text, is_space && self.space_commits_trailing_space)
    }

    fn handle_navigate(&mut self, delta: isize) -> KeyResult {
        if self.buffer.candidates().is_empty() {
            return KeyResult::not_consumed();
        }
        self.buffer.move_cursor(delta);
        let result = KeyResult::consumed();
        if self.show_candidates {
            result.with(Notification::candidates(self.buffer.candidates()))
        } else {
            result
        }
    }

    /// Digit 1-5 picks from the visible window while composing. A miss
    /// leaves everything as it was.
    fn handle_digit(&mut self, digit: u8) -> KeyResult {
        if self.buffer.is_idle() {
            return KeyResult::not_consumed();
        }
        let Some(entry) = self.buffer.select_by_index(digit as usize - 1) else {
            return KeyResult::not_consumed();
        };
        let text = entry.text.clone();
        self.commit_and_reset(text, false)
    }
}

impl Editor for PhoneticEditor {
    fn process_key(&mut self, key: &KeyPress) -> KeyResult {
        if key.modifiers.has_control_or_alt() {
            return KeyResult::not_consumed();
        }
        match key.symbol {
            InputSymbol::Backspace => self.handle_backspace(),
            InputSymbol::Escape => self.handle_escape(),
            InputSymbol::Enter => self.handle_commit(false),
            InputSymbol::Space => self.handle_commit(true),
            InputSymbol::ArrowUp => self.handle_navigate(-1),
            InputSymbol::ArrowDown => self.handle_navigate(1),
            InputSymbol::Digit(d @ 1..=5) => self.handle_digit(d),
            InputSymbol::Letter(ch) if ch.is_ascii_lowercase() => self.handle_letter(ch),
            _ => KeyResult::not_consumed(),
        }
    }

    fn reset(&mut self) {
        self.buffer.reset();
    }

    fn name(&self) -> &'static str {
        "PhoneticEditor"
    }
}
