//! Remap editor: commits the static keymap's output for each mapped key.

use super::Editor;
use crate::keymap::StaticKeymap;
use crate::notification::{KeyResult, Notification};
use crate::symbol::KeyPress;
use std::sync::Arc;
use tracing::debug;

/// Static character remapping (e.g. QWERTY → Kedmanee).
///
/// Stateless apart from the shared keymap; never composes.
pub struct RemapEditor {
    keymap: Arc<StaticKeymap>,
}

impl RemapEditor {
    pub fn new(keymap: Arc<StaticKeymap>) -> Self {
        Self { keymap }
    }

    pub fn keymap(&self) -> &StaticKeymap {
        &self.keymap
    }
}

impl Editor for RemapEditor {
    fn process_key(&mut self, key: &KeyPress) -> KeyResult {
        if key.modifiers.has_control_or_alt() {
            return KeyResult::not_consumed();
        }
        match self.keymap.map_symbol(&key.symbol) {
            Some(output) => {
                debug!(symbol = %key.symbol, output, "remapped");
                KeyResult::consumed().with(Notification::commit(output))
            }
            None => KeyResult::not_consumed(),
        }
    }

    fn reset(&mut self) {}

    fn name(&self) -> &'static str {
        "RemapEditor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{InputSymbol, Modifiers};

    fn editor() -> RemapEditor {
        RemapEditor::new(Arc::new(StaticKeymap::from_pairs([
            ('a', "ฟ"),
            ('A', "ฤ"),
            ('1', "ๅ"),
        ])))
    }

    #[test]
    fn test_mapped_key_commits() {
        let mut ed = editor();
        let r = ed.process_key(&KeyPress::plain(InputSymbol::Letter('a')));
        assert!(r.consumed);
        assert_eq!(r.notifications, vec![Notification::commit("ฟ")]);
    }

    #[test]
    fn test_shifted_key_uses_shifted_entry() {
        let mut ed = editor();
        let r = ed.process_key(&KeyPress::new(InputSymbol::Letter('A'), Modifiers::SHIFT));
        assert_eq!(r.committed_text(), "ฤ");
    }

    #[test]
    fn test_digit_is_remapped() {
        let mut ed = editor();
        let r = ed.process_key(&KeyPress::plain(InputSymbol::Digit(1)));
        assert_eq!(r.committed_text(), "ๅ");
    }

    #[test]
    fn test_unmapped_and_chords_pass_through() {
        let mut ed = editor();
        assert!(!ed.process_key(&KeyPress::plain(InputSymbol::Letter('z'))).consumed);
        assert!(!ed.process_key(&KeyPress::plain(InputSymbol::Enter)).consumed);
        let chord = KeyPress::new(InputSymbol::Letter('a'), Modifiers::CONTROL);
        assert!(!ed.process_key(&chord).consumed);
    }
}
