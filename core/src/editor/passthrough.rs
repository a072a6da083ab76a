//! Passthrough editor: every key goes to the application untouched.

use super::Editor;
use crate::notification::KeyResult;
use crate::symbol::KeyPress;

#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughEditor;

impl PassthroughEditor {
    pub fn new() -> Self {
        Self
    }
}

impl Editor for PassthroughEditor {
    fn process_key(&mut self, _key: &KeyPress) -> KeyResult {
        KeyResult::not_consumed()
    }

    fn reset(&mut self) {}

    fn name(&self) -> &'static str {
        "PassthroughEditor"
    }
}
