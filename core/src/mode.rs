//! Input modes and the per-session mode router.
//!
//! The router owns exactly one editor, chosen by the active `Mode`. Mode
//! changes only happen through an explicit request (a reserved Control
//! shortcut or a mode-selection id from the host) and always drop the
//! in-progress composition before the new editor sees a key.

use crate::composition::CompositionBuffer;
use crate::editor::{Editor, PassthroughEditor, PhoneticEditor, RemapEditor};
use crate::index::CandidateIndex;
use crate::keymap::StaticKeymap;
use crate::notification::{KeyResult, Notification};
use crate::symbol::{InputSymbol, KeyPress, Modifiers};
use crate::Config;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Active input mode of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Keys go to the application untouched.
    #[default]
    Passthrough,
    /// Static QWERTY → Thai remapping.
    Remap,
    /// Romanized composition with candidate selection.
    Phonetic,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Passthrough, Mode::Remap, Mode::Phonetic];

    /// Parse a mode-selection id. Accepts mode names, their layout aliases and
    /// the advertised engine names, case-insensitively.
    pub fn from_id(id: &str) -> Option<Mode> {
        match id.trim().to_ascii_lowercase().as_str() {
            "passthrough" | "latin" | "thaime-latin" => Some(Mode::Passthrough),
            "remap" | "kedmanee" | "thaime-kedmanee" => Some(Mode::Remap),
            "phonetic" | "thaime" | "thaime-phonetic" => Some(Mode::Phonetic),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Mode::Passthrough => "passthrough",
            Mode::Remap => "remap",
            Mode::Phonetic => "phonetic",
        }
    }

    /// Next mode in the Ctrl+` cycle.
    pub fn next(self) -> Mode {
        match self {
            Mode::Passthrough => Mode::Remap,
            Mode::Remap => Mode::Phonetic,
            Mode::Phonetic => Mode::Passthrough,
        }
    }

    /// Mode bound to Ctrl+`digit`.
    pub fn from_shortcut_digit(digit: u8) -> Option<Mode> {
        match digit {
            1 => Some(Mode::Passthrough),
            2 => Some(Mode::Remap),
            3 => Some(Mode::Phonetic),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Mode plus the editor state that belongs to it. Only the phonetic variant
/// carries a composition buffer.
enum ModeState {
    Passthrough(PassthroughEditor),
    Remap(RemapEditor),
    Phonetic(PhoneticEditor),
}

impl ModeState {
    fn mode(&self) -> Mode {
        match self {
            ModeState::Passthrough(_) => Mode::Passthrough,
            ModeState::Remap(_) => Mode::Remap,
            ModeState::Phonetic(_) => Mode::Phonetic,
        }
    }

    fn editor_mut(&mut self) -> &mut dyn Editor {
        match self {
            ModeState::Passthrough(ed) => ed,
            ModeState::Remap(ed) => ed,
            ModeState::Phonetic(ed) => ed,
        }
    }
}

/// Per-keystroke dispatcher over the three modes.
pub struct ModeRouter {
    state: ModeState,
    index: Arc<CandidateIndex>,
    keymap: Arc<StaticKeymap>,
    config: Config,
}

impl ModeRouter {
    /// Create a router in the configured initial mode.
    pub fn new(index: Arc<CandidateIndex>, keymap: Arc<StaticKeymap>, config: Config) -> Self {
        let mode = config.initial_mode;
        Self::with_mode(index, keymap, config, mode)
    }

    pub fn with_mode(
        index: Arc<CandidateIndex>,
        keymap: Arc<StaticKeymap>,
        config: Config,
        mode: Mode,
    ) -> Self {
        let state = build_state(mode, &index, &keymap, &config);
        Self {
            state,
            index,
            keymap,
            config,
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The composition buffer, present only in phonetic mode.
    pub fn buffer(&self) -> Option<&CompositionBuffer> {
        match &self.state {
            ModeState::Phonetic(ed) => Some(ed.buffer()),
            _ => None,
        }
    }

    /// The editor for the active mode.
    pub fn editor_mut(&mut self) -> &mut dyn Editor {
        self.state.editor_mut()
    }

    /// Route one key press. Reserved shortcuts are checked before the active
    /// editor sees the key.
    pub fn process_key(&mut self, key: &KeyPress) -> KeyResult {
        if self.config.mode_shortcuts {
            if let Some(target) = self.shortcut_target(key) {
                debug!(symbol = %key.symbol, target = %target, "mode shortcut");
                return self.switch_mode(target);
            }
        }

        let editor = self.state.editor_mut();
        let result = editor.process_key(key);
        debug!(
            editor = editor.name(),
            symbol = %key.symbol,
            consumed = result.consumed,
            notifications = result.notifications.len(),
            "routed key"
        );
        result
    }

    /// Switch to `mode`. Composition is dropped and the preedit and candidate
    /// window are hidden before the new mode is installed, even when `mode`
    /// is already active.
    pub fn switch_mode(&mut self, mode: Mode) -> KeyResult {
        let notifications = self.reset();
        let from = self.mode();
        self.state = build_state(mode, &self.index, &self.keymap, &self.config);
        info!(from = %from, to = %mode, "mode switched");
        KeyResult::consumed().extend(notifications)
    }

    /// Handle a mode-selection id from the host. Unknown ids are ignored and
    /// yield `None`.
    pub fn select_mode_by_id(&mut self, id: &str) -> Option<Vec<Notification>> {
        match Mode::from_id(id) {
            Some(mode) => Some(self.switch_mode(mode).notifications),
            None => {
                debug!(id, "ignoring unknown mode id");
                None
            }
        }
    }

    /// Drop any composition and hide the preedit and candidate window.
    pub fn reset(&mut self) -> Vec<Notification> {
        self.state.editor_mut().reset();
        vec![Notification::HidePreedit, Notification::HideCandidates]
    }

    fn shortcut_target(&self, key: &KeyPress) -> Option<Mode> {
        match key.symbol {
            InputSymbol::ControlDigit(d) if !key.modifiers.contains(Modifiers::ALT) => {
                Mode::from_shortcut_digit(d)
            }
            InputSymbol::Char('`')
                if key.modifiers.contains(Modifiers::CONTROL)
                    && !key.modifiers.contains(Modifiers::ALT) =>
            {
                Some(self.mode().next())
            }
            _ => None,
        }
    }
}

fn build_state(
    mode: Mode,
    index: &Arc<CandidateIndex>,
    keymap: &Arc<StaticKeymap>,
    config: &Config,
) -> ModeState {
    match mode {
        Mode::Passthrough => ModeState::Passthrough(PassthroughEditor::new()),
        Mode::Remap => ModeState::Remap(RemapEditor::new(Arc::clone(keymap))),
        Mode::Phonetic => ModeState::Phonetic(PhoneticEditor::new(Arc::clone(index), config)),
    }
}
