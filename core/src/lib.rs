//! thaime-core
//!
//! Language-agnostic composition engine for the thaime input method: key
//! decoding, the three input modes, the composition buffer, the candidate
//! index and per-context sessions. Thai data (the Kedmanee layout, the
//! dictionary loader) and hosts live in the `thaime` crate.
//!
//! Public API:
//! - `Engine` - Shared index/keymap plus the session factory
//! - `Session` - One input context; turns key events into `KeyResult`s
//! - `ModeRouter` / `Mode` - Passthrough, Remap and Phonetic dispatch
//! - `CompositionBuffer` - Prefix, candidates and cursor while composing
//! - `CandidateIndex` - Prefix → ranked candidates
//! - `StaticKeymap` - Character remapping table
//! - `Config` - Configuration and feature flags
use serde::{Deserialize, Serialize};

pub mod symbol;
pub use symbol::{keysym, keyval_for_char, InputSymbol, KeyEvent, KeyPress, Modifiers};

pub mod candidate;
pub use candidate::{CandidateEntry, CandidateList, VISIBLE_WINDOW};

pub mod index;
pub use index::CandidateIndex;

pub mod keymap;
pub use keymap::StaticKeymap;

pub mod composition;
pub use composition::CompositionBuffer;

pub mod notification;
pub use notification::{KeyResult, Notification};

pub mod editor;
pub use editor::{Editor, PassthroughEditor, PhoneticEditor, RemapEditor};

pub mod mode;
pub use mode::{Mode, ModeRouter};

pub mod session;
pub use session::{Session, SessionId};

pub mod engine;
pub use engine::Engine;

/// Engine configuration.
///
/// Language-specific options (dictionary location, log filter) belong in
/// `ThaimeConfig` in the `thaime` crate, which flattens this struct.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Mode new sessions start in.
    pub initial_mode: Mode,

    /// Enable Ctrl+1/2/3 (select Passthrough/Remap/Phonetic) and Ctrl+`
    /// (cycle modes). Off by default so passthrough mode leaves every key,
    /// chords included, to the application.
    pub mode_shortcuts: bool,

    /// Committing with Space also inserts a literal space after the text.
    pub space_commits_trailing_space: bool,

    /// Show the candidate window while composing. When off, the top
    /// candidate is still what Space/Enter commit.
    pub show_candidates_while_composing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_mode: Mode::Passthrough,
            mode_shortcuts: false,
            space_commits_trailing_space: true,
            show_candidates_while_composing: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }
}
