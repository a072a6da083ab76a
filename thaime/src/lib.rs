//! thaime
//!
//! Thai input method built on `thaime-core`: the Kedmanee layout for remap
//! mode, dictionary loading for phonetic mode, the advertised engines and a
//! line-oriented terminal host.

pub mod component;
pub mod config;
pub mod dictionary;
pub mod host;
pub mod keymap;
pub mod trace_init;

pub use component::{find_engine, EngineDesc, EngineFactory, ENGINES};
pub use config::ThaimeConfig;
pub use dictionary::{DictionaryError, DictionaryFormat, LexEntry};
pub use keymap::{kedmanee, qwerty_to_thai, thai_to_qwerty};

use thaime_core::{CandidateIndex, Engine};
use tracing::info;

/// Build the candidate index `config` asks for: the configured dictionary
/// (empty when it cannot be read) or the built-in demo dictionary.
pub fn build_index(config: &ThaimeConfig) -> CandidateIndex {
    match &config.dictionary {
        Some(path) => dictionary::load_or_empty(path, config.dictionary_format),
        None => {
            info!("no dictionary configured, using the built-in demo dictionary");
            dictionary::demo_index()
        }
    }
}

/// Build the process-wide engine: dictionary, Kedmanee keymap and base config.
pub fn create_engine(config: &ThaimeConfig) -> Engine {
    Engine::new(build_index(config), kedmanee(), config.base.clone())
}
