//! Engine descriptors and the session factory.
//!
//! The component advertises one engine per input mode. A host asks the
//! factory for a session by engine name; unknown names get nothing.

use std::sync::Arc;
use thaime_core::{Engine, Mode, Session};
use tracing::{info, warn};

/// Static description of an advertised engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineDesc {
    pub name: &'static str,
    pub long_name: &'static str,
    pub description: &'static str,
    pub language: &'static str,
    pub layout: &'static str,
    pub mode: Mode,
}

pub const LATIN: EngineDesc = EngineDesc {
    name: "thaime-latin",
    long_name: "Thaime (Latin)",
    description: "Keys go to the application unchanged",
    language: "en",
    layout: "us",
    mode: Mode::Passthrough,
};

pub const KEDMANEE: EngineDesc = EngineDesc {
    name: "thaime-kedmanee",
    long_name: "Thaime (Kedmanee)",
    description: "Thai Kedmanee keyboard layout",
    language: "th",
    layout: "th",
    mode: Mode::Remap,
};

pub const PHONETIC: EngineDesc = EngineDesc {
    name: "thaime-phonetic",
    long_name: "Thaime (Phonetic)",
    description: "Romanized Thai with candidate selection",
    language: "th",
    layout: "us",
    mode: Mode::Phonetic,
};

pub const ENGINES: [EngineDesc; 3] = [LATIN, KEDMANEE, PHONETIC];

/// Older single-engine name, kept as an alias for the phonetic engine.
pub const LEGACY_NAME: &str = "thaime";

/// Look up an engine by its advertised name.
pub fn find_engine(name: &str) -> Option<&'static EngineDesc> {
    if name == LEGACY_NAME {
        return Some(&ENGINES[2]);
    }
    ENGINES.iter().find(|d| d.name == name)
}

/// Hands out sessions for advertised engine names.
pub struct EngineFactory {
    engine: Arc<Engine>,
}

impl EngineFactory {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    pub fn create_engine(&self, name: &str) -> Option<Session> {
        let Some(desc) = find_engine(name) else {
            warn!(name, "unknown engine name");
            return None;
        };
        let session = self.engine.create_session_with_mode(desc.mode);
        info!(name, session = %session.id(), mode = %desc.mode, "engine instance created");
        Some(session)
    }
}
