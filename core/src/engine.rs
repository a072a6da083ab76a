// core/src/engine.rs
//
// Process-wide engine: shared read-only data plus the session factory.

use crate::index::CandidateIndex;
use crate::keymap::StaticKeymap;
use crate::mode::{Mode, ModeRouter};
use crate::session::{Session, SessionId};
use crate::Config;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Shared engine state.
///
/// The candidate index and keymap are built once, before any session exists,
/// and handed to every session by `Arc`. `Engine` is `Send + Sync`, so hosts
/// that service several input contexts from different threads can share one.
pub struct Engine {
    index: Arc<CandidateIndex>,
    keymap: Arc<StaticKeymap>,
    config: Config,
    next_id: AtomicU64,
}

impl Engine {
    pub fn new(index: CandidateIndex, keymap: StaticKeymap, config: Config) -> Self {
        Self::from_shared(Arc::new(index), Arc::new(keymap), config)
    }

    pub fn from_shared(
        index: Arc<CandidateIndex>,
        keymap: Arc<StaticKeymap>,
        config: Config,
    ) -> Self {
        debug!(
            prefixes = index.len(),
            keymap_entries = keymap.len(),
            initial_mode = %config.initial_mode,
            "engine ready"
        );
        Self {
            index,
            keymap,
            config,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn index(&self) -> &Arc<CandidateIndex> {
        &self.index
    }

    pub fn keymap(&self) -> &Arc<StaticKeymap> {
        &self.keymap
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create a session in the configured initial mode.
    pub fn create_session(&self) -> Session {
        self.create_session_with_mode(self.config.initial_mode)
    }

    pub fn create_session_with_mode(&self, mode: Mode) -> Session {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let router = ModeRouter::with_mode(
            Arc::clone(&self.index),
            Arc::clone(&self.keymap),
            self.config.clone(),
            mode,
        );
        Session::new(id, router)
    }

    /// Create a session for an engine or mode name (e.g. `thaime-kedmanee`).
    /// Unknown names yield `None`.
    pub fn create_session_for(&self, name: &str) -> Option<Session> {
        Mode::from_id(name).map(|mode| self.create_session_with_mode(mode))
    }
}
