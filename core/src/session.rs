//! Input-context sessions.
//!
//! A `Session` is one host input context (one text field, one client window).
//! It owns a `ModeRouter` and turns raw key events into `KeyResult`s. Sessions
//! are independent of each other and process keys strictly in order.

use crate::composition::CompositionBuffer;
use crate::mode::{Mode, ModeRouter};
use crate::notification::{KeyResult, Notification};
use crate::symbol::KeyEvent;
use std::fmt;
use tracing::{debug, debug_span, info};

/// Process-unique session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One input context.
pub struct Session {
    id: SessionId,
    router: ModeRouter,
    focused: bool,
}

impl Session {
    pub fn new(id: SessionId, router: ModeRouter) -> Self {
        info!(session = %id, mode = %router.mode(), "session created");
        Self {
            id,
            router,
            focused: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn mode(&self) -> Mode {
        self.router.mode()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The in-progress composition, when in phonetic mode.
    pub fn composition(&self) -> Option<&CompositionBuffer> {
        self.router.buffer()
    }

    /// Process one key event. Releases are never consumed and change nothing.
    pub fn handle_key(&mut self, event: KeyEvent) -> KeyResult {
        let _span = debug_span!(
            "handle_key",
            session = self.id.0,
            keyval = event.keyval,
            press = event.is_press,
            mode = %self.router.mode()
        )
        .entered();

        let Some(key) = event.to_press() else {
            debug!("release ignored");
            return KeyResult::not_consumed();
        };
        self.router.process_key(&key)
    }

    pub fn focus_in(&mut self) {
        self.focused = true;
        debug!(session = %self.id, "focus in");
    }

    pub fn focus_out(&mut self) {
        self.focused = false;
        debug!(session = %self.id, "focus out");
    }

    /// Drop any composition. The mode is kept.
    pub fn reset(&mut self) -> Vec<Notification> {
        debug!(session = %self.id, "reset");
        self.router.reset()
    }

    /// Apply a mode-selection id from the host. Unknown ids are ignored.
    pub fn activate_mode(&mut self, id: &str) -> Option<Vec<Notification>> {
        self.router.select_mode_by_id(id)
    }

    pub fn set_mode(&mut self, mode: Mode) -> Vec<Notification> {
        self.router.switch_mode(mode).notifications
    }

    /// End the session, discarding any composition.
    pub fn destroy(mut self) {
        self.router.reset();
        info!(session = %self.id, "session destroyed");
    }
}
