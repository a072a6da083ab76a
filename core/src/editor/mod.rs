//! Editor trait and implementations for the input modes.
//!
//! Each mode is handled by an editor that implements the `Editor` trait and
//! turns a decoded key press into a `KeyResult`. Editors never switch modes
//! themselves; the `ModeRouter` owns that decision.

pub mod passthrough;
pub mod phonetic;
pub mod remap;

pub use passthrough::PassthroughEditor;
pub use phonetic::PhoneticEditor;
pub use remap::RemapEditor;

use crate::notification::KeyResult;
use crate::symbol::KeyPress;

/// Editor trait for handling input in a specific mode.
pub trait Editor {
    /// Process a key press in this editor's context.
    ///
    /// Returns whether the key was consumed and the notifications the host
    /// should apply, in order.
    fn process_key(&mut self, key: &KeyPress) -> KeyResult;

    /// Drop any in-progress state. Idempotent.
    fn reset(&mut self);

    /// Get a human-readable name for this editor (for debugging/logging).
    fn name(&self) -> &'static str;
}
