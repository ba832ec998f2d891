//! Character-level tree builder.
//!
//! Tokenizing and tree construction happen in one state machine: there is
//! no intermediate token stream. Each character of the normalized input is
//! handled by the current [`BuilderState`], which may create, fill, or
//! close elements directly in the [`thicket_dom::DomTree`].

/// State machine and per-state handlers.
pub mod core;
/// Helper methods for transitions, element bookkeeping, and issues.
mod helpers;

pub use self::core::{BuilderState, TreeBuilder};
