//! Platform abstraction layer
//!
//! Handles the terminal-specific parts the simulation must not know about:
//! - Input events (held-key tracking)
//! - Storage locations for persisted files

pub mod input;
pub mod storage;

pub use input::{Action, KeyTracker};
