//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! and mouse events into [`crate::types::BoardAction`]. Pointer hit-testing is
//! supplied by the caller, so the same mapping works for any board layout.

pub mod map;

pub use match3_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit};
