//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. Frames are
//! drawn into a plain framebuffer and flushed to the terminal with
//! run-length diffing, without a widget toolkit.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Render only what the presenter has released, never the session grid
//! - Share one layout between drawing and pointer hit-testing

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_types as types;

pub use board_view::{token_rgb, AdapterStatusView, AnchorY, BoardFrame, BoardView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
