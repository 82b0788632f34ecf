//! Core board logic module - pure, deterministic, and testable
//!
//! This module contains the tile-matching rules and the session state.
//! It has **no dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical boards
//! - **Testable**: Every rule is reachable from plain unit tests
//! - **Portable**: Can run in any environment (terminal, headless, AI adapter)
//!
//! # Module Structure
//!
//! - [`grid`]: rows x columns board of optional color tokens
//! - [`matcher`]: run detection (3-cell sliding window, rows and columns)
//! - [`init`]: random fill plus in-place recoloring until no run remains
//! - [`swap`]: swap, detect, then keep (remove + refill) or revert
//! - [`selection`]: 0/1/2 cell selection state machine
//! - [`refill`]: fresh tokens for empty cells, no cascade
//! - [`session`]: ties everything together behind `on_cell_activated`
//! - [`rng`]: injected color source
//!
//! # Example
//!
//! ```
//! use match3_core::{ColorRng, GameConfig, GameSession};
//! use match3_types::{BoardEvent, Coord};
//!
//! let mut session = GameSession::new(&GameConfig::default(), ColorRng::from_seed(7)).unwrap();
//!
//! let events = session.on_cell_activated(Coord::new(0, 0)).unwrap();
//! assert_eq!(events, vec![BoardEvent::CellHighlighted(Coord::new(0, 0))]);
//!
//! // Selecting a distant cell rejects the pair.
//! let events = session.on_cell_activated(Coord::new(3, 3)).unwrap();
//! assert_eq!(events.len(), 3);
//! assert!(session.selected().is_empty());
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod init;
pub mod matcher;
pub mod palette;
pub mod refill;
pub mod rng;
pub mod selection;
pub mod session;
pub mod swap;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use error::GridError;
pub use grid::Grid;
pub use init::{initialize_board, initialize_board_with_cap};
pub use matcher::{find_matches, has_matches, MatchSet};
pub use palette::Palette;
pub use refill::refill;
pub use rng::{ColorRng, ColorSource, SequenceSource};
pub use selection::{SelectionController, SelectionStep};
pub use session::{GameSession, SessionStats};
pub use swap::{resolve_selection, resolve_swap, SwapOutcome};
