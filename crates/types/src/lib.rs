//! Core types module - shared data structures and constants
//!
//! This module defines the value types used throughout the workspace.
//! All types are plain data with no external dependencies, making them
//! usable in any context (board logic, terminal rendering, AI protocol).
//!
//! # Board Dimensions
//!
//! The default board is 6 rows by 5 columns. Coordinates are `(row, column)`
//! with `(0, 0)` in the top-left corner.
//!
//! # Pacing Constants
//!
//! Timing values are in milliseconds and only affect presentation:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SELECT_DELAY_MS` | 100 | Pause after the second selection |
//! | `SWAP_DELAY_MS` | 1000 | Pause before the swap is shown |
//! | `EVALUATE_DELAY_MS` | 1000 | Pause between swap and match evaluation |
//! | `REFILL_DELAY_MS` | 500 | Pause between removal and refill |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Coord, TokenColor, DEFAULT_COLUMNS, DEFAULT_ROWS};
//!
//! let color = TokenColor::from_str("blue").unwrap();
//! assert_eq!(color, TokenColor::Blue);
//!
//! assert!(Coord::new(1, 1).is_adjacent(Coord::new(1, 2)));
//! assert!(!Coord::new(1, 1).is_adjacent(Coord::new(2, 2)));
//!
//! assert_eq!(DEFAULT_ROWS, 6);
//! assert_eq!(DEFAULT_COLUMNS, 5);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Default number of rows.
pub const DEFAULT_ROWS: usize = 6;

/// Default number of columns.
pub const DEFAULT_COLUMNS: usize = 5;

/// Largest row or column count accepted from configuration.
pub const MAX_DIMENSION: usize = 256;

/// Minimum number of equal tokens in a line that counts as a run.
pub const MIN_RUN: usize = 3;

/// Upper bound on detect-and-recolor passes during board setup.
pub const MAX_INIT_PASSES: u32 = 10_000;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Pause after a second cell is selected, before resolution starts.
pub const SELECT_DELAY_MS: u32 = 100;

/// Pause before the swap becomes visible.
pub const SWAP_DELAY_MS: u32 = 1000;

/// Pause between a visible swap and its evaluation (removal or revert).
pub const EVALUATE_DELAY_MS: u32 = 1000;

/// Pause between removal and refill.
pub const REFILL_DELAY_MS: u32 = 500;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacing_defaults_match_reference_timings() {
        assert_eq!(SELECT_DELAY_MS, 100);
        assert_eq!(SWAP_DELAY_MS, 1000);
        assert_eq!(EVALUATE_DELAY_MS, 1000);
        assert_eq!(REFILL_DELAY_MS, 500);
    }

    #[test]
    fn adjacency_is_orthogonal_and_irreflexive() {
        let c = Coord::new(1, 1);
        assert!(c.is_adjacent(Coord::new(0, 1)));
        assert!(c.is_adjacent(Coord::new(2, 1)));
        assert!(c.is_adjacent(Coord::new(1, 0)));
        assert!(c.is_adjacent(Coord::new(1, 2)));
        assert!(!c.is_adjacent(Coord::new(2, 2)));
        assert!(!c.is_adjacent(Coord::new(1, 3)));
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn color_codes_are_one_based() {
        for (i, color) in TokenColor::ALL.iter().enumerate() {
            assert_eq!(color.code() as usize, i + 1);
            assert_eq!(TokenColor::from_code(color.code()), Some(*color));
        }
        assert_eq!(TokenColor::from_code(0), None);
        assert_eq!(TokenColor::from_code(7), None);
    }
}

/// Token colors
///
/// The palette of the original board:
/// - **Red**
/// - **Green**
/// - **Blue**
/// - **Yellow**
/// - **Magenta**
/// - **Cyan**
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenColor {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

impl TokenColor {
    /// Every color, in palette order.
    pub const ALL: [TokenColor; 6] = [
        TokenColor::Red,
        TokenColor::Green,
        TokenColor::Blue,
        TokenColor::Yellow,
        TokenColor::Magenta,
        TokenColor::Cyan,
    ];

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_types::TokenColor;
    ///
    /// assert_eq!(TokenColor::from_str("RED"), Some(TokenColor::Red));
    /// assert_eq!(TokenColor::from_str("m"), Some(TokenColor::Magenta));
    /// assert_eq!(TokenColor::from_str("white"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "red" | "r" => Some(TokenColor::Red),
            "green" | "g" => Some(TokenColor::Green),
            "blue" | "b" => Some(TokenColor::Blue),
            "yellow" | "y" => Some(TokenColor::Yellow),
            "magenta" | "m" => Some(TokenColor::Magenta),
            "cyan" | "c" => Some(TokenColor::Cyan),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenColor::Red => "red",
            TokenColor::Green => "green",
            TokenColor::Blue => "blue",
            TokenColor::Yellow => "yellow",
            TokenColor::Magenta => "magenta",
            TokenColor::Cyan => "cyan",
        }
    }

    /// Wire code (1-6). Zero is reserved for an empty cell.
    pub fn code(&self) -> u8 {
        match self {
            TokenColor::Red => 1,
            TokenColor::Green => 2,
            TokenColor::Blue => 3,
            TokenColor::Yellow => 4,
            TokenColor::Magenta => 5,
            TokenColor::Cyan => 6,
        }
    }

    /// Inverse of [`TokenColor::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(TokenColor::Red),
            2 => Some(TokenColor::Green),
            3 => Some(TokenColor::Blue),
            4 => Some(TokenColor::Yellow),
            5 => Some(TokenColor::Magenta),
            6 => Some(TokenColor::Cyan),
            _ => None,
        }
    }
}

impl fmt::Display for TokenColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell on the board
///
/// - `None`: Empty cell (only between removal and refill)
/// - `Some(TokenColor)`: Occupied cell
pub type Token = Option<TokenColor>;

/// Encode a token as its wire code (0 = empty).
pub fn token_code(token: Token) -> u8 {
    token.map(|c| c.code()).unwrap_or(0)
}

/// A `(row, column)` board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub column: usize,
}

impl Coord {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// True when the two coordinates differ by exactly one step on a single axis.
    ///
    /// A cell is never adjacent to itself.
    pub fn is_adjacent(&self, other: Coord) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.column.abs_diff(other.column);
        dr + dc == 1
    }

    /// Step one cell in `dir`, clamped to `rows x columns`.
    pub fn step(&self, dir: Direction, rows: usize, columns: usize) -> Coord {
        let mut next = *self;
        match dir {
            Direction::Up => next.row = next.row.saturating_sub(1),
            Direction::Down => {
                if next.row + 1 < rows {
                    next.row += 1;
                }
            }
            Direction::Left => next.column = next.column.saturating_sub(1),
            Direction::Right => {
                if next.column + 1 < columns {
                    next.column += 1;
                }
            }
        }
        next
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Per-cell selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected,
}

/// Visual emphasis a renderer should apply to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    /// Drawn in its own color.
    #[default]
    Normal,
    /// Drawn highlighted (selected).
    Highlighted,
}

/// Observable board event emitted by the session.
///
/// Events are ordered; a renderer that applies them in sequence to a copy of
/// the starting board ends up with the session's board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A cell became selected.
    CellHighlighted(Coord),
    /// A cell returned to its own color.
    CellRestored(Coord),
    /// Two cells exchanged tokens. Emitted twice for a reverted swap.
    CellsSwapped(Coord, Coord),
    /// Matched cells were emptied.
    CellsRemoved(BTreeSet<Coord>),
    /// Empty cells received fresh tokens.
    CellsRefilled(BTreeMap<Coord, TokenColor>),
}

impl BoardEvent {
    /// Short lowercase name (for logs and the AI protocol).
    pub fn kind_str(&self) -> &'static str {
        match self {
            BoardEvent::CellHighlighted(_) => "highlighted",
            BoardEvent::CellRestored(_) => "restored",
            BoardEvent::CellsSwapped(_, _) => "swapped",
            BoardEvent::CellsRemoved(_) => "removed",
            BoardEvent::CellsRefilled(_) => "refilled",
        }
    }

    /// Emphasis change carried by this event, if any.
    pub fn emphasis(&self) -> Option<(Coord, Emphasis)> {
        match self {
            BoardEvent::CellHighlighted(c) => Some((*c, Emphasis::Highlighted)),
            BoardEvent::CellRestored(c) => Some((*c, Emphasis::Normal)),
            _ => None,
        }
    }
}

/// Player-level actions produced by input handling.
///
/// These actions are used by both the terminal front-end and AI control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    /// Move the keyboard cursor one cell
    MoveCursor(Direction),
    /// Activate the cell under the keyboard cursor
    ActivateCursor,
    /// Activate a specific cell (pointer click)
    Activate(Coord),
    /// Start a fresh board
    Restart,
}
