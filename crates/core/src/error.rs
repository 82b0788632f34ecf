//! Error type for board operations.
//!
//! Every failure here is an internal invariant violation: a caller handed the
//! core something the presentation layer should never produce. An operation
//! that returns an error has not mutated the grid.

use std::fmt;

use crate::types::Coord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Coordinate outside `[0, rows) x [0, columns)`.
    OutOfBounds {
        coord: Coord,
        rows: usize,
        columns: usize,
    },
    /// A swap was requested with fewer than two selected cells.
    InvalidSelection { selected: usize },
    /// A swap was requested for two cells that are not neighbours.
    NotAdjacent(Coord, Coord),
    /// Zero-area board.
    InvalidDimensions { rows: usize, columns: usize },
    /// Palette with too few distinct colors to ever recolor a cell.
    InvalidPalette { distinct: usize },
    /// Board setup kept finding runs after the pass cap.
    InitializationExhausted { passes: u32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds {
                coord,
                rows,
                columns,
            } => write!(f, "coordinate {coord} is outside a {rows}x{columns} grid"),
            GridError::InvalidSelection { selected } => {
                write!(f, "swap needs two selected cells, got {selected}")
            }
            GridError::NotAdjacent(a, b) => write!(f, "cells {a} and {b} are not adjacent"),
            GridError::InvalidDimensions { rows, columns } => {
                write!(f, "invalid grid dimensions {rows}x{columns}")
            }
            GridError::InvalidPalette { distinct } => write!(
                f,
                "palette needs at least 2 distinct colors, got {distinct}"
            ),
            GridError::InitializationExhausted { passes } => {
                write!(f, "board still had runs after {passes} recolor passes")
            }
        }
    }
}

impl std::error::Error for GridError {}
