//! Grid module - owns the board state
//!
//! The grid is `rows x columns` cells, each holding a [`Token`] (a color, or
//! empty between removal and refill). Storage is a flat row-major vector.
//! Coordinates: `(row, column)`, row 0 at the top, column 0 on the left.

use crate::error::GridError;
use crate::types::{Coord, Token, TokenColor};

/// The board - single source of truth for every cell's token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    columns: usize,
    /// Flat array of cells, row-major order (row * columns + column)
    cells: Vec<Token>,
}

impl Grid {
    /// Create an all-empty grid.
    pub fn empty(rows: usize, columns: usize) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::InvalidDimensions { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
        })
    }

    /// Build a fully occupied grid from rows of colors.
    ///
    /// Every row must have the same, non-zero length.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, GridError>
    where
        R: AsRef<[TokenColor]>,
    {
        let columns = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut grid = Self::empty(rows.len(), columns)?;
        for (row, colors) in rows.iter().enumerate() {
            let colors = colors.as_ref();
            if colors.len() != columns {
                return Err(GridError::InvalidDimensions {
                    rows: rows.len(),
                    columns: colors.len(),
                });
            }
            for (column, color) in colors.iter().enumerate() {
                grid.cells[row * columns + column] = Some(*color);
            }
        }
        Ok(grid)
    }

    #[inline(always)]
    fn index(&self, coord: Coord) -> Result<usize, GridError> {
        if coord.row >= self.rows || coord.column >= self.columns {
            return Err(GridError::OutOfBounds {
                coord,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(coord.row * self.columns + coord.column)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.column < self.columns
    }

    /// Token at `coord`.
    pub fn get(&self, coord: Coord) -> Result<Token, GridError> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Overwrite the token at `coord`.
    pub fn set(&mut self, coord: Coord, token: Token) -> Result<(), GridError> {
        let i = self.index(coord)?;
        self.cells[i] = token;
        Ok(())
    }

    /// Exchange the tokens at `a` and `b`.
    ///
    /// Both coordinates are validated before anything moves. Swapping twice
    /// restores the original arrangement.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<(), GridError> {
        let ia = self.index(a)?;
        let ib = self.index(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Token at `(row, column)` for in-bounds scans.
    ///
    /// Only for loops already bounded by `rows()`/`columns()`.
    #[inline(always)]
    pub(crate) fn at(&self, row: usize, column: usize) -> Token {
        self.cells[row * self.columns + column]
    }

    /// All coordinates, row-major.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let columns = self.columns;
        (0..self.rows * self.columns).map(move |i| Coord::new(i / columns, i % columns))
    }

    /// Coordinates of empty cells, row-major.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(move |c| self.cells[c.row * self.columns + c.column].is_none())
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Token] {
        &self.cells
    }

    /// Copy out as rows of tokens.
    pub fn to_rows(&self) -> Vec<Vec<Token>> {
        self.cells.chunks(self.columns).map(|r| r.to_vec()).collect()
    }
}
