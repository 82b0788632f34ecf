//! Render-side mirror of the board.
//!
//! The presenter never reads the session grid after a reset; it only changes
//! by applying released [`BoardEvent`]s. Once every staged event has been
//! released it holds the same tokens as the session.

use crate::core::Grid;
use crate::types::{BoardEvent, Coord, Emphasis, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presenter {
    rows: usize,
    columns: usize,
    tokens: Vec<Token>,
    emphasis: Vec<Emphasis>,
}

impl Presenter {
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            rows: grid.rows(),
            columns: grid.columns(),
            tokens: grid.cells().to_vec(),
            emphasis: vec![Emphasis::Normal; grid.cells().len()],
        }
    }

    /// Discard the mirror and copy `grid` again.
    pub fn reset(&mut self, grid: &Grid) {
        *self = Self::from_grid(grid);
    }

    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row < self.rows && coord.column < self.columns {
            Some(coord.row * self.columns + coord.column)
        } else {
            None
        }
    }

    /// Apply one event. Coordinates outside the board are ignored.
    pub fn apply(&mut self, event: &BoardEvent) {
        match event {
            BoardEvent::CellHighlighted(_) | BoardEvent::CellRestored(_) => {
                if let Some((coord, emphasis)) = event.emphasis() {
                    if let Some(i) = self.index(coord) {
                        self.emphasis[i] = emphasis;
                    }
                }
            }
            BoardEvent::CellsSwapped(a, b) => {
                if let (Some(i), Some(j)) = (self.index(*a), self.index(*b)) {
                    self.tokens.swap(i, j);
                }
            }
            BoardEvent::CellsRemoved(cells) => {
                for coord in cells {
                    if let Some(i) = self.index(*coord) {
                        self.tokens[i] = None;
                    }
                }
            }
            BoardEvent::CellsRefilled(cells) => {
                for (coord, color) in cells {
                    if let Some(i) = self.index(*coord) {
                        self.tokens[i] = Some(*color);
                    }
                }
            }
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn token(&self, coord: Coord) -> Token {
        self.index(coord).and_then(|i| self.tokens[i])
    }

    pub fn emphasis(&self, coord: Coord) -> Emphasis {
        self.index(coord)
            .map(|i| self.emphasis[i])
            .unwrap_or_default()
    }

    /// True when the mirrored tokens equal `grid`.
    pub fn matches(&self, grid: &Grid) -> bool {
        self.rows == grid.rows() && self.columns == grid.columns() && self.tokens == grid.cells()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenColor::*;

    #[test]
    fn test_events_update_mirror() {
        let grid = Grid::from_rows(&[[Red, Blue], [Green, Yellow]]).unwrap();
        let mut p = Presenter::from_grid(&grid);

        p.apply(&BoardEvent::CellHighlighted(Coord::new(0, 1)));
        assert_eq!(p.emphasis(Coord::new(0, 1)), Emphasis::Highlighted);

        p.apply(&BoardEvent::CellsSwapped(Coord::new(0, 0), Coord::new(0, 1)));
        assert_eq!(p.token(Coord::new(0, 0)), Some(Blue));
        assert_eq!(p.token(Coord::new(0, 1)), Some(Red));

        p.apply(&BoardEvent::CellsRemoved([Coord::new(1, 0)].into_iter().collect()));
        assert_eq!(p.token(Coord::new(1, 0)), None);

        p.apply(&BoardEvent::CellsRefilled(
            [(Coord::new(1, 0), Cyan)].into_iter().collect(),
        ));
        assert_eq!(p.token(Coord::new(1, 0)), Some(Cyan));

        p.apply(&BoardEvent::CellRestored(Coord::new(0, 1)));
        assert_eq!(p.emphasis(Coord::new(0, 1)), Emphasis::Normal);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let grid = Grid::from_rows(&[[Red, Blue]]).unwrap();
        let mut p = Presenter::from_grid(&grid);
        p.apply(&BoardEvent::CellHighlighted(Coord::new(5, 5)));
        p.apply(&BoardEvent::CellsSwapped(Coord::new(0, 0), Coord::new(9, 9)));
        assert!(p.matches(&grid));
        assert_eq!(p.emphasis(Coord::new(5, 5)), Emphasis::Normal);
    }
}
