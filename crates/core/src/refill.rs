//! Refill - gives every empty cell a fresh token
//!
//! Refilled cells stay at their own coordinate (no column drop) and the board
//! is not re-checked afterwards; runs created by a refill stay on the board
//! until a later swap resolves them.

use std::collections::BTreeMap;

use crate::error::GridError;
use crate::grid::Grid;
use crate::palette::Palette;
use crate::rng::ColorSource;
use crate::types::{Coord, TokenColor};

/// Fill every empty cell with an independently drawn color.
///
/// Returns the new tokens keyed by coordinate; occupied cells are untouched.
pub fn refill<R: ColorSource + ?Sized>(
    grid: &mut Grid,
    palette: &Palette,
    rng: &mut R,
) -> Result<BTreeMap<Coord, TokenColor>, GridError> {
    let empties: Vec<Coord> = grid.empty_cells().collect();
    let mut filled = BTreeMap::new();
    for coord in empties {
        let color = rng.draw(palette);
        grid.set(coord, Some(color))?;
        filled.insert(coord, color);
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;
    use crate::types::TokenColor::*;

    #[test]
    fn test_refill_full_grid_is_noop() {
        let mut grid = Grid::from_rows(&[[Red, Blue]]).unwrap();
        let before = grid.clone();
        let mut rng = SequenceSource::new(vec![0]);
        let filled = refill(&mut grid, &Palette::default(), &mut rng).unwrap();
        assert!(filled.is_empty());
        assert_eq!(grid, before);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_refill_draws_in_row_major_order() {
        let mut grid = Grid::empty(2, 2).unwrap();
        let mut rng = SequenceSource::new(vec![0, 1, 2, 3]);
        let filled = refill(&mut grid, &Palette::default(), &mut rng).unwrap();
        assert_eq!(filled.get(&Coord::new(0, 0)), Some(&Red));
        assert_eq!(filled.get(&Coord::new(0, 1)), Some(&Green));
        assert_eq!(filled.get(&Coord::new(1, 0)), Some(&Blue));
        assert_eq!(filled.get(&Coord::new(1, 1)), Some(&Yellow));
        assert!(grid.is_full());
    }

    #[test]
    fn test_refill_reports_every_written_cell() -> Result<(), GridError> {
        let mut grid = Grid::from_rows(&[[Red, Blue, Red], [Blue, Red, Blue]])?;
        grid.set(Coord::new(0, 1), None)?;
        grid.set(Coord::new(1, 2), None)?;

        let mut rng = SequenceSource::new(vec![3, 5]);
        let filled = refill(&mut grid, &Palette::default(), &mut rng)?;

        assert_eq!(filled.len(), 2);
        for (coord, color) in &filled {
            assert_eq!(grid.get(*coord)?, Some(*color));
        }
        assert_eq!(grid.get(Coord::new(0, 1))?, Some(Yellow));
        assert_eq!(grid.get(Coord::new(1, 2))?, Some(Cyan));
        Ok(())
    }
}
