//! Swap resolution - swap, detect, then keep or revert
//!
//! A kept swap removes every matched cell and refills the whole grid. A swap
//! that forms no run is undone by swapping the same two cells again. Either
//! way the grid is fully occupied when resolution returns.

use std::collections::BTreeMap;

use log::debug;

use crate::error::GridError;
use crate::grid::Grid;
use crate::matcher::{find_matches, MatchSet};
use crate::palette::Palette;
use crate::refill::refill;
use crate::rng::ColorSource;
use crate::types::{Coord, TokenColor};

/// Result of resolving one swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap formed at least one run.
    Kept {
        removed: MatchSet,
        refilled: BTreeMap<Coord, TokenColor>,
    },
    /// No run formed; the grid is back to its pre-swap arrangement.
    Reverted,
}

impl SwapOutcome {
    pub fn is_kept(&self) -> bool {
        matches!(self, SwapOutcome::Kept { .. })
    }
}

/// Resolve a swap between two adjacent cells.
pub fn resolve_swap<R: ColorSource + ?Sized>(
    grid: &mut Grid,
    palette: &Palette,
    rng: &mut R,
    a: Coord,
    b: Coord,
) -> Result<SwapOutcome, GridError> {
    if !a.is_adjacent(b) {
        return Err(GridError::NotAdjacent(a, b));
    }

    grid.swap(a, b)?;

    let removed = find_matches(grid);
    if removed.is_empty() {
        grid.swap(a, b)?;
        debug!("[Swap] {} <-> {} formed no run, reverted", a, b);
        return Ok(SwapOutcome::Reverted);
    }

    for coord in &removed {
        grid.set(*coord, None)?;
    }
    let refilled = refill(grid, palette, rng)?;
    debug!(
        "[Swap] {} <-> {} kept, removed {} cells",
        a,
        b,
        removed.len()
    );
    Ok(SwapOutcome::Kept { removed, refilled })
}

/// Resolve the swap described by a selection.
///
/// Fails with `InvalidSelection` unless exactly two cells are selected.
pub fn resolve_selection<R: ColorSource + ?Sized>(
    grid: &mut Grid,
    palette: &Palette,
    rng: &mut R,
    selected: &[Coord],
) -> Result<SwapOutcome, GridError> {
    match selected {
        [a, b] => resolve_swap(grid, palette, rng, *a, *b),
        _ => Err(GridError::InvalidSelection {
            selected: selected.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;
    use crate::types::TokenColor::*;

    fn scripted() -> SequenceSource {
        SequenceSource::new(vec![5, 4, 3])
    }

    #[test]
    fn test_swap_forming_run_is_kept() {
        // Swapping (0,2) and (1,2) completes a blue row on top.
        let mut grid = Grid::from_rows(&[
            [Blue, Blue, Red],
            [Green, Red, Blue],
            [Red, Green, Yellow],
        ])
        .unwrap();
        let outcome = resolve_swap(
            &mut grid,
            &Palette::default(),
            &mut scripted(),
            Coord::new(0, 2),
            Coord::new(1, 2),
        )
        .unwrap();

        match outcome {
            SwapOutcome::Kept { removed, refilled } => {
                let expected: MatchSet = [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)]
                    .into_iter()
                    .collect();
                assert_eq!(removed, expected);
                assert_eq!(refilled.len(), 3);
                assert_eq!(refilled[&Coord::new(0, 0)], Cyan);
                assert_eq!(refilled[&Coord::new(0, 1)], Magenta);
                assert_eq!(refilled[&Coord::new(0, 2)], Yellow);
            }
            SwapOutcome::Reverted => panic!("expected a kept swap"),
        }
        assert!(grid.is_full());
        assert_eq!(grid.get(Coord::new(1, 2)), Ok(Some(Red)));
    }

    #[test]
    fn test_swap_without_run_is_reverted() {
        let mut grid = Grid::from_rows(&[[Red, Blue, Green], [Yellow, Cyan, Magenta]]).unwrap();
        let before = grid.clone();
        let mut rng = scripted();
        let outcome = resolve_swap(
            &mut grid,
            &Palette::default(),
            &mut rng,
            Coord::new(0, 0),
            Coord::new(0, 1),
        )
        .unwrap();
        assert_eq!(outcome, SwapOutcome::Reverted);
        assert_eq!(grid, before);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_non_adjacent_is_rejected_without_mutation() {
        let mut grid = Grid::from_rows(&[[Red, Blue, Green]]).unwrap();
        let before = grid.clone();
        let err = resolve_swap(
            &mut grid,
            &Palette::default(),
            &mut scripted(),
            Coord::new(0, 0),
            Coord::new(0, 2),
        )
        .unwrap_err();
        assert_eq!(err, GridError::NotAdjacent(Coord::new(0, 0), Coord::new(0, 2)));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_short_selection_is_invalid() {
        let mut grid = Grid::from_rows(&[[Red, Blue, Green]]).unwrap();
        let err = resolve_selection(
            &mut grid,
            &Palette::default(),
            &mut scripted(),
            &[Coord::new(0, 0)],
        )
        .unwrap_err();
        assert_eq!(err, GridError::InvalidSelection { selected: 1 });
    }
}
