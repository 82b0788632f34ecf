//! Board setup - random fill followed by in-place recoloring
//!
//! Setup never removes tokens. Each pass detects runs and redraws every
//! flagged cell with a color different from what it was (one draw per cell);
//! passes repeat until one flags nothing. The pass count is capped at
//! [`MAX_INIT_PASSES`], so setup always terminates.

use log::debug;

use crate::error::GridError;
use crate::grid::Grid;
use crate::matcher::find_matches;
use crate::palette::Palette;
use crate::rng::ColorSource;
use crate::types::MAX_INIT_PASSES;

/// Build a fully occupied, run-free grid.
pub fn initialize_board<R: ColorSource + ?Sized>(
    rows: usize,
    columns: usize,
    palette: &Palette,
    rng: &mut R,
) -> Result<Grid, GridError> {
    initialize_board_with_cap(rows, columns, palette, rng, MAX_INIT_PASSES)
}

/// [`initialize_board`] with an explicit pass cap.
pub fn initialize_board_with_cap<R: ColorSource + ?Sized>(
    rows: usize,
    columns: usize,
    palette: &Palette,
    rng: &mut R,
    max_passes: u32,
) -> Result<Grid, GridError> {
    let mut grid = Grid::empty(rows, columns)?;
    let coords: Vec<_> = grid.coords().collect();
    for coord in coords {
        grid.set(coord, Some(rng.draw(palette)))?;
    }

    let mut passes = 0u32;
    loop {
        let flagged = find_matches(&grid);
        if flagged.is_empty() {
            debug!(
                "[Init] {}x{} board settled after {} recolor passes",
                rows, columns, passes
            );
            return Ok(grid);
        }
        if passes >= max_passes {
            return Err(GridError::InitializationExhausted { passes });
        }
        passes += 1;

        for coord in flagged {
            let next = match grid.get(coord)? {
                Some(prior) => rng.draw_except(palette, prior),
                None => rng.draw(palette),
            };
            grid.set(coord, Some(next))?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::has_matches;
    use crate::rng::{ColorRng, SequenceSource};
    use crate::types::TokenColor;

    #[test]
    fn test_initialized_board_is_full_and_run_free() {
        for seed in 0..50u64 {
            let mut rng = ColorRng::from_seed(seed);
            let grid = initialize_board(6, 5, &Palette::default(), &mut rng).unwrap();
            assert!(grid.is_full());
            assert!(!has_matches(&grid), "seed {seed} left a run");
        }
    }

    #[test]
    fn test_recolor_changes_flagged_cells() {
        // First 3 draws fill a 1x3 row with red; the row is one run.
        // Redraws pick among the five other colors, offset past red.
        let mut rng = SequenceSource::new(vec![0, 0, 0, 1, 0, 2]);
        let grid = initialize_board(1, 3, &Palette::default(), &mut rng).unwrap();
        assert_eq!(
            grid.to_rows(),
            vec![vec![
                Some(TokenColor::Blue),
                Some(TokenColor::Green),
                Some(TokenColor::Yellow)
            ]]
        );
        assert_eq!(rng.draws(), 6);
    }

    #[test]
    fn test_constant_source_hits_pass_cap() {
        // Every draw returns index 0: each pass turns the whole row into the
        // next color, which is again a run.
        let mut rng = SequenceSource::new(vec![0]);
        let err = initialize_board_with_cap(1, 3, &Palette::default(), &mut rng, 4).unwrap_err();
        assert_eq!(err, GridError::InitializationExhausted { passes: 4 });
        assert_eq!(rng.draws(), 3 + 4 * 3);
    }

    #[test]
    fn test_pass_cap_fails_safe() {
        // With two colors every redraw flips red and blue together, so every
        // pass recreates the run.
        let palette = Palette::new([TokenColor::Red, TokenColor::Blue]).unwrap();
        let mut rng = SequenceSource::new(vec![0, 0, 0, 1, 1, 1]);
        let err = initialize_board_with_cap(1, 3, &palette, &mut rng, 4).unwrap_err();
        assert_eq!(err, GridError::InitializationExhausted { passes: 4 });
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut rng = ColorRng::from_seed(1);
        assert!(initialize_board(0, 5, &Palette::default(), &mut rng).is_err());
    }
}
