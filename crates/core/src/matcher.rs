//! Match detection - finds every cell that belongs to a run
//!
//! A run is three or more equal, occupied tokens in one row or one column.
//! Detection slides a 3-cell window: a cell whose two predecessors (left, or
//! above) hold its color flags all three cells of that window. Longer runs
//! are covered by overlapping windows, so every member is flagged without
//! ever measuring run length.

use std::collections::BTreeSet;

use crate::grid::Grid;
use crate::types::{Coord, MIN_RUN};

/// Coordinates participating in at least one run, ordered row-major.
pub type MatchSet = BTreeSet<Coord>;

/// Find all cells in a horizontal or vertical run of `MIN_RUN` or more.
///
/// Pure and deterministic. Empty cells never match.
pub fn find_matches(grid: &Grid) -> MatchSet {
    let mut matched = MatchSet::new();
    let back = MIN_RUN - 1;

    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let Some(color) = grid.at(row, column) else {
                continue;
            };

            // Horizontal window ending here.
            if column >= back && (1..=back).all(|d| grid.at(row, column - d) == Some(color)) {
                for d in 0..=back {
                    matched.insert(Coord::new(row, column - d));
                }
            }

            // Vertical window ending here.
            if row >= back && (1..=back).all(|d| grid.at(row - d, column) == Some(color)) {
                for d in 0..=back {
                    matched.insert(Coord::new(row - d, column));
                }
            }
        }
    }

    matched
}

/// True if any run exists. Stops at the first window found.
pub fn has_matches(grid: &Grid) -> bool {
    let back = MIN_RUN - 1;
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let Some(color) = grid.at(row, column) else {
                continue;
            };
            if column >= back && (1..=back).all(|d| grid.at(row, column - d) == Some(color)) {
                return true;
            }
            if row >= back && (1..=back).all(|d| grid.at(row - d, column) == Some(color)) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenColor::*;

    #[test]
    fn test_no_match_on_checkerboard() {
        let grid = Grid::from_rows(&[[Red, Blue, Red], [Blue, Red, Blue], [Red, Blue, Red]]).unwrap();
        assert!(find_matches(&grid).is_empty());
        assert!(!has_matches(&grid));
    }

    #[test]
    fn test_vertical_run() {
        let grid = Grid::from_rows(&[[Red, Blue], [Red, Green], [Red, Blue]]).unwrap();
        let m = find_matches(&grid);
        let expected: MatchSet = [Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]
            .into_iter()
            .collect();
        assert_eq!(m, expected);
    }

    #[test]
    fn test_run_of_four_flags_every_member() {
        let grid = Grid::from_rows(&[[Green, Green, Green, Green, Blue]]).unwrap();
        let m = find_matches(&grid);
        assert_eq!(m.len(), 4);
        assert!(!m.contains(&Coord::new(0, 4)));
    }

    #[test]
    fn test_cross_shaped_runs_share_a_cell() {
        let grid = Grid::from_rows(&[
            [Blue, Red, Green],
            [Red, Red, Red],
            [Green, Red, Blue],
        ])
        .unwrap();
        let m = find_matches(&grid);
        assert_eq!(m.len(), 5);
        assert!(m.contains(&Coord::new(1, 1)));
        assert!(m.contains(&Coord::new(0, 1)));
        assert!(m.contains(&Coord::new(2, 1)));
    }

    #[test]
    fn test_empty_cells_never_match() {
        let mut grid = Grid::from_rows(&[[Red, Red, Red]]).unwrap();
        grid.set(Coord::new(0, 1), None).unwrap();
        assert!(find_matches(&grid).is_empty());

        let all_empty = Grid::empty(3, 3).unwrap();
        assert!(find_matches(&all_empty).is_empty());
    }

    #[test]
    fn test_two_in_a_row_is_not_a_run() {
        let grid = Grid::from_rows(&[[Red, Red], [Blue, Blue]]).unwrap();
        assert!(!has_matches(&grid));
    }
}
