use std::collections::BTreeSet;

use match3_tui::core::{
    find_matches, initialize_board, ColorRng, refill, resolve_swap, GameConfig, GameSession, Grid, Palette,
    SequenceSource, SwapOutcome,
};
use match3_tui::types::{BoardEvent, Coord, SelectionState, TokenColor::*};

fn coords(list: &[(usize, usize)]) -> BTreeSet<Coord> {
    list.iter().map(|&(r, c)| Coord::new(r, c)).collect()
}

#[test]
fn detector_flags_only_the_blue_row() {
    let grid = Grid::from_rows(&[[Red, Red, Blue], [Blue, Blue, Blue], [Green, Red, Green]]).unwrap();
    assert_eq!(find_matches(&grid), coords(&[(1, 0), (1, 1), (1, 2)]));
}

#[test]
fn detector_flags_every_cell_of_a_long_run_and_crossings() {
    let grid = Grid::from_rows(&[
        [Red, Red, Red, Red],
        [Green, Blue, Red, Yellow],
        [Blue, Green, Red, Blue],
    ])
    .unwrap();
    assert_eq!(
        find_matches(&grid),
        coords(&[(0, 0), (0, 1), (0, 2), (0, 3), (1, 2), (2, 2)])
    );
}

#[test]
fn refill_fills_only_empty_cells_from_palette() {
    let mut grid = Grid::from_rows(&[[Red, Green, Blue], [Yellow, Red, Green], [Blue, Yellow, Red]]).unwrap();
    let before = grid.clone();
    grid.set(Coord::new(0, 0), None).unwrap();
    grid.set(Coord::new(0, 1), None).unwrap();

    let palette = Palette::new([Magenta, Cyan]).unwrap();
    let filled = refill(&mut grid, &palette, &mut SequenceSource::new(vec![0, 1])).unwrap();

    assert_eq!(filled.len(), 2);
    assert!(grid.is_full());
    for coord in grid.coords() {
        if coord.row == 0 && coord.column < 2 {
            let token = grid.get(coord).unwrap().unwrap();
            assert!(palette.contains(token));
        } else {
            assert_eq!(grid.get(coord).unwrap(), before.get(coord).unwrap());
        }
    }
}

#[test]
fn initial_board_is_full_and_run_free() {
    let config = GameConfig::default();
    for seed in 0..32 {
        let session = GameSession::new(&config, ColorRng::from_seed(seed)).unwrap();
        let grid = session.grid();
        assert!(grid.is_full());
        assert!(find_matches(grid).is_empty(), "seed {} left a run", seed);
        assert_eq!((grid.rows(), grid.columns()), (config.rows, config.columns));
    }
}

#[test]
fn initializer_uses_only_palette_colors() {
    let palette = Palette::new([Red, Green, Blue]).unwrap();
    let grid = initialize_board(4, 4, &palette, &mut ColorRng::from_seed(11)).unwrap();
    assert!(grid.cells().iter().all(|t| t.is_some_and(|c| palette.contains(c))));
}

#[test]
fn non_adjacent_pair_is_rejected_without_swapping() {
    let grid = Grid::from_rows(&[[Red, Green, Blue], [Yellow, Red, Green], [Blue, Yellow, Red]]).unwrap();
    let mut session = GameSession::with_grid(grid.clone(), Palette::default(), SequenceSource::new(vec![0]));

    session.on_cell_activated(Coord::new(0, 0)).unwrap();
    let events = session.on_cell_activated(Coord::new(2, 2)).unwrap();

    assert!(events.iter().all(|e| !matches!(e, BoardEvent::CellsSwapped(..))));
    assert_eq!(session.grid(), &grid);
    assert_eq!(session.selection_state(Coord::new(0, 0)), SelectionState::Unselected);
    assert_eq!(session.selection_state(Coord::new(2, 2)), SelectionState::Unselected);
    assert_eq!(session.stats().pairs_rejected, 1);
}

#[test]
fn fruitless_swap_restores_exact_arrangement() {
    let grid = Grid::from_rows(&[[Red, Green, Blue], [Yellow, Red, Green], [Blue, Yellow, Red]]).unwrap();
    let mut session = GameSession::with_grid(grid.clone(), Palette::default(), SequenceSource::new(vec![0]));

    session.on_cell_activated(Coord::new(0, 0)).unwrap();
    let events = session.on_cell_activated(Coord::new(0, 1)).unwrap();

    let swaps = events.iter().filter(|e| matches!(e, BoardEvent::CellsSwapped(..))).count();
    assert_eq!(swaps, 2);
    assert_eq!(session.grid(), &grid);
    assert_eq!(session.stats().swaps_reverted, 1);
    assert!(session.selected().is_empty());
}

#[test]
fn swap_outcome_is_repeatable_from_same_grid() {
    let start = Grid::from_rows(&[[Blue, Blue, Red], [Green, Red, Blue], [Red, Green, Yellow]]).unwrap();
    let palette = Palette::default();

    let mut first = start.clone();
    let a = resolve_swap(&mut first, &palette, &mut SequenceSource::new(vec![1]), Coord::new(0, 2), Coord::new(1, 2)).unwrap();
    let mut second = start.clone();
    let b = resolve_swap(&mut second, &palette, &mut SequenceSource::new(vec![4]), Coord::new(0, 2), Coord::new(1, 2)).unwrap();

    assert!(matches!(a, SwapOutcome::Kept { .. }));
    assert_eq!(a.is_kept(), b.is_kept());
}

#[test]
fn kept_swap_clears_run_and_refills_in_place() {
    let grid = Grid::from_rows(&[[Blue, Blue, Red], [Green, Red, Blue], [Red, Green, Yellow]]).unwrap();
    let mut session = GameSession::with_grid(grid, Palette::default(), SequenceSource::new(vec![5, 4, 3]));

    session.on_cell_activated(Coord::new(0, 2)).unwrap();
    let events = session.on_cell_activated(Coord::new(1, 2)).unwrap();

    let removed = events.iter().find_map(|e| match e {
        BoardEvent::CellsRemoved(cells) => Some(cells.clone()),
        _ => None,
    });
    assert_eq!(removed, Some(coords(&[(0, 0), (0, 1), (0, 2)])));
    assert!(session.grid().is_full());
    assert_eq!(session.stats().swaps_kept, 1);
    assert_eq!(session.stats().tokens_cleared, 3);
    assert!(session.selected().is_empty());
}
