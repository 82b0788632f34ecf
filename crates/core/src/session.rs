//! Game session - the single entry point driven by player input
//!
//! The session owns the grid, the palette, the selection state machine and
//! the color source, and turns each cell activation into an ordered list of
//! [`BoardEvent`]s for the presentation layer:
//!
//! - first click: `CellHighlighted`
//! - click on a selected cell: `CellRestored`
//! - second click, not adjacent: `CellHighlighted`, then `CellRestored` for both
//! - second click, adjacent: `CellHighlighted`, `CellsSwapped`, then either
//!   `CellsRemoved` + `CellsRefilled` (kept) or a second `CellsSwapped`
//!   (reverted), then `CellRestored` for both
//!
//! Every call completes fully before returning; the grid is fully occupied
//! between calls.

use log::{debug, info};

use crate::config::GameConfig;
use crate::error::GridError;
use crate::grid::Grid;
use crate::init::initialize_board;
use crate::palette::Palette;
use crate::rng::{ColorRng, ColorSource};
use crate::selection::{SelectionController, SelectionStep};
use crate::swap::{resolve_selection, SwapOutcome};
use crate::types::{BoardEvent, Coord, SelectionState};

/// Running counters for the current board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SessionStats {
    pub swaps_attempted: u32,
    pub swaps_kept: u32,
    pub swaps_reverted: u32,
    pub pairs_rejected: u32,
    pub tokens_cleared: u32,
}

/// Complete board session.
#[derive(Debug, Clone)]
pub struct GameSession<R: ColorSource = ColorRng> {
    grid: Grid,
    palette: Palette,
    selection: SelectionController,
    rng: R,
    stats: SessionStats,
    /// Monotonic board id (increments on restart).
    board_id: u32,
}

impl GameSession<ColorRng> {
    /// Build a session from configuration, seeding from `config.seed`.
    pub fn from_config(config: &GameConfig) -> Result<Self, GridError> {
        Self::new(config, ColorRng::new(config.seed))
    }
}

impl<R: ColorSource> GameSession<R> {
    /// Create a session on a freshly initialized, run-free board.
    pub fn new(config: &GameConfig, mut rng: R) -> Result<Self, GridError> {
        let grid = initialize_board(config.rows, config.columns, &config.palette, &mut rng)?;
        info!("[Session] new {}x{} board", config.rows, config.columns);
        Ok(Self::with_grid(grid, config.palette.clone(), rng))
    }

    /// Create a session on an existing grid (scripted scenarios, replays).
    pub fn with_grid(grid: Grid, palette: Palette, rng: R) -> Self {
        Self {
            grid,
            palette,
            selection: SelectionController::new(),
            rng,
            stats: SessionStats::default(),
            board_id: 0,
        }
    }

    /// Handle a player activation of `coord`.
    ///
    /// Fails with `OutOfBounds` (and changes nothing) when `coord` is not on
    /// the board.
    pub fn on_cell_activated(&mut self, coord: Coord) -> Result<Vec<BoardEvent>, GridError> {
        self.grid.get(coord)?;

        let mut events = Vec::with_capacity(6);
        match self.selection.activate(coord) {
            SelectionStep::Selected(c) => events.push(BoardEvent::CellHighlighted(c)),
            SelectionStep::Deselected(c) => events.push(BoardEvent::CellRestored(c)),
            SelectionStep::PairRejected { first, second } => {
                debug!("[Session] {} and {} are not adjacent", first, second);
                self.selection.clear();
                self.stats.pairs_rejected += 1;
                events.push(BoardEvent::CellHighlighted(second));
                events.push(BoardEvent::CellRestored(first));
                events.push(BoardEvent::CellRestored(second));
            }
            SelectionStep::PairReady { first, second } => {
                events.push(BoardEvent::CellHighlighted(second));
                let result = resolve_selection(
                    &mut self.grid,
                    &self.palette,
                    &mut self.rng,
                    self.selection.selected(),
                );
                self.selection.clear();

                match result {
                    Ok(SwapOutcome::Kept { removed, refilled }) => {
                        self.stats.swaps_attempted += 1;
                        self.stats.swaps_kept += 1;
                        self.stats.tokens_cleared += removed.len() as u32;
                        info!(
                            "[Session] swap {} <-> {} cleared {} tokens",
                            first,
                            second,
                            removed.len()
                        );
                        events.push(BoardEvent::CellsSwapped(first, second));
                        events.push(BoardEvent::CellsRemoved(removed));
                        events.push(BoardEvent::CellsRefilled(refilled));
                    }
                    Ok(SwapOutcome::Reverted) => {
                        self.stats.swaps_attempted += 1;
                        self.stats.swaps_reverted += 1;
                        events.push(BoardEvent::CellsSwapped(first, second));
                        events.push(BoardEvent::CellsSwapped(first, second));
                    }
                    Err(GridError::InvalidSelection { selected }) => {
                        debug!("[Session] ignoring swap with {} selected cells", selected);
                    }
                    Err(e) => return Err(e),
                }

                events.push(BoardEvent::CellRestored(first));
                events.push(BoardEvent::CellRestored(second));
            }
        }

        Ok(events)
    }

    /// Replace the board with a fresh run-free one and reset selection and stats.
    pub fn restart(&mut self) -> Result<(), GridError> {
        let grid = initialize_board(
            self.grid.rows(),
            self.grid.columns(),
            &self.palette,
            &mut self.rng,
        )?;
        self.grid = grid;
        self.selection.clear();
        self.stats = SessionStats::default();
        self.board_id = self.board_id.wrapping_add(1);
        info!("[Session] restarted, board {}", self.board_id);
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn selected(&self) -> &[Coord] {
        self.selection.selected()
    }

    pub fn selection_state(&self, coord: Coord) -> SelectionState {
        self.selection.state(coord)
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn board_id(&self) -> u32 {
        self.board_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;
    use crate::types::TokenColor::*;

    fn session(rows: &[[crate::types::TokenColor; 3]]) -> GameSession<SequenceSource> {
        GameSession::with_grid(
            Grid::from_rows(rows).unwrap(),
            Palette::default(),
            SequenceSource::new(vec![0, 1, 2]),
        )
    }

    #[test]
    fn test_out_of_bounds_activation_changes_nothing() {
        let mut s = session(&[[Red, Blue, Green]]);
        let err = s.on_cell_activated(Coord::new(1, 0)).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { .. }));
        assert!(s.selected().is_empty());
    }

    #[test]
    fn test_rejected_pair_counts() {
        let mut s = session(&[[Red, Blue, Green]]);
        s.on_cell_activated(Coord::new(0, 0)).unwrap();
        let events = s.on_cell_activated(Coord::new(0, 2)).unwrap();
        assert_eq!(
            events,
            vec![
                BoardEvent::CellHighlighted(Coord::new(0, 2)),
                BoardEvent::CellRestored(Coord::new(0, 0)),
                BoardEvent::CellRestored(Coord::new(0, 2)),
            ]
        );
        assert_eq!(s.stats().pairs_rejected, 1);
        assert_eq!(s.stats().swaps_attempted, 0);
    }

    #[test]
    fn test_restart_resets_state() {
        let config = GameConfig {
            rows: 4,
            columns: 4,
            ..GameConfig::default()
        };
        let mut s = GameSession::new(&config, SequenceSource::new(vec![0, 1, 2, 3, 4])).unwrap();
        s.on_cell_activated(Coord::new(0, 0)).unwrap();
        s.restart().unwrap();
        assert!(s.selected().is_empty());
        assert_eq!(s.board_id(), 1);
        assert_eq!(s.stats(), SessionStats::default());
        assert!(s.grid().is_full());
    }

    #[test]
    fn test_restart_draws_from_configured_palette() {
        let palette = Palette::new([Magenta, Cyan, Yellow]).unwrap();
        let config = GameConfig {
            rows: 4,
            columns: 4,
            palette: palette.clone(),
            seed: Some(11),
        };
        let mut s = GameSession::new(&config, ColorRng::from_seed(11)).unwrap();
        s.restart().unwrap();
        assert_eq!(s.palette(), &palette);
        for coord in s.grid().coords() {
            let token = s.grid().get(coord).unwrap().unwrap();
            assert!(s.palette().contains(token));
        }
    }

    #[test]
    fn test_constant_source_setup_fails_instead_of_hanging() {
        let config = GameConfig {
            rows: 3,
            columns: 3,
            ..GameConfig::default()
        };
        let err = GameSession::new(&config, SequenceSource::new(vec![0])).unwrap_err();
        assert!(matches!(err, GridError::InitializationExhausted { .. }));
    }
}
