//! Selection state machine
//!
//! Each cell is either Unselected or Selected; at most two cells are selected
//! at once. Activating an unselected cell selects it, activating a selected
//! cell deselects it. When a second cell is selected the pair is handed back
//! to the caller, which resolves (adjacent) or rejects (not adjacent) it and
//! then calls [`SelectionController::clear`].

use arrayvec::ArrayVec;

use crate::types::{Coord, SelectionState};

/// What an activation did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStep {
    /// The cell became selected; one cell is selected now.
    Selected(Coord),
    /// The cell was already selected and is now unselected.
    Deselected(Coord),
    /// The cell became selected and completed an adjacent pair.
    PairReady { first: Coord, second: Coord },
    /// The cell became selected but is not adjacent to the first one.
    PairRejected { first: Coord, second: Coord },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: ArrayVec<Coord, 2>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `coord`.
    pub fn activate(&mut self, coord: Coord) -> SelectionStep {
        if let Some(pos) = self.selected.iter().position(|c| *c == coord) {
            self.selected.remove(pos);
            return SelectionStep::Deselected(coord);
        }

        // A full pair is always cleared by the caller before the next activation.
        if self.selected.is_full() {
            self.selected.clear();
        }
        self.selected.push(coord);

        match self.selected.as_slice() {
            [first, second] if first.is_adjacent(*second) => SelectionStep::PairReady {
                first: *first,
                second: *second,
            },
            [first, second] => SelectionStep::PairRejected {
                first: *first,
                second: *second,
            },
            _ => SelectionStep::Selected(coord),
        }
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn state(&self, coord: Coord) -> SelectionState {
        if self.selected.contains(&coord) {
            SelectionState::Selected
        } else {
            SelectionState::Unselected
        }
    }

    pub fn selected(&self) -> &[Coord] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_single_cell() {
        let mut sel = SelectionController::new();
        let c = Coord::new(2, 3);
        assert_eq!(sel.activate(c), SelectionStep::Selected(c));
        assert_eq!(sel.state(c), SelectionState::Selected);
        assert_eq!(sel.activate(c), SelectionStep::Deselected(c));
        assert_eq!(sel.state(c), SelectionState::Unselected);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_adjacent_pair_is_ready() {
        let mut sel = SelectionController::new();
        sel.activate(Coord::new(1, 1));
        assert_eq!(
            sel.activate(Coord::new(1, 2)),
            SelectionStep::PairReady {
                first: Coord::new(1, 1),
                second: Coord::new(1, 2)
            }
        );
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn test_distant_pair_is_rejected() {
        let mut sel = SelectionController::new();
        sel.activate(Coord::new(0, 0));
        assert_eq!(
            sel.activate(Coord::new(2, 2)),
            SelectionStep::PairRejected {
                first: Coord::new(0, 0),
                second: Coord::new(2, 2)
            }
        );
    }

    #[test]
    fn test_reselecting_after_deselect() {
        let mut sel = SelectionController::new();
        sel.activate(Coord::new(0, 0));
        sel.activate(Coord::new(0, 0));
        assert_eq!(
            sel.activate(Coord::new(4, 4)),
            SelectionStep::Selected(Coord::new(4, 4))
        );
        assert_eq!(sel.selected(), &[Coord::new(4, 4)]);
    }
}
