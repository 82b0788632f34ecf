//! Paced board engine.
//!
//! The core session resolves an activation in one synchronous call. This
//! crate stages the resulting events and releases them over time so a player
//! can watch the selection, the swap, the removal and the refill:
//!
//! ```text
//! activate ──> GameSession::on_cell_activated ──> [staged events]
//!                                                       │ tick(elapsed)
//!                                                       v
//!                                              Presenter (render mirror)
//! ```
//!
//! While events are staged the engine is busy and further activations are
//! answered with [`Activation::Busy`] without touching the session.
//!
//! # Example
//!
//! ```
//! use match3_core::{ColorRng, GameConfig, GameSession};
//! use match3_engine::{Activation, Engine, NoPacing};
//! use match3_types::Coord;
//!
//! let session = GameSession::new(&GameConfig::default(), ColorRng::from_seed(3)).unwrap();
//! let mut engine = Engine::new(session, NoPacing);
//!
//! assert_eq!(engine.activate(Coord::new(0, 0)).unwrap(), Activation::Accepted);
//! let released = engine.tick(0);
//! assert_eq!(released.len(), 1);
//! assert!(!engine.is_busy());
//! ```

pub mod pacing;
pub mod presenter;

use std::collections::VecDeque;

use log::debug;

pub use match3_core as core;
pub use match3_types as types;

pub use pacing::{FixedPacing, NoPacing, Pacing};
pub use presenter::Presenter;

use crate::core::{ColorRng, ColorSource, GameSession, GridError};
use crate::types::{BoardAction, BoardEvent, Coord};

/// Result of offering an activation to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Resolved by the session; its events are staged.
    Accepted,
    /// A previous resolution is still being presented; nothing changed.
    Busy,
}

#[derive(Debug)]
pub struct Engine<R: ColorSource = ColorRng, P: Pacing = FixedPacing> {
    session: GameSession<R>,
    pacing: P,
    presenter: Presenter,
    /// Staged events with the delay each waits after its predecessor.
    pending: VecDeque<(u32, BoardEvent)>,
    /// Time accumulated toward the head of `pending`.
    waited_ms: u32,
    cursor: Coord,
}

impl<R: ColorSource, P: Pacing> Engine<R, P> {
    pub fn new(session: GameSession<R>, pacing: P) -> Self {
        let presenter = Presenter::from_grid(session.grid());
        Self {
            session,
            pacing,
            presenter,
            pending: VecDeque::new(),
            waited_ms: 0,
            cursor: Coord::new(0, 0),
        }
    }

    /// True while staged events remain.
    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Offer a cell activation.
    ///
    /// Out-of-bounds coordinates fail with `OutOfBounds` even when busy.
    pub fn activate(&mut self, coord: Coord) -> Result<Activation, GridError> {
        self.session.grid().get(coord)?;
        if self.is_busy() {
            debug!("[Engine] busy, dropping activation of {}", coord);
            return Ok(Activation::Busy);
        }

        let events = self.session.on_cell_activated(coord)?;
        let mut previous: Option<&BoardEvent> = None;
        let mut staged = Vec::with_capacity(events.len());
        for event in &events {
            staged.push(self.pacing.delay_ms(previous, event));
            previous = Some(event);
        }
        self.pending.extend(staged.into_iter().zip(events));
        self.waited_ms = 0;
        Ok(Activation::Accepted)
    }

    /// Advance presentation time and release every event that is due.
    pub fn tick(&mut self, elapsed_ms: u32) -> Vec<BoardEvent> {
        let mut released = Vec::new();
        if self.pending.is_empty() {
            return released;
        }

        self.waited_ms = self.waited_ms.saturating_add(elapsed_ms);
        while let Some((delay, _)) = self.pending.front() {
            if self.waited_ms < *delay {
                break;
            }
            self.waited_ms -= *delay;
            if let Some((_, event)) = self.pending.pop_front() {
                self.presenter.apply(&event);
                released.push(event);
            }
        }

        if self.pending.is_empty() {
            self.waited_ms = 0;
        }
        released
    }

    /// Release every staged event now, ignoring delays.
    pub fn flush(&mut self) -> Vec<BoardEvent> {
        let released: Vec<BoardEvent> = self.pending.drain(..).map(|(_, e)| e).collect();
        for event in &released {
            self.presenter.apply(event);
        }
        self.waited_ms = 0;
        released
    }

    /// Start a fresh board, dropping anything still staged.
    pub fn restart(&mut self) -> Result<(), GridError> {
        self.session.restart()?;
        self.pending.clear();
        self.waited_ms = 0;
        self.presenter.reset(self.session.grid());
        Ok(())
    }

    /// Apply a front-end action.
    ///
    /// Cursor moves always succeed; activations and restarts behave like
    /// [`Engine::activate`] and [`Engine::restart`].
    pub fn dispatch(&mut self, action: BoardAction) -> Result<Activation, GridError> {
        match action {
            BoardAction::MoveCursor(dir) => {
                let grid = self.session.grid();
                self.cursor = self.cursor.step(dir, grid.rows(), grid.columns());
                Ok(Activation::Accepted)
            }
            BoardAction::ActivateCursor => self.activate(self.cursor),
            BoardAction::Activate(coord) => {
                let result = self.activate(coord)?;
                self.cursor = coord;
                Ok(result)
            }
            BoardAction::Restart => {
                self.restart()?;
                Ok(Activation::Accepted)
            }
        }
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }
}
