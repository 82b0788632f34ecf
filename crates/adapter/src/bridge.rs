//! Game-loop side of the adapter.
//!
//! [`Bridge`] applies inbound commands to an [`Engine`] and turns the results
//! into outbound protocol messages. It owns the server-side sequence counter
//! for observations and events. Nothing here touches the network, so the
//! whole command path can be tested synchronously.

use std::hash::{Hash, Hasher};

use log::debug;

use crate::engine::{Activation, Engine, Pacing};
use crate::core::{ColorSource, GridError};
use crate::protocol::*;
use crate::runtime::{ClientCommand, InboundCommand, InboundPayload, OutboundMessage};
use crate::types::{token_code, BoardEvent};

/// Stable 64-bit FNV-1a hasher for deterministic `state_hash`.
///
/// `DefaultHasher` output is not guaranteed stable across Rust versions.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Build an observation of the session's authoritative board.
pub fn build_observation<R: ColorSource, P: Pacing>(engine: &Engine<R, P>, seq: u64) -> ObservationMessage {
    let session = engine.session();
    let grid = session.grid();

    let cells: Vec<Vec<u8>> = grid
        .to_rows()
        .into_iter()
        .map(|row| row.into_iter().map(token_code).collect())
        .collect();
    let selected: Vec<CellRef> = session.selected().iter().copied().map(CellRef::from).collect();
    let stats = session.stats();
    let busy = engine.is_busy();

    let mut hasher = Fnv1aHasher::new();
    grid.rows().hash(&mut hasher);
    grid.columns().hash(&mut hasher);
    cells.hash(&mut hasher);
    selected.hash(&mut hasher);
    session.board_id().hash(&mut hasher);
    stats.hash(&mut hasher);
    busy.hash(&mut hasher);

    ObservationMessage {
        msg_type: "observation".to_string(),
        seq,
        ts: current_timestamp_ms(),
        board_id: session.board_id(),
        rows: grid.rows(),
        columns: grid.columns(),
        cells,
        selected,
        busy,
        stats: StatsSnapshot {
            swaps_attempted: stats.swaps_attempted,
            swaps_kept: stats.swaps_kept,
            swaps_reverted: stats.swaps_reverted,
            pairs_rejected: stats.pairs_rejected,
            tokens_cleared: stats.tokens_cleared,
        },
        state_hash: StateHash(hasher.finish()),
    }
}

#[derive(Debug, Default)]
pub struct Bridge {
    seq: u64,
}

impl Bridge {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Apply one inbound command.
    ///
    /// Commands are answered with `ack` (echoing the command `seq`) or
    /// `error`. Accepted commands are followed by an observation broadcast.
    pub fn handle_command<R: ColorSource, P: Pacing>(
        &mut self,
        engine: &mut Engine<R, P>,
        cmd: &InboundCommand,
    ) -> Vec<OutboundMessage> {
        let client_id = cmd.client_id;
        let reply = |msg: ServerMessage| OutboundMessage::ToClient { client_id, msg };

        let command = match &cmd.payload {
            InboundPayload::SnapshotRequest => {
                let obs = build_observation(engine, self.next_seq());
                return vec![reply(ServerMessage::Observation(obs))];
            }
            InboundPayload::Command(command) => *command,
        };

        let result = match command {
            ClientCommand::Activate(coord) => engine.activate(coord),
            ClientCommand::Restart => engine.restart().map(|_| Activation::Accepted),
        };
        debug!("[Bridge] client {} {:?} -> {:?}", client_id, command, result);

        match result {
            Ok(Activation::Accepted) => vec![
                reply(ServerMessage::Ack(create_ack(cmd.seq))),
                self.broadcast_observation(engine),
            ],
            Ok(Activation::Busy) => vec![reply(ServerMessage::Error(create_error(
                cmd.seq,
                ErrorCode::Busy,
                "previous move is still being presented",
            )))],
            Err(e @ GridError::OutOfBounds { .. }) => vec![reply(ServerMessage::Error(create_error(
                cmd.seq,
                ErrorCode::OutOfBounds,
                &e.to_string(),
            )))],
            Err(e) => vec![reply(ServerMessage::Error(create_error(
                cmd.seq,
                ErrorCode::InvalidCommand,
                &e.to_string(),
            )))],
        }
    }

    /// Observation of the current board for every streaming client.
    ///
    /// The game loop also sends one after local keyboard or mouse input.
    pub fn broadcast_observation<R: ColorSource, P: Pacing>(&mut self, engine: &Engine<R, P>) -> OutboundMessage {
        OutboundMessage::Broadcast {
            msg: ServerMessage::Observation(build_observation(engine, self.next_seq())),
        }
    }

    /// Broadcast released events, then one observation when anything was released.
    pub fn released<R: ColorSource, P: Pacing>(
        &mut self,
        engine: &Engine<R, P>,
        events: &[BoardEvent],
    ) -> Vec<OutboundMessage> {
        if events.is_empty() {
            return Vec::new();
        }
        let mut out: Vec<OutboundMessage> = events
            .iter()
            .map(|event| OutboundMessage::Broadcast {
                msg: ServerMessage::Event(create_event(self.next_seq(), event)),
            })
            .collect();
        out.push(self.broadcast_observation(engine));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSession, Grid, Palette, SequenceSource};
    use crate::engine::{FixedPacing, NoPacing};
    use crate::types::{Coord, TokenColor::*};

    fn engine<P: Pacing>(pacing: P) -> Engine<SequenceSource, P> {
        let grid = Grid::from_rows(&[
            [Blue, Blue, Red],
            [Green, Red, Blue],
            [Red, Green, Yellow],
        ])
        .unwrap();
        Engine::new(
            GameSession::with_grid(grid, Palette::default(), SequenceSource::new(vec![5, 4, 3])),
            pacing,
        )
    }

    fn activate(seq: u64, row: usize, column: usize) -> InboundCommand {
        InboundCommand {
            client_id: 1,
            seq,
            payload: InboundPayload::Command(ClientCommand::Activate(Coord::new(row, column))),
        }
    }

    fn error_code(msg: &OutboundMessage) -> Option<ErrorCode> {
        match msg {
            OutboundMessage::ToClient {
                msg: ServerMessage::Error(e),
                ..
            } => Some(e.code),
            _ => None,
        }
    }

    #[test]
    fn test_accepted_command_acks_and_broadcasts() {
        let mut engine = engine(NoPacing);
        let mut bridge = Bridge::new();
        let out = bridge.handle_command(&mut engine, &activate(4, 0, 2));
        assert_eq!(out.len(), 2);
        assert!(matches!(
            &out[0],
            OutboundMessage::ToClient { client_id: 1, msg: ServerMessage::Ack(a) } if a.seq == 4
        ));
        match &out[1] {
            OutboundMessage::Broadcast {
                msg: ServerMessage::Observation(obs),
            } => {
                assert_eq!(obs.selected, vec![CellRef { row: 0, col: 2 }]);
                assert!(obs.busy);
                assert_eq!(obs.cells[0], vec![3, 3, 1]);
            }
            other => panic!("expected observation broadcast, got {:?}", other),
        }
    }

    #[test]
    fn test_busy_and_out_of_bounds_errors() {
        let mut engine = engine(FixedPacing::default());
        let mut bridge = Bridge::new();
        bridge.handle_command(&mut engine, &activate(1, 0, 2));
        let out = bridge.handle_command(&mut engine, &activate(2, 1, 2));
        assert_eq!(error_code(&out[0]), Some(ErrorCode::Busy));

        let out = bridge.handle_command(&mut engine, &activate(3, 9, 9));
        assert_eq!(error_code(&out[0]), Some(ErrorCode::OutOfBounds));
    }

    #[test]
    fn test_released_events_then_observation() {
        let mut engine = engine(NoPacing);
        let mut bridge = Bridge::new();
        bridge.handle_command(&mut engine, &activate(1, 0, 2));
        let released = engine.tick(0);
        let out = bridge.released(&engine, &released);
        assert_eq!(out.len(), 2);
        assert!(bridge.released(&engine, &[]).is_empty());
    }

    #[test]
    fn test_state_hash_tracks_board() {
        let mut engine = engine(NoPacing);
        let a = build_observation(&engine, 1);
        let b = build_observation(&engine, 2);
        assert_eq!(a.state_hash, b.state_hash);

        engine.activate(Coord::new(0, 2)).unwrap();
        let c = build_observation(&engine, 3);
        assert_ne!(a.state_hash, c.state_hash);
    }
}
