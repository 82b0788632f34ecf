//! Adapter runtime integration.
//!
//! Bridges the sync game loop with the async TCP server: the server runs on
//! its own tokio runtime, commands come in over a bounded channel and
//! replies go out over an unbounded one.

use std::sync::Arc;

use anyhow::Context;
use log::{error, info};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::protocol::{BoardSize, ServerMessage};
use crate::server::{run_server, ServerConfig, SharedStatus};
use crate::types::Coord;

/// Command delivered to the game loop.
#[derive(Debug, Clone)]
pub struct InboundCommand {
    pub client_id: usize,
    pub seq: u64,
    pub payload: InboundPayload,
}

#[derive(Debug, Clone)]
pub enum InboundPayload {
    /// A client finished its handshake and wants the current board.
    SnapshotRequest,
    Command(ClientCommand),
}

/// Command payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    Activate(Coord),
    Restart,
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    ToClient { client_id: usize, msg: ServerMessage },
    /// Sent to every handshaken client that streams observations.
    Broadcast { msg: ServerMessage },
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
    status: Arc<SharedStatus>,
}

impl Adapter {
    /// Start the adapter from environment variables.
    ///
    /// Returns `Ok(None)` if `MATCH3_AI_DISABLED` is set.
    pub fn start_from_env(board: BoardSize) -> anyhow::Result<Option<Self>> {
        if ServerConfig::is_disabled() {
            info!("[Adapter] AI control disabled (MATCH3_AI_DISABLED)");
            return Ok(None);
        }
        Self::start(ServerConfig::from_env(), board).map(Some)
    }

    pub fn start(config: ServerConfig, board: BoardSize) -> anyhow::Result<Self> {
        // Validate before spawning so a bad address fails the caller.
        config.socket_addr()?;

        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
        let status = Arc::new(SharedStatus::default());

        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let server_status = Arc::clone(&status);
        rt.spawn(async move {
            if let Err(e) = run_server(config, board, server_status, cmd_tx, out_rx, None).await {
                error!("[Adapter] server stopped: {:#}", e);
            }
        });

        Ok(Self {
            _rt: rt,
            cmd_rx,
            out_tx,
            status,
        })
    }

    pub fn try_recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.try_recv().ok()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }

    pub fn send_all(&self, msgs: impl IntoIterator<Item = OutboundMessage>) {
        for msg in msgs {
            self.send(msg);
        }
    }

    pub fn status(&self) -> &SharedStatus {
        &self.status
    }
}
