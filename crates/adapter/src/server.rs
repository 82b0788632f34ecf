//! TCP server for the AI adapter
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Context;
use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};

use crate::protocol::*;
use crate::runtime::{ClientCommand, InboundCommand, InboundPayload, OutboundMessage};
use crate::types::Coord;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_pending_commands: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            max_pending_commands: 10,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    ///
    /// - `MATCH3_AI_HOST` (default `127.0.0.1`)
    /// - `MATCH3_AI_PORT` (default `7878`)
    /// - `MATCH3_AI_MAX_PENDING` (default `10`)
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("MATCH3_AI_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("MATCH3_AI_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let max_pending_commands = env::var("MATCH3_AI_MAX_PENDING")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_pending_commands);

        Self {
            host,
            port,
            max_pending_commands,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid adapter address {}:{}", self.host, self.port))
    }

    /// Check if AI control is disabled via `MATCH3_AI_DISABLED`.
    pub fn is_disabled() -> bool {
        std::env::var("MATCH3_AI_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

/// Connection counters readable from the game loop.
#[derive(Debug, Default)]
pub struct SharedStatus {
    clients: AtomicUsize,
    /// Controller client id, 0 when none.
    controller: AtomicUsize,
}

impl SharedStatus {
    pub fn client_count(&self) -> usize {
        self.clients.load(Ordering::Relaxed)
    }

    pub fn controller_id(&self) -> Option<usize> {
        match self.controller.load(Ordering::Relaxed) {
            0 => None,
            id => Some(id),
        }
    }
}

/// Handle to a connected client
struct ClientHandle {
    id: usize,
    stream_observations: bool,
    handshaken: bool,
    last_seq: Option<u64>,
    tx: mpsc::UnboundedSender<ServerMessage>,
}

/// Shared server state
struct ServerState {
    board: BoardSize,
    clients: RwLock<Vec<ClientHandle>>,
    controller: RwLock<Option<usize>>,
    status: Arc<SharedStatus>,
}

impl ServerState {
    async fn publish_status(&self) {
        let clients = self.clients.read().await.len();
        let controller = self.controller.read().await.unwrap_or(0);
        self.status.clients.store(clients, Ordering::Relaxed);
        self.status.controller.store(controller, Ordering::Relaxed);
    }

    async fn is_handshaken(&self, client_id: usize) -> bool {
        let clients = self.clients.read().await;
        clients
            .iter()
            .find(|c| c.id == client_id)
            .map(|c| c.handshaken)
            .unwrap_or(false)
    }

    async fn is_controller(&self, client_id: usize) -> bool {
        *self.controller.read().await == Some(client_id)
    }

    /// Record `seq` if it is strictly greater than the last one seen.
    async fn check_and_update_seq(&self, client_id: usize, seq: u64) -> bool {
        let mut clients = self.clients.write().await;
        let Some(client) = clients.iter_mut().find(|c| c.id == client_id) else {
            return true;
        };
        match client.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                client.last_seq = Some(seq);
                true
            }
        }
    }

    /// Handshake and sequencing checks shared by `command` and `control`.
    async fn gate(&self, client_id: usize, seq: u64, what: &str) -> Result<(), ErrorMessage> {
        if !self.is_handshaken(client_id).await {
            return Err(create_error(
                seq,
                ErrorCode::HandshakeRequired,
                &format!("Send hello before {}", what),
            ));
        }
        if !self.check_and_update_seq(client_id, seq).await {
            return Err(create_error(
                seq,
                ErrorCode::InvalidCommand,
                "seq must be strictly increasing",
            ));
        }
        Ok(())
    }
}

/// Start the TCP server
///
/// Runs until the listener fails. `ready_tx` receives the bound address,
/// which is how callers using port 0 learn the real port.
pub async fn run_server(
    config: ServerConfig,
    board: BoardSize,
    status: Arc<SharedStatus>,
    command_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind adapter on {}", addr))?;
    let bound = listener.local_addr()?;
    info!("[Adapter] TCP server listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(ServerState {
        board,
        clients: RwLock::new(Vec::new()),
        controller: RwLock::new(None),
        status,
    });
    let mut client_id_counter = 0usize;

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let clients = state.clients.read().await;
                match msg {
                    OutboundMessage::ToClient { client_id, msg } => {
                        if let Some(c) = clients.iter().find(|c| c.id == client_id) {
                            let _ = c.tx.send(msg);
                        }
                    }
                    OutboundMessage::Broadcast { msg } => {
                        for c in clients.iter().filter(|c| c.handshaken && c.stream_observations) {
                            let _ = c.tx.send(msg.clone());
                        }
                    }
                }
            }
        });
    }

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        info!("[Adapter] Client {} connected from {}", client_id, addr);

        let state = Arc::clone(&state);
        let command_tx = command_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, addr, client_id, Arc::clone(&state), command_tx).await {
                warn!("[Adapter] Client {} error: {}", client_id, e);
            }
            remove_client(&state, client_id).await;
            info!("[Adapter] Client {} disconnected", client_id);
        });
    }
}

/// Remove a client and release or promote the controller if needed.
async fn remove_client(state: &ServerState, client_id: usize) {
    {
        let mut controller = state.controller.write().await;
        let mut clients = state.clients.write().await;

        clients.retain(|c| c.id != client_id);

        if *controller == Some(client_id) {
            // Promote the lowest-id handshaken client.
            let next_id = clients.iter().filter(|c| c.handshaken).map(|c| c.id).min();
            *controller = next_id;
            match next_id {
                Some(new_id) => info!("[Adapter] Controller {} promoted", new_id),
                None => info!("[Adapter] Controller {} released", client_id),
            }
        }
    }
    state.publish_status().await;
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    addr: SocketAddr,
    client_id: usize,
    state: Arc<ServerState>,
    command_tx: mpsc::Sender<InboundCommand>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);

    // Channel to send messages to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    debug!("[Adapter] Client {} session from {}", client_id, addr);
    state.clients.write().await.push(ClientHandle {
        id: client_id,
        stream_observations: false,
        handshaken: false,
        last_seq: None,
        tx: tx.clone(),
    });
    state.publish_status().await;

    // Writer task: one JSON object per line. Ends when every sender is gone,
    // which includes the handle removed by `remove_client`.
    tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            if serde_json::to_writer(&mut buf, &msg).is_err() {
                continue;
            }
            buf.push(b'\n');
            if writer.write_all(&buf).await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    let send_error = |err: ErrorMessage| {
        let _ = tx.send(ServerMessage::Error(err));
    };

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!("[Adapter] <- {}: {}", client_id, trimmed);

        match parse_message(trimmed) {
            Ok(ParsedMessage::Hello(hello)) => {
                if state.is_handshaken(client_id).await
                    && !state.check_and_update_seq(client_id, hello.seq).await
                {
                    send_error(create_error(
                        hello.seq,
                        ErrorCode::InvalidCommand,
                        "seq must be strictly increasing",
                    ));
                    continue;
                }

                if !hello.protocol_version.starts_with("1.") {
                    send_error(create_error(
                        hello.seq,
                        ErrorCode::ProtocolMismatch,
                        &format!("Protocol version {} not supported", hello.protocol_version),
                    ));
                    break;
                }

                // First client to hello becomes controller.
                let role = {
                    let mut controller = state.controller.write().await;
                    let mut clients = state.clients.write().await;
                    if let Some(client) = clients.iter_mut().find(|c| c.id == client_id) {
                        client.handshaken = true;
                        client.last_seq = Some(hello.seq);
                        client.stream_observations = hello.requested.stream_observations;
                    }
                    let current = *controller;
                    match current {
                        None => {
                            *controller = Some(client_id);
                            info!("[Adapter] Client {} is now controller", client_id);
                            AssignedRole::Controller
                        }
                        Some(id) if id == client_id => AssignedRole::Controller,
                        Some(_) => AssignedRole::Observer,
                    }
                };
                state.publish_status().await;

                let controller_id = state.controller.read().await.map(|id| id as u64);
                let welcome = create_welcome(
                    hello.seq,
                    client_id as u64,
                    role,
                    controller_id,
                    state.board,
                );
                let _ = tx.send(ServerMessage::Welcome(welcome));

                if hello.requested.stream_observations {
                    let _ = command_tx.try_send(InboundCommand {
                        client_id,
                        seq: hello.seq,
                        payload: InboundPayload::SnapshotRequest,
                    });
                }
            }

            Ok(ParsedMessage::Command(cmd)) => {
                if let Err(err) = state.gate(client_id, cmd.seq, "command").await {
                    send_error(err);
                    continue;
                }

                if !state.is_controller(client_id).await {
                    send_error(create_error(
                        cmd.seq,
                        ErrorCode::NotController,
                        "Only controller may send commands",
                    ));
                    continue;
                }

                let mapped = match map_command(&cmd, state.board) {
                    Ok(c) => c,
                    Err((code, message)) => {
                        send_error(create_error(cmd.seq, code, &message));
                        continue;
                    }
                };

                // Backpressure: bounded queue. The game loop acks once applied.
                if command_tx
                    .try_send(InboundCommand {
                        client_id,
                        seq: cmd.seq,
                        payload: InboundPayload::Command(mapped),
                    })
                    .is_err()
                {
                    send_error(create_error(
                        cmd.seq,
                        ErrorCode::Backpressure,
                        "Command queue is full",
                    ));
                }
            }

            Ok(ParsedMessage::Control(ctrl)) => {
                if let Err(err) = state.gate(client_id, ctrl.seq, "control").await {
                    send_error(err);
                    continue;
                }

                let mut controller = state.controller.write().await;
                let current = *controller;
                let result = match ctrl.action {
                    ControlAction::Claim => match current {
                        None => {
                            *controller = Some(client_id);
                            Ok(())
                        }
                        Some(id) if id == client_id => Ok(()),
                        Some(_) => Err((ErrorCode::ControllerActive, "Controller already assigned")),
                    },
                    ControlAction::Release => {
                        if current == Some(client_id) {
                            *controller = None;
                            Ok(())
                        } else {
                            Err((ErrorCode::NotController, "Only controller may release"))
                        }
                    }
                };
                drop(controller);

                match result {
                    Ok(()) => {
                        state.publish_status().await;
                        let _ = tx.send(ServerMessage::Ack(create_ack(ctrl.seq)));
                    }
                    Err((code, message)) => send_error(create_error(ctrl.seq, code, message)),
                }
            }

            Ok(ParsedMessage::Unknown(unknown)) => {
                if state.is_handshaken(client_id).await
                    && !state.check_and_update_seq(client_id, unknown.seq).await
                {
                    send_error(create_error(
                        unknown.seq,
                        ErrorCode::InvalidCommand,
                        "seq must be strictly increasing",
                    ));
                    continue;
                }
                send_error(create_error(
                    unknown.seq,
                    ErrorCode::InvalidCommand,
                    "Unknown message type",
                ));
            }

            Err(e) => {
                let seq = extract_seq_best_effort(trimmed).unwrap_or(0);
                send_error(create_error(
                    seq,
                    ErrorCode::InvalidCommand,
                    &format!("JSON parse error: {}", e),
                ));
            }
        }
    }

    Ok(())
}

/// Map a protocol command into a game-loop command.
fn map_command(cmd: &CommandMessage, board: BoardSize) -> Result<ClientCommand, (ErrorCode, String)> {
    match cmd.action {
        CommandAction::Activate => {
            let Some(cell) = cmd.cell else {
                return Err((ErrorCode::InvalidCommand, "Missing cell".to_string()));
            };
            let coord = Coord::from(cell);
            if coord.row >= board.rows || coord.column >= board.columns {
                return Err((
                    ErrorCode::OutOfBounds,
                    format!(
                        "cell {} is outside the {}x{} board",
                        coord, board.rows, board.columns
                    ),
                ));
            }
            Ok(ClientCommand::Activate(coord))
        }
        CommandAction::Restart => Ok(ClientCommand::Restart),
    }
}
