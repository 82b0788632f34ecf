//! Protocol module - JSON message types for the AI adapter
//!
//! Line-delimited JSON. Every message carries `type`, `seq` (sequence number)
//! and `ts` (timestamp in ms).

use serde::{Deserialize, Serialize};

use crate::types::{BoardEvent, Coord, TokenColor};

/// Protocol version announced in `welcome`. Clients must speak `1.x`.
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Game identifier announced in `welcome`.
pub const GAME_ID: &str = "match3-tui";

// ============== Client -> Game Messages ==============

/// Client hello message (first message to establish connection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type", default = "hello_type")]
    pub msg_type: String,
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
    #[serde(default)]
    pub requested: RequestedCapabilities,
}

fn hello_type() -> String {
    "hello".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RequestedCapabilities {
    #[serde(default = "default_true")]
    pub stream_observations: bool,
}

impl Default for RequestedCapabilities {
    fn default() -> Self {
        Self {
            stream_observations: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A board cell on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl From<Coord> for CellRef {
    fn from(c: Coord) -> Self {
        Self {
            row: c.row,
            col: c.column,
        }
    }
}

impl From<CellRef> for Coord {
    fn from(c: CellRef) -> Self {
        Coord::new(c.row, c.col)
    }
}

/// Command message (controller only)
#[derive(Debug, Clone, Deserialize)]
pub struct CommandMessage {
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub action: CommandAction,
    /// Target of `activate`.
    #[serde(default)]
    pub cell: Option<CellRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandAction {
    Activate,
    Restart,
}

impl<'de> Deserialize<'de> for CommandAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("activate") || s.eq_ignore_ascii_case("click") {
            Ok(Self::Activate)
        } else if s.eq_ignore_ascii_case("restart") {
            Ok(Self::Restart)
        } else {
            Err(serde::de::Error::custom("unknown action"))
        }
    }
}

/// Control message (claim/release controller status)
#[derive(Debug, Clone, Deserialize)]
pub struct ControlMessage {
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub action: ControlAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    Claim,
    Release,
}

impl<'de> Deserialize<'de> for ControlAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("claim") {
            Ok(Self::Claim)
        } else if s.eq_ignore_ascii_case("release") {
            Ok(Self::Release)
        } else {
            Err(serde::de::Error::custom("invalid control action"))
        }
    }
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignedRole {
    Controller,
    Observer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    HandshakeRequired,
    ProtocolMismatch,
    NotController,
    ControllerActive,
    InvalidCommand,
    OutOfBounds,
    Busy,
    Backpressure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSize {
    pub rows: usize,
    pub columns: usize,
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub client_id: u64,
    pub role: AssignedRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller_id: Option<u64>,
    pub game_id: String,
    pub board: BoardSize,
    pub capabilities: ServerCapabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    pub formats: Vec<String>,
    pub actions: Vec<String>,
    pub features: Vec<String>,
}

/// Acknowledgment for an applied command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub status: String,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub swaps_attempted: u32,
    pub swaps_kept: u32,
    pub swaps_reverted: u32,
    pub pairs_rejected: u32,
    pub tokens_cleared: u32,
}

/// Board state observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub board_id: u32,
    pub rows: usize,
    pub columns: usize,
    /// Row-major, 0 = empty, 1..=6 = token color code.
    pub cells: Vec<Vec<u8>>,
    pub selected: Vec<CellRef>,
    /// True while the previous resolution is still being presented.
    pub busy: bool,
    pub stats: StatsSnapshot,
    pub state_hash: StateHash,
}

/// One released board event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub kind: String,
    pub cells: Vec<CellRef>,
    /// Color codes parallel to `cells` (refills only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<u8>,
}

/// Deterministic state hash serialized as 16 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateHash(pub u64);

impl Serialize for StateHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&format_args!("{:016x}", self.0))
    }
}

impl<'de> Deserialize<'de> for StateHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        u64::from_str_radix(s.trim(), 16)
            .map(StateHash)
            .map_err(|_| serde::de::Error::custom("invalid hex"))
    }
}

/// Any message the server writes to a client.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ServerMessage {
    Welcome(WelcomeMessage),
    Ack(AckMessage),
    Error(ErrorMessage),
    Observation(ObservationMessage),
    Event(EventMessage),
}

// ============== Message Parsing ==============

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Command(CommandMessage),
    Control(ControlMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Parse a JSON message from a string
///
/// An unrecognized `type` is not a parse error; it yields
/// [`ParsedMessage::Unknown`] so the server can answer with its `seq`.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "hello")]
        Hello(HelloMessage),
        #[serde(rename = "command")]
        Command(CommandMessage),
        #[serde(rename = "control")]
        Control(ControlMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Hello(m)) => Ok(ParsedMessage::Hello(m)),
        Ok(InboundMessage::Command(m)) => Ok(ParsedMessage::Command(m)),
        Ok(InboundMessage::Control(m)) => Ok(ParsedMessage::Control(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct Envelope {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let envelope = serde_json::from_str::<Envelope>(json)?;
            match envelope.msg_type.as_deref() {
                Some("hello" | "command" | "control") => Err(e),
                _ => Ok(ParsedMessage::Unknown(UnknownMessage {
                    seq: envelope.seq.unwrap_or(0),
                })),
            }
        }
    }
}

/// Best-effort `seq` extraction from a line that is not valid JSON.
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

// ============== Utility Functions ==============

/// Create a hello message
pub fn create_hello(seq: u64, client_name: &str, protocol_version: &str) -> HelloMessage {
    HelloMessage {
        msg_type: hello_type(),
        seq,
        ts: current_timestamp_ms(),
        client: ClientInfo {
            name: client_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        protocol_version: protocol_version.to_string(),
        requested: RequestedCapabilities::default(),
    }
}

/// Create a welcome message
pub fn create_welcome(
    seq: u64,
    client_id: u64,
    role: AssignedRole,
    controller_id: Option<u64>,
    board: BoardSize,
) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: "welcome".to_string(),
        seq,
        ts: current_timestamp_ms(),
        protocol_version: PROTOCOL_VERSION.to_string(),
        client_id,
        role,
        controller_id,
        game_id: GAME_ID.to_string(),
        board,
        capabilities: ServerCapabilities {
            formats: vec!["json".to_string()],
            actions: vec!["activate".to_string(), "restart".to_string()],
            features: ["events", "selection", "busy", "stats", "state_hash"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
    }
}

/// Create an acknowledgment
pub fn create_ack(seq: u64) -> AckMessage {
    AckMessage {
        msg_type: "ack".to_string(),
        seq,
        ts: current_timestamp_ms(),
        status: "ok".to_string(),
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: "error".to_string(),
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Create an event message for a released board event
pub fn create_event(seq: u64, event: &BoardEvent) -> EventMessage {
    let (cells, colors): (Vec<CellRef>, Vec<u8>) = match event {
        BoardEvent::CellHighlighted(c) | BoardEvent::CellRestored(c) => {
            (vec![CellRef::from(*c)], Vec::new())
        }
        BoardEvent::CellsSwapped(a, b) => (vec![CellRef::from(*a), CellRef::from(*b)], Vec::new()),
        BoardEvent::CellsRemoved(cells) => {
            (cells.iter().copied().map(CellRef::from).collect(), Vec::new())
        }
        BoardEvent::CellsRefilled(cells) => cells
            .iter()
            .map(|(c, color): (&Coord, &TokenColor)| (CellRef::from(*c), color.code()))
            .unzip(),
    };
    EventMessage {
        msg_type: "event".to_string(),
        seq,
        ts: current_timestamp_ms(),
        kind: event.kind_str().to_string(),
        cells,
        colors,
    }
}

/// Get current timestamp in milliseconds
pub(crate) fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
