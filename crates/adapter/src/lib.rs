//! Adapter - remote control of the board over a TCP socket with JSON lines
//!
//! External agents (bots, test harnesses, a second terminal) can watch the
//! board and activate cells through the same path as the keyboard and mouse.
//!
//! # Protocol Overview
//!
//! Every message is one JSON object on one line:
//!
//! 1. **Connection**: Client connects to TCP socket (default: 127.0.0.1:7878)
//! 2. **Handshake**: Client sends `hello`, server responds with `welcome`
//! 3. **Controller Assignment**: First client to hello becomes the controller
//! 4. **Observation Streaming**: Server sends a board observation after every change
//! 5. **Commanding**: Controller sends `command` messages to activate cells
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **hello**: Handshake with client info and requested capabilities
//! - **command**: `activate` a cell (alias `click`) or `restart` the board
//! - **control**: `claim` or `release` the controller role
//!
//! ## Server → Client
//!
//! - **welcome**: Response to hello with the assigned role and board size
//! - **observation**: Full board snapshot with selection, stats and `state_hash`
//! - **event**: One released board event (`highlighted`, `swapped`, `removed`, ...)
//! - **ack**: Command accepted
//! - **error**: Error response with code and message
//!
//! Command `seq` values must strictly increase per client. A command sent
//! while the previous move is still being presented is rejected with `busy`.
//!
//! # Environment Variables
//!
//! - `MATCH3_AI_HOST`: Bind address (default: "127.0.0.1")
//! - `MATCH3_AI_PORT`: Port number (default: 7878)
//! - `MATCH3_AI_MAX_PENDING`: Bounded command queue length (default: 10)
//! - `MATCH3_AI_DISABLED`: Set to "1" or "true" to disable adapter entirely
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"ts":1700000000000,"client":{"name":"bot","version":"0.1.0"},"protocol_version":"1.0.0"}
//! Server -> Client: {"type":"welcome","seq":1,"ts":1700000000001,"protocol_version":"1.0.0","client_id":1,"role":"controller",...}
//! Server -> Client: {"type":"observation","seq":1,"ts":1700000000002,"board_id":0,"rows":6,"columns":5,"cells":[[1,3,2,5,4],...],...}
//! Client -> Server: {"type":"command","seq":2,"ts":1700000000100,"action":"activate","cell":{"row":0,"col":1}}
//! Server -> Client: {"type":"ack","seq":2,"ts":1700000000101,"status":"ok"}
//! Server -> Client: {"type":"event","seq":3,"ts":1700000000102,"kind":"highlighted","cells":[{"row":0,"col":1}]}
//! ```
//!
//! # Layout
//!
//! - [`protocol`]: message structures and builders
//! - [`server`]: TCP server, handshake, controller role and command gating
//! - [`runtime`]: the sync-facing [`Adapter`] handle owned by the game loop
//! - [`bridge`]: applies commands to an engine and builds observations
//!
//! # Testing
//!
//! Connect to the adapter using netcat for manual testing:
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"hello","seq":1,"ts":0,"client":{"name":"nc","version":"0"},"protocol_version":"1.0.0"}
//! {"type":"command","seq":2,"ts":0,"action":"activate","cell":{"row":0,"col":0}}
//! ```

pub mod bridge;
pub mod protocol;
pub mod runtime;
pub mod server;

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_types as types;

pub use bridge::{build_observation, Bridge};
pub use protocol::*;
pub use runtime::{Adapter, ClientCommand, InboundCommand, InboundPayload, OutboundMessage};
pub use server::*;
