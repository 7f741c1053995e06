//! Network module - the connection to the game server
//!
//! This crate owns everything between the WebSocket and the client state:
//! the JSON codec, the outbound channel, the per-event [`Session`] dispatch
//! and the async runtime that ties them to the terminal.
//!
//! # Protocol Overview
//!
//! One persistent WebSocket, text frames only, JSON payloads:
//!
//! 1. **Connection**: client connects to the configured `ws://` address
//!    (default: `ws://127.0.0.1:48666`); there is no handshake message
//! 2. **Snapshots**: the server pushes a full world snapshot every tick
//! 3. **Actions**: the client sends one frame per player intent, at any time
//! 4. **Close**: the client sends a close frame when the player quits
//!
//! ## Server -> Client
//!
//! ```text
//! [<identity>, {<ship id>: {"x":..,"y":..,...}}, {<bullet id>: {"x":..,"y":..,"angle":..}}, <map>, <damage feed>]
//! ```
//!
//! ## Client -> Server
//!
//! ```text
//! {"MoveShip":{"angle":0.1}}
//! {"AddBullet":{"angle":1.5707963267948966}}
//! ```
//!
//! # Environment Variables
//!
//! - `SKIRMISH_SERVER_URL`: server address (default: `ws://127.0.0.1:48666`)
//! - `SKIRMISH_LOG_PATH`: write logs to this file (default: no logging)
//! - `SKIRMISH_LINE_HEIGHT`: overlay line height in rows (default: 1)
//! - `SKIRMISH_SHOW_FEED`: set to "1" or "true" to show the damage feed
//!
//! # Implementation
//!
//! - Uses **tokio** and **tokio-tungstenite** for the socket
//! - Handlers are synchronous; outbound frames are queued and written by a
//!   separate task so no handler ever awaits
//! - See [`protocol`] for the codec and [`session`] for event dispatch

pub mod channel;
pub mod config;
pub mod protocol;
pub mod runtime;
pub mod session;

pub use skirmish_core as core;
pub use skirmish_input as input;
pub use skirmish_term as term;
pub use skirmish_types as types;

pub use channel::{outbound_queue, Channel, ChannelError, MemoryChannel, Outbound, OutboundQueue};
pub use config::{ClientConfig, ConfigError};
pub use protocol::{decode_snapshot, encode_action, encode_snapshot, DecodeError};
pub use runtime::{run, Exit};
pub use session::{Session, SessionError};
pub use tokio_tungstenite::tungstenite::Message;
