//! Adapter module - scripted control of a game over a line-delimited JSON protocol
//!
//! A session reads one command per line (from stdin or a script file), applies it
//! to a [`engine::Game`], and writes every reply as one JSON line. The session is
//! also the scheduler the engine relies on: it waits out a provisional swap before
//! resolving it, and steps the refill sweep on a fixed cadence until the board
//! settles again.
//!
//! # Message Types
//!
//! ## Client -> Session
//!
//! - **select**: click the cell at `x`, `y`
//! - **probe**: ask whether a match runs through a cell, without changing anything
//! - **snapshot**: request the full observable state
//! - **wait**: let `ms` milliseconds pass
//!
//! ## Session -> Client
//!
//! - **welcome**: first line, with the active rules and board size
//! - **outcome**: what a select did
//! - **resolved**: how a provisional swap ended
//! - **refill**: the board settled after a clear (ticks and cascades)
//! - **cue**: a sound cue the game asked for (`select`, `swap`, `clear`)
//! - **snapshot**, **probe**, **error**, and a final **bye**
//!
//! # Environment Variables
//!
//! - `MATCH3_RULES`: `unconditional` or `guarded` (default)
//! - `MATCH3_WIDTH`, `MATCH3_HEIGHT`, `MATCH3_KINDS`, `MATCH3_MOVES`, `MATCH3_SEED`
//! - `MATCH3_ROW_SIZE`, `MATCH3_SWAP_DELAY_MS`, `MATCH3_REFILL_STEP_MS`
//! - `MATCH3_ECHO_SNAPSHOTS`: set to "1" or "true" to follow every select with a snapshot
//!
//! # Example Session
//!
//! ```text
//! Client -> Session: {"type":"select","seq":1,"x":2,"y":0}
//! Session -> Client: {"type":"outcome","seq":2,"command_seq":1,"outcome":"selected","at":{"x":2,"y":0}}
//! Session -> Client: {"type":"cue","seq":3,"cue":"select"}
//! Client -> Session: {"type":"select","seq":2,"x":1,"y":0}
//! Session -> Client: {"type":"outcome","seq":4,"command_seq":2,"outcome":"swap_pending",...}
//! Session -> Client: {"type":"resolved","seq":5,"command_seq":2,"token":1,"result":"committed",...}
//! ```

pub mod config;
pub mod protocol;
pub mod session;

pub use match3_engine as engine;
pub use match3_types as types;

pub use config::{CliArgs, SessionConfig};
pub use protocol::*;
pub use session::{Session, SessionSummary};
