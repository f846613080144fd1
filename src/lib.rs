//! Match-3 (workspace facade crate).
//!
//! Exposes `match3::{adapter,core,engine,types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use match3_adapter as adapter;
pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_types as types;
