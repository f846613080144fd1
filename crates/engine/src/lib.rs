//! Swap engine crate - the rules a click goes through
//!
//! Builds on [`match3_core`] with the stateful parts of the game:
//!
//! - [`swap`]: selection / provisional swap / commit-or-revert state machine
//! - [`game`]: one board plus its refill sweep, move budget and cue queue
//! - [`rules`]: swap rule presets and game configuration
//! - [`moves`]: saturating move budget
//! - [`snapshot`]: observable state for renderers and protocols
//!
//! # Two-phase swaps
//!
//! Under the guarded rule a swap is provisional: [`Game::select`] returns
//! [`SelectOutcome::SwapPending`] with a token and a wait. The caller's scheduler
//! waits, then calls [`Game::resolve_swap`]. Nothing in this crate sleeps.
//!
//! # Example
//!
//! ```
//! use match3_engine::{Game, GameConfig, RuleSet, SelectOutcome, SwapResolution};
//! use match3_engine::core::Board;
//! use match3_engine::types::{Coord, TileKind::{Blue, Green, Red}};
//!
//! let board = Board::from_rows(vec![
//!     vec![Some(Red), Some(Green), Some(Blue)],
//!     vec![Some(Blue), Some(Red), Some(Green)],
//! ]).unwrap();
//! let mut game = Game::from_board(board.clone(), GameConfig::default(), 1);
//! assert_eq!(game.config().rules, RuleSet::guarded());
//!
//! game.select(Coord::new(0, 0));
//! let SelectOutcome::SwapPending(pending) = game.select(Coord::new(1, 0)) else {
//!     panic!("adjacent tiles of different kinds swap provisionally");
//! };
//! assert!(!pending.will_commit);
//!
//! // ... wait pending.wait_ms ...
//! assert!(matches!(game.resolve_swap(pending.token), SwapResolution::Reverted { .. }));
//! assert_eq!(game.board(), &board);
//! ```

pub mod game;
pub mod moves;
pub mod rules;
pub mod snapshot;
pub mod swap;

pub use match3_core as core;
pub use match3_types as types;

pub use game::{Game, RefillTick};
pub use moves::MoveCounter;
pub use rules::{GameConfig, RuleSet, SwapRule};
pub use snapshot::GameSnapshot;
pub use swap::{
    BoardHooks, CommitReport, EngineState, IgnoreReason, PendingSwap, SelectOutcome,
    SwapEngine, SwapResolution, SwapToken,
};
