//! Core board logic module - pure, deterministic, and testable
//!
//! This module contains the grid, neighbour lookup, match detection and refill logic.
//! It has **zero dependencies** on rendering, input, audio or I/O, making it:
//!
//! - **Deterministic**: Same seed deals identical boards and refills
//! - **Testable**: Every rule is a plain function over a [`Board`]
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: Fixed-size grid with bounded, non-wrapping neighbour lookup
//! - [`scan`]: Lazy same-kind walk from a cell along one direction
//! - [`matching`]: Per-axis match evaluation and clearing
//! - [`refill`]: Stepwise gravity + deal sweep with cancel-then-restart semantics
//! - [`rng`]: Bag-based tile dealing on top of a small LCG
//!
//! # Match Rules
//!
//! - Scans never include the origin cell and stop at the first different or empty cell
//! - An axis matches when its partner count (both directions, origin excluded)
//!   reaches the configured `row_size`
//! - Each axis is judged on its own; a clear empties every matching axis plus the origin
//!
//! # Example
//!
//! ```
//! use match3_core::{matching, Board};
//! use match3_core::types::{Coord, TileKind::{Blue, Red}};
//!
//! let mut board = Board::from_rows(vec![vec![
//!     Some(Red), Some(Red), Some(Red), Some(Blue),
//! ]]).unwrap();
//!
//! assert!(matching::has_any_match(&board, Coord::new(0, 0), 2));
//! let cleared = matching::clear_all_matches(&mut board, Coord::new(0, 0), 2);
//! assert_eq!(cleared.len(), 3);
//! assert_eq!(board.value(Coord::new(3, 0)), Some(Blue));
//! ```

pub mod board;
pub mod matching;
pub mod refill;
pub mod rng;
pub mod scan;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError};
pub use matching::{clear_all_matches, clearable_set, has_any_match, matches_through};
pub use refill::{RefillStep, RefillSweep};
pub use rng::{SimpleRng, TileSource};
pub use scan::{scan, Scan};
