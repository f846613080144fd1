//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board logic, swap engine, session protocol).
//!
//! # Coordinates
//!
//! Cells are addressed by `(x, y)` = `(column, row)`:
//!
//! - **x**: 0 at the left edge, grows to the right
//! - **y**: 0 at the top row, grows downwards
//! - [`Direction::Up`] decreases `y`, [`Direction::Down`] increases it
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SWAP_DELAY_MS` | 200 | Wait between a provisional swap and its commit/revert |
//! | `REFILL_STEP_MS` | 30 | Cadence of one gravity step of the refill sweep |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Axis, Coord, Direction, TileKind};
//!
//! let kind = TileKind::from_str("blue").unwrap();
//! assert_eq!(kind, TileKind::Blue);
//!
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//! assert_eq!(Axis::Horizontal.directions(), [Direction::Left, Direction::Right]);
//!
//! let at = Coord::new(3, 4);
//! assert_eq!((at.x, at.y), (3, 4));
//! ```

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: u8 = 8;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: u8 = 8;

/// Default number of distinct tile kinds dealt onto the board
pub const DEFAULT_KIND_COUNT: u8 = 6;

/// Fewest tile kinds a dealer works with; one kind would match everywhere
pub const MIN_KIND_COUNT: u8 = 2;

/// Most cascades a single refill may trigger before the board is left as it lands
pub const MAX_CASCADES: u32 = 32;

/// Default move budget per game
pub const DEFAULT_MOVES: u32 = 30;

/// Fixed wait between a provisional swap and its resolution (200ms)
pub const SWAP_DELAY_MS: u32 = 200;

/// Interval between two refill sweep steps (30ms)
pub const REFILL_STEP_MS: u32 = 30;

/// Partner threshold of the unconditional swap rule
pub const UNCONDITIONAL_ROW_SIZE: usize = 2;

/// Partner threshold of the guarded swap rule
pub const GUARDED_ROW_SIZE: usize = 3;

/// The tile kinds a cell can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileKind {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    White,
}

impl TileKind {
    /// Every kind, in dealing order
    pub const ALL: [TileKind; 7] = [
        TileKind::Red,
        TileKind::Orange,
        TileKind::Yellow,
        TileKind::Green,
        TileKind::Blue,
        TileKind::Purple,
        TileKind::White,
    ];

    /// Parse tile kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_str("red"), Some(TileKind::Red));
    /// assert_eq!(TileKind::from_str("PURPLE"), Some(TileKind::Purple));
    /// assert_eq!(TileKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(TileKind::Red),
            "orange" => Some(TileKind::Orange),
            "yellow" => Some(TileKind::Yellow),
            "green" => Some(TileKind::Green),
            "blue" => Some(TileKind::Blue),
            "purple" => Some(TileKind::Purple),
            "white" => Some(TileKind::White),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Red => "red",
            TileKind::Orange => "orange",
            TileKind::Yellow => "yellow",
            TileKind::Green => "green",
            TileKind::Blue => "blue",
            TileKind::Purple => "purple",
            TileKind::White => "white",
        }
    }

    /// Compact grid code, 1-based so that 0 can stand for an empty cell
    pub fn code(&self) -> u8 {
        match self {
            TileKind::Red => 1,
            TileKind::Orange => 2,
            TileKind::Yellow => 3,
            TileKind::Green => 4,
            TileKind::Blue => 5,
            TileKind::Purple => 6,
            TileKind::White => 7,
        }
    }

    /// Inverse of [`TileKind::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }
}

/// A cell on the board
///
/// - `None`: Empty cell (cleared, waiting for refill)
/// - `Some(TileKind)`: Cell holding a tile of that kind
pub type Cell = Option<TileKind>;

/// Board coordinate (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

impl From<(u8, u8)> for Coord {
    fn from((x, y): (u8, u8)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal step directions (no diagonals)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in lookup order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing the other way
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_types::Direction;
    ///
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// assert_eq!(Direction::Down.opposite(), Direction::Up);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Column/row delta of one step
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Line orientation a match runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Both axes, in evaluation order
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// The two opposite scan directions of this axis
    ///
    /// The pair is disjoint, so scanning both never counts a cell twice.
    pub fn directions(&self) -> [Direction; 2] {
        match self {
            Axis::Horizontal => [Direction::Left, Direction::Right],
            Axis::Vertical => [Direction::Up, Direction::Down],
        }
    }
}

/// Fire-and-forget audio notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// A tile was selected
    Select,
    /// Two tiles exchanged places for good
    Swap,
    /// A match was cleared
    Clear,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Select => "select",
            Cue::Swap => "swap",
            Cue::Clear => "clear",
        }
    }
}
