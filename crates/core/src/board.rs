//! Board module - manages the game grid and neighbour lookup
//!
//! The board is a `width x height` grid where each cell is empty or holds a tile kind.
//! Uses a flat vector in row-major order (`y * width + x`) for cache locality.
//! Coordinates: (x, y) where x grows to the right and y grows downwards (row 0 is the top).
//!
//! Neighbour lookup is plain coordinate arithmetic bounded by the grid size. It is
//! recomputed on every call and never wraps around an edge.

use arrayvec::ArrayVec;

use crate::rng::TileSource;
use crate::types::{Cell, Coord, Direction, TileKind};

/// Errors raised while building a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Width or height is zero
    Empty,
    /// Width or height does not fit the `u8` coordinate space
    TooLarge { width: usize, height: usize },
    /// A row has a different length than the first one
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::Empty => write!(f, "board must have at least one row and one column"),
            BoardError::TooLarge { width, height } => {
                write!(f, "board {}x{} exceeds 255x255", width, height)
            }
            BoardError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
        }
    }
}

impl std::error::Error for BoardError {}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board
    pub fn new(width: u8, height: u8) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::Empty);
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        })
    }

    /// Create a board from an explicit initial assignment, one `Vec` per row (top row first)
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(BoardError::Empty);
        }
        if width > u8::MAX as usize || height > u8::MAX as usize {
            return Err(BoardError::TooLarge { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    /// Deal a full board from `source`
    ///
    /// Each tile avoids the kind of its left neighbour and of the tile above it, so a
    /// freshly dealt board never starts with a same-kind pair along those edges
    /// (as long as at least three kinds are in play).
    pub fn generate(width: u8, height: u8, source: &mut TileSource) -> Result<Self, BoardError> {
        let mut board = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                let at = Coord::new(x, y);
                let mut avoid: ArrayVec<TileKind, 2> = ArrayVec::new();
                for dir in [Direction::Left, Direction::Up] {
                    if let Some(kind) = board.neighbor(at, dir).and_then(|n| board.value(n)) {
                        avoid.push(kind);
                    }
                }
                let kind = source.draw_avoiding(&avoid);
                board.set(at, Some(kind));
            }
        }
        Ok(board)
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, at: Coord) -> Option<usize> {
        if at.x >= self.width || at.y >= self.height {
            return None;
        }
        Some(at.y as usize * self.width as usize + at.x as usize)
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Check if a coordinate lies on the board
    pub fn contains(&self, at: Coord) -> bool {
        at.x < self.width && at.y < self.height
    }

    /// Get cell at a coordinate
    /// Returns None if out of bounds
    pub fn get(&self, at: Coord) -> Option<Cell> {
        self.index(at).map(|idx| self.cells[idx])
    }

    /// Tile kind at a coordinate; `None` for empty cells and for coordinates off the board
    pub fn value(&self, at: Coord) -> Option<TileKind> {
        self.get(at).flatten()
    }

    /// Set cell at a coordinate
    /// Returns false if out of bounds
    pub fn set(&mut self, at: Coord, cell: Cell) -> bool {
        match self.index(at) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if the coordinate is on the board and holds no tile
    pub fn is_empty_at(&self, at: Coord) -> bool {
        matches!(self.get(at), Some(None))
    }

    /// The adjacent coordinate in `direction`, or `None` past the edge
    pub fn neighbor(&self, at: Coord, direction: Direction) -> Option<Coord> {
        if !self.contains(at) {
            return None;
        }
        let (dx, dy) = direction.delta();
        let next = Coord::new(at.x.checked_add_signed(dx)?, at.y.checked_add_signed(dy)?);
        self.contains(next).then_some(next)
    }

    /// All on-board neighbours, in [`Direction::ALL`] order
    ///
    /// Corner cells have two, edge cells three, inner cells four.
    pub fn neighbors(&self, at: Coord) -> ArrayVec<Coord, 4> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.neighbor(at, dir))
            .collect()
    }

    /// Check if two coordinates share an edge
    pub fn is_adjacent(&self, a: Coord, b: Coord) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Exchange the contents of two cells
    /// Returns false if either coordinate is out of bounds
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Iterate every coordinate in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Coord::new(x, y)))
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the board as a grid of tile codes (`0` = empty)
    ///
    /// Reuses the rows already allocated in `out`.
    pub fn write_u8_grid(&self, out: &mut Vec<Vec<u8>>) {
        let width = self.width as usize;
        out.resize_with(self.height as usize, Vec::new);
        for (y, row) in out.iter_mut().enumerate() {
            row.clear();
            row.extend(
                self.cells[y * width..(y + 1) * width]
                    .iter()
                    .map(|cell| cell.map_or(0, |kind| kind.code())),
            );
        }
    }

    /// Convert to 2D vector (one `Vec` per row) for testing/display
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}
