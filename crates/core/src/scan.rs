//! Match scanner - walks outward from a cell while the kind stays the same

use crate::board::Board;
use crate::types::{Coord, Direction, TileKind};

/// Lazy walk from an origin cell along one direction
///
/// Yields each neighbour in turn while it holds the origin's kind; stops at the
/// first different or empty cell, or at the board edge. The origin itself is
/// never yielded, and an empty origin yields nothing.
#[derive(Debug, Clone)]
pub struct Scan<'a> {
    board: &'a Board,
    kind: Option<TileKind>,
    cursor: Coord,
    direction: Direction,
}

impl Iterator for Scan<'_> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        let kind = self.kind?;
        let next = self.board.neighbor(self.cursor, self.direction);
        match next {
            Some(at) if self.board.value(at) == Some(kind) => {
                self.cursor = at;
                Some(at)
            }
            _ => {
                self.kind = None;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for Scan<'_> {}

/// Start a scan from `origin` towards `direction`
pub fn scan(board: &Board, origin: Coord, direction: Direction) -> Scan<'_> {
    Scan {
        board,
        kind: board.value(origin),
        cursor: origin,
        direction,
    }
}
