//! Match evaluator - decides whether a line runs through a cell and clears it
//!
//! A line is judged per axis: the cells found scanning both ways along the axis
//! are the cell's *partners*. A match exists on that axis when the partner count
//! reaches `row_size`. The origin is not counted towards the threshold, but it
//! is cleared together with its partners.

use crate::board::Board;
use crate::scan::scan;
use crate::types::{Axis, Coord};

/// Partners of `origin` along `axis` (both directions, origin excluded)
pub fn matches_through(board: &Board, origin: Coord, axis: Axis) -> Vec<Coord> {
    let [negative, positive] = axis.directions();
    scan(board, origin, positive)
        .chain(scan(board, origin, negative))
        .collect()
}

/// Count partners along `axis` without collecting them
fn partner_count(board: &Board, origin: Coord, axis: Axis) -> usize {
    let [negative, positive] = axis.directions();
    scan(board, origin, negative).count() + scan(board, origin, positive).count()
}

/// Whether any axis through `origin` reaches the threshold
///
/// Pure query; an empty origin never matches.
pub fn has_any_match(board: &Board, origin: Coord, row_size: usize) -> bool {
    if board.value(origin).is_none() {
        return false;
    }
    Axis::ALL
        .iter()
        .any(|&axis| partner_count(board, origin, axis) >= row_size)
}

/// The cells a clear through `origin` would empty
///
/// Each axis is judged on its own; partners of every matching axis are included,
/// followed by the origin. Empty when no axis matches.
pub fn clearable_set(board: &Board, origin: Coord, row_size: usize) -> Vec<Coord> {
    if board.value(origin).is_none() {
        return Vec::new();
    }

    let mut cleared = Vec::new();
    for axis in Axis::ALL {
        let partners = matches_through(board, origin, axis);
        if partners.len() >= row_size {
            cleared.extend(partners);
        }
    }
    if !cleared.is_empty() {
        cleared.push(origin);
    }
    cleared
}

/// Clear every match through `origin`, returning the emptied cells
///
/// Returns an empty vector (and leaves the board untouched) when nothing matches,
/// so calling it again right after a clear is a no-op.
pub fn clear_all_matches(board: &mut Board, origin: Coord, row_size: usize) -> Vec<Coord> {
    let cleared = clearable_set(board, origin, row_size);
    for &at in &cleared {
        board.set(at, None);
    }
    cleared
}
