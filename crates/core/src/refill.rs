//! Refill sweep - pulls tiles down into cleared cells and deals new ones at the top
//!
//! The sweep is stepwise so the caller decides the cadence (see `REFILL_STEP_MS`).
//! One step moves every column with a gap down by one row: the lowest empty cell
//! takes the tile above it, everything above follows, and a new tile is dealt into
//! row 0. Once no column has a gap, the sweep settles.
//!
//! Restarting is cancel-then-restart: a new request supersedes whatever sweep is
//! in flight, it is never queued behind it.

use arrayvec::ArrayVec;
use log::trace;

use crate::board::Board;
use crate::rng::TileSource;
use crate::types::{Coord, Direction, TileKind};

/// Result of one [`RefillSweep::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefillStep {
    /// No sweep is running
    Idle,
    /// One gravity step was applied
    Shifted { moved: usize, spawned: usize },
    /// No gaps remain; the sweep has stopped
    Settled,
}

/// Refill sweep state
#[derive(Debug, Clone, Default)]
pub struct RefillSweep {
    running: bool,
    /// Incremented on every restart; identifies the sweep in flight
    generation: u32,
    /// Steps taken by the current generation
    steps: u32,
}

impl RefillSweep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop any sweep in flight and start a new one
    ///
    /// Returns the generation of the new sweep.
    pub fn restart(&mut self) -> u32 {
        if self.running {
            trace!(target: "refill", "superseding sweep {} after {} steps", self.generation, self.steps);
        }
        self.generation = self.generation.wrapping_add(1);
        self.running = true;
        self.steps = 0;
        self.generation
    }

    /// Stop the sweep in flight without starting another
    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Apply one gravity step
    pub fn step(&mut self, board: &mut Board, source: &mut TileSource) -> RefillStep {
        if !self.running {
            return RefillStep::Idle;
        }

        let mut moved = 0;
        let mut spawned = 0;
        for x in 0..board.width() {
            let Some(gap) = (0..board.height())
                .rev()
                .find(|&y| board.is_empty_at(Coord::new(x, y)))
            else {
                continue;
            };

            for y in (1..=gap).rev() {
                let above = board.value(Coord::new(x, y - 1));
                if above.is_some() {
                    moved += 1;
                }
                board.set(Coord::new(x, y), above);
            }

            let top = Coord::new(x, 0);
            let avoid: ArrayVec<TileKind, 2> = [Direction::Left, Direction::Right]
                .iter()
                .filter_map(|&dir| board.neighbor(top, dir).and_then(|n| board.value(n)))
                .collect();
            board.set(top, Some(source.draw_avoiding(&avoid)));
            spawned += 1;
        }

        if spawned == 0 {
            self.running = false;
            trace!(target: "refill", "sweep {} settled after {} steps", self.generation, self.steps);
            return RefillStep::Settled;
        }

        self.steps += 1;
        RefillStep::Shifted { moved, spawned }
    }

    /// Step until the board has no gaps
    ///
    /// Returns the number of gravity steps taken.
    pub fn run_to_completion(&mut self, board: &mut Board, source: &mut TileSource) -> u32 {
        let mut taken = 0;
        while let RefillStep::Shifted { .. } = self.step(board, source) {
            taken += 1;
        }
        taken
    }
}
