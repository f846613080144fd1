//! Swap/commit engine - selection, provisional swaps, commit or revert
//!
//! State machine:
//!
//! ```text
//! Idle --select(c)--> Selected(c)
//! Selected(c) --select(c)--> Idle
//! Selected(c) --select(d), not adjacent--> Selected(d)
//! Selected(c) --select(d), adjacent, same kind--> Selected(d)   (grid untouched)
//! Selected(c) --select(d), adjacent--> [unconditional] commit --> Idle
//!                                      [guarded] PendingSwap(c, d)
//! PendingSwap --resolve_swap(token)--> commit or revert --> Idle
//! ```
//!
//! The engine never waits. A guarded swap hands back a [`PendingSwap`] naming how
//! long the caller should wait; the caller's scheduler then calls
//! [`SwapEngine::resolve_swap`] with its token. While a swap is pending every
//! other selection is refused.

use log::{debug, trace};

use crate::core::{matching, Board};
use crate::rules::{RuleSet, SwapRule};
use crate::types::{Coord, Cue};

/// Collaborators the engine reports to
///
/// The board owner answers refill questions, keeps the move budget and plays cues.
pub trait BoardHooks {
    /// Whether a refill sweep is currently moving tiles
    fn is_shifting(&self) -> bool;
    /// Cancel the sweep in flight (if any) and start a new one
    fn restart_refill_sweep(&mut self);
    fn moves_left(&self) -> u32;
    /// Charge one move for a committed swap
    fn spend_move(&mut self);
    /// Fire-and-forget audio notification
    fn play_cue(&mut self, cue: Cue);
}

/// Identifies one provisional swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapToken(u32);

impl SwapToken {
    pub fn id(&self) -> u32 {
        self.0
    }

    pub fn from_id(id: u32) -> Self {
        Self(id)
    }
}

/// A provisional swap waiting for its resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSwap {
    pub token: SwapToken,
    /// The cell selected first
    pub first: Coord,
    /// The adjacent cell it was swapped with
    pub second: Coord,
    /// How long the caller should wait before resolving
    pub wait_ms: u32,
    /// Whether resolving will keep the swap (a match was found) or put the tiles back
    pub will_commit: bool,
}

/// Engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Idle,
    Selected(Coord),
    PendingSwap(PendingSwap),
}

/// Why a selection was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// A refill sweep is running
    Shifting,
    /// A provisional swap is waiting to be resolved
    SwapInFlight,
    /// No moves are left
    OutOfMoves,
    OutOfBounds,
    EmptyCell,
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IgnoreReason::Shifting => "shifting",
            IgnoreReason::SwapInFlight => "swap_in_flight",
            IgnoreReason::OutOfMoves => "out_of_moves",
            IgnoreReason::OutOfBounds => "out_of_bounds",
            IgnoreReason::EmptyCell => "empty_cell",
        }
    }
}

/// A swap that was kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub first: Coord,
    pub second: Coord,
    /// Every cell emptied by the commit, in clearing order
    pub cleared: Vec<Coord>,
}

impl CommitReport {
    pub fn matched(&self) -> bool {
        !self.cleared.is_empty()
    }
}

/// Result of [`SwapEngine::select`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing changed
    Ignored(IgnoreReason),
    Selected(Coord),
    /// The selected cell was clicked again
    Deselected(Coord),
    /// A non-adjacent cell took over the selection
    Reselected { from: Coord, to: Coord },
    /// Adjacent cell of the same kind: no swap, selection moves to `to`
    SameKindRejected { from: Coord, to: Coord },
    /// Guarded rule: tiles exchanged provisionally, resolve after `wait_ms`
    SwapPending(PendingSwap),
    /// Unconditional rule: swap committed on the spot
    Committed(CommitReport),
}

/// Result of [`SwapEngine::resolve_swap`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapResolution {
    Committed(CommitReport),
    /// No match: tiles are back where they were, no move spent
    Reverted { first: Coord, second: Coord },
    /// The token does not name the swap in flight
    Stale,
}

/// The swap/commit state machine for one board
#[derive(Debug, Clone)]
pub struct SwapEngine {
    rules: RuleSet,
    state: EngineState,
    next_token: u32,
}

impl SwapEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            state: EngineState::Idle,
            next_token: 1,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The selected cell, if any
    pub fn selected(&self) -> Option<Coord> {
        match self.state {
            EngineState::Selected(at) => Some(at),
            _ => None,
        }
    }

    /// The provisional swap in flight, if any
    pub fn pending(&self) -> Option<PendingSwap> {
        match self.state {
            EngineState::PendingSwap(pending) => Some(pending),
            _ => None,
        }
    }

    /// Handle a click on `at`
    pub fn select<H: BoardHooks + ?Sized>(
        &mut self,
        board: &mut Board,
        hooks: &mut H,
        at: Coord,
    ) -> SelectOutcome {
        if hooks.is_shifting() {
            return SelectOutcome::Ignored(IgnoreReason::Shifting);
        }
        if matches!(self.state, EngineState::PendingSwap(_)) {
            return SelectOutcome::Ignored(IgnoreReason::SwapInFlight);
        }
        if hooks.moves_left() == 0 {
            return SelectOutcome::Ignored(IgnoreReason::OutOfMoves);
        }
        if !board.contains(at) {
            return SelectOutcome::Ignored(IgnoreReason::OutOfBounds);
        }
        let Some(kind) = board.value(at) else {
            return SelectOutcome::Ignored(IgnoreReason::EmptyCell);
        };

        let prev = match self.state {
            EngineState::Selected(prev) => prev,
            _ => {
                self.select_cell(hooks, at);
                return SelectOutcome::Selected(at);
            }
        };

        if prev == at {
            self.state = EngineState::Idle;
            trace!(target: "engine", "deselected {}", at);
            return SelectOutcome::Deselected(at);
        }

        match board.value(prev) {
            // The selected tile was cleared from under the selection
            None => {
                self.select_cell(hooks, at);
                SelectOutcome::Selected(at)
            }
            Some(_) if !board.is_adjacent(prev, at) => {
                self.select_cell(hooks, at);
                SelectOutcome::Reselected { from: prev, to: at }
            }
            Some(prev_kind) if prev_kind == kind => {
                self.select_cell(hooks, at);
                debug!(target: "engine", "same-kind swap {} <-> {} rejected", prev, at);
                SelectOutcome::SameKindRejected { from: prev, to: at }
            }
            Some(_) => self.begin_swap(board, hooks, prev, at),
        }
    }

    fn select_cell<H: BoardHooks + ?Sized>(&mut self, hooks: &mut H, at: Coord) {
        self.state = EngineState::Selected(at);
        hooks.play_cue(Cue::Select);
        trace!(target: "engine", "selected {}", at);
    }

    fn begin_swap<H: BoardHooks + ?Sized>(
        &mut self,
        board: &mut Board,
        hooks: &mut H,
        first: Coord,
        second: Coord,
    ) -> SelectOutcome {
        board.swap(first, second);

        match self.rules.swap_rule {
            SwapRule::Unconditional => {
                SelectOutcome::Committed(self.commit(board, hooks, first, second))
            }
            SwapRule::Guarded => {
                let will_commit = matching::has_any_match(board, second, self.rules.row_size)
                    || matching::has_any_match(board, first, self.rules.row_size);
                let token = SwapToken(self.next_token);
                self.next_token = self.next_token.wrapping_add(1);

                let pending = PendingSwap {
                    token,
                    first,
                    second,
                    wait_ms: self.rules.swap_delay_ms,
                    will_commit,
                };
                self.state = EngineState::PendingSwap(pending);
                debug!(
                    target: "engine",
                    "provisional swap {} <-> {} (token {}, commit: {})",
                    first, second, token.0, will_commit
                );
                SelectOutcome::SwapPending(pending)
            }
        }
    }

    /// Settle the provisional swap named by `token`
    pub fn resolve_swap<H: BoardHooks + ?Sized>(
        &mut self,
        board: &mut Board,
        hooks: &mut H,
        token: SwapToken,
    ) -> SwapResolution {
        let pending = match self.state {
            EngineState::PendingSwap(pending) if pending.token == token => pending,
            _ => return SwapResolution::Stale,
        };

        if pending.will_commit {
            return SwapResolution::Committed(self.commit(
                board,
                hooks,
                pending.first,
                pending.second,
            ));
        }

        board.swap(pending.first, pending.second);
        self.state = EngineState::Idle;
        debug!(target: "engine", "reverted swap {} <-> {}", pending.first, pending.second);
        SwapResolution::Reverted {
            first: pending.first,
            second: pending.second,
        }
    }

    fn commit<H: BoardHooks + ?Sized>(
        &mut self,
        board: &mut Board,
        hooks: &mut H,
        first: Coord,
        second: Coord,
    ) -> CommitReport {
        hooks.play_cue(Cue::Swap);
        hooks.spend_move();
        self.state = EngineState::Idle;

        let mut cleared = self.clear_matches(board, hooks, first);
        cleared.extend(self.clear_matches(board, hooks, second));
        debug!(
            target: "engine",
            "committed swap {} <-> {}, {} cells cleared",
            first, second, cleared.len()
        );

        CommitReport {
            first,
            second,
            cleared,
        }
    }

    /// Clear every match through `at`, returning the emptied cells
    pub fn clear_matches<H: BoardHooks + ?Sized>(
        &self,
        board: &mut Board,
        hooks: &mut H,
        at: Coord,
    ) -> Vec<Coord> {
        let cleared = matching::clear_all_matches(board, at, self.rules.row_size);
        if !cleared.is_empty() {
            hooks.restart_refill_sweep();
            hooks.play_cue(Cue::Clear);
        }
        cleared
    }

    /// Clear every match through `at`; true if anything was cleared
    pub fn clear_all_matches<H: BoardHooks + ?Sized>(
        &self,
        board: &mut Board,
        hooks: &mut H,
        at: Coord,
    ) -> bool {
        !self.clear_matches(board, hooks, at).is_empty()
    }

    /// Whether a match runs through `at` right now (no side effects)
    pub fn find_any_matches(&self, board: &Board, at: Coord) -> bool {
        matching::has_any_match(board, at, self.rules.row_size)
    }
}
