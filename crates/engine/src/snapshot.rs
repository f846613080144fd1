use crate::swap::PendingSwap;
use crate::types::Coord;

/// Observable game state, cheap to refill via [`Game::snapshot_into`](crate::Game::snapshot_into)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// One row per board row, tile codes with `0` for empty cells
    pub board: Vec<Vec<u8>>,
    pub selected: Option<Coord>,
    pub pending: Option<PendingSwap>,
    pub moves_left: u32,
    pub moves_budget: u32,
    pub shifting: bool,
    pub refill_generation: u32,
    pub game_over: bool,
    pub seed: u32,
}

impl GameSnapshot {
    /// Whether a click could currently do anything
    pub fn playable(&self) -> bool {
        !self.game_over && !self.shifting && self.pending.is_none()
    }

    pub fn empty_cells(&self) -> usize {
        self.board.iter().flatten().filter(|&&code| code == 0).count()
    }
}
