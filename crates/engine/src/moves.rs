//! Move counter - the budget of committed swaps left in a game

/// Saturating move budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCounter {
    budget: u32,
    remaining: u32,
}

impl MoveCounter {
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            remaining: budget,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn spent(&self) -> u32 {
        self.budget - self.remaining
    }

    /// Spend one move; returns false if none were left
    pub fn spend(&mut self) -> bool {
        match self.remaining.checked_sub(1) {
            Some(left) => {
                self.remaining = left;
                true
            }
            None => false,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    pub fn reset(&mut self) {
        self.remaining = self.budget;
    }
}
