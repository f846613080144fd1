//! Rule presets and game configuration

use crate::types::{
    DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_KIND_COUNT, DEFAULT_MOVES,
    GUARDED_ROW_SIZE, SWAP_DELAY_MS, UNCONDITIONAL_ROW_SIZE,
};

/// How an adjacent swap between different tiles is settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapRule {
    /// Commit at once, clear whatever matches, always spend a move
    Unconditional,
    /// Keep the swap only if it creates a match, otherwise put the tiles back
    Guarded,
}

impl SwapRule {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unconditional" | "a" => Some(SwapRule::Unconditional),
            "guarded" | "b" => Some(SwapRule::Guarded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwapRule::Unconditional => "unconditional",
            SwapRule::Guarded => "guarded",
        }
    }
}

/// Matching and swapping rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    pub swap_rule: SwapRule,
    /// Partners (origin excluded) an axis needs to count as a match
    pub row_size: usize,
    /// Wait between a provisional swap and its resolution
    pub swap_delay_ms: u32,
}

impl RuleSet {
    /// Immediate-commit rules with the low threshold
    pub fn unconditional() -> Self {
        Self {
            swap_rule: SwapRule::Unconditional,
            row_size: UNCONDITIONAL_ROW_SIZE,
            swap_delay_ms: 0,
        }
    }

    /// Validate-then-commit rules with the raised threshold
    pub fn guarded() -> Self {
        Self {
            swap_rule: SwapRule::Guarded,
            row_size: GUARDED_ROW_SIZE,
            swap_delay_ms: SWAP_DELAY_MS,
        }
    }

    /// Preset for a swap rule
    pub fn for_rule(rule: SwapRule) -> Self {
        match rule {
            SwapRule::Unconditional => Self::unconditional(),
            SwapRule::Guarded => Self::guarded(),
        }
    }

    pub fn with_row_size(mut self, row_size: usize) -> Self {
        // A zero threshold would match every lone tile
        self.row_size = row_size.max(1);
        self
    }

    pub fn with_swap_delay_ms(mut self, ms: u32) -> Self {
        self.swap_delay_ms = ms;
        self
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::guarded()
    }
}

/// Everything needed to deal a new game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    /// Number of tile kinds in play, clamped to 2..=7 when dealing
    pub kinds: u8,
    /// Move budget
    pub moves: u32,
    pub rules: RuleSet,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            kinds: DEFAULT_KIND_COUNT,
            moves: DEFAULT_MOVES,
            rules: RuleSet::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let a = RuleSet::unconditional();
        assert_eq!(a.swap_rule, SwapRule::Unconditional);
        assert_eq!(a.row_size, 2);
        assert_eq!(a.swap_delay_ms, 0);

        let b = RuleSet::guarded();
        assert_eq!(b.swap_rule, SwapRule::Guarded);
        assert_eq!(b.row_size, 3);
        assert_eq!(b.swap_delay_ms, 200);

        assert_eq!(RuleSet::default(), b);
    }

    #[test]
    fn test_swap_rule_parse() {
        assert_eq!(SwapRule::from_str("Guarded"), Some(SwapRule::Guarded));
        assert_eq!(SwapRule::from_str("a"), Some(SwapRule::Unconditional));
        assert_eq!(SwapRule::from_str("sometimes"), None);
        for rule in [SwapRule::Unconditional, SwapRule::Guarded] {
            assert_eq!(SwapRule::from_str(rule.as_str()), Some(rule));
        }
    }

    #[test]
    fn test_row_size_never_zero() {
        assert_eq!(RuleSet::guarded().with_row_size(0).row_size, 1);
    }
}
