//! Game module - owns one board and everything that acts on it
//!
//! Ties together the board, the swap engine, the refill sweep, the move budget and
//! the cue queue. Callers drive it with three entry points:
//!
//! - [`Game::select`] for every click
//! - [`Game::resolve_swap`] once the wait of a pending swap has elapsed
//! - [`Game::advance_refill`] every `REFILL_STEP_MS` while [`Game::is_shifting`]

use log::{debug, info, warn};

use crate::core::{Board, BoardError, RefillStep, RefillSweep, TileSource};
use crate::moves::MoveCounter;
use crate::rules::GameConfig;
use crate::snapshot::GameSnapshot;
use crate::swap::{
    BoardHooks, EngineState, PendingSwap, SelectOutcome, SwapEngine, SwapResolution, SwapToken,
};
use crate::types::{Coord, Cue, MAX_CASCADES};

/// Result of one [`Game::advance_refill`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefillTick {
    /// No sweep is running
    Idle,
    /// One gravity step was applied
    Shifted { moved: usize, spawned: usize },
    /// The board filled up and new matches were cleared; the sweep starts over
    Cascade { cleared: usize },
    /// The board is full and stable
    Settled,
}

/// The collaborators the engine talks to, owned by the game
#[derive(Debug, Clone)]
struct GameHooks {
    refill: RefillSweep,
    moves: MoveCounter,
    cues: Vec<Cue>,
}

impl BoardHooks for GameHooks {
    fn is_shifting(&self) -> bool {
        self.refill.is_running()
    }

    fn restart_refill_sweep(&mut self) {
        self.refill.restart();
    }

    fn moves_left(&self) -> u32 {
        self.moves.remaining()
    }

    fn spend_move(&mut self) {
        self.moves.spend();
    }

    fn play_cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    engine: SwapEngine,
    hooks: GameHooks,
    source: TileSource,
    config: GameConfig,
    /// Cascades since the board last settled
    cascades: u32,
}

impl Game {
    /// Deal a new game from `seed`
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, BoardError> {
        let mut source = TileSource::new(seed, config.kinds);
        let board = Board::generate(config.width, config.height, &mut source)?;
        info!(
            "new {}x{} game, {} kinds, {} moves, {} rules (seed {})",
            config.width,
            config.height,
            source.kinds(),
            config.moves,
            config.rules.swap_rule.as_str(),
            seed
        );
        Ok(Self::assemble(board, config, source))
    }

    /// Start from an explicit board; refills are dealt from `seed`
    ///
    /// The board's own dimensions take precedence over `config.width`/`config.height`.
    pub fn from_board(board: Board, config: GameConfig, seed: u32) -> Self {
        let config = GameConfig {
            width: board.width(),
            height: board.height(),
            ..config
        };
        let source = TileSource::new(seed, config.kinds);
        Self::assemble(board, config, source)
    }

    fn assemble(board: Board, config: GameConfig, source: TileSource) -> Self {
        let config = GameConfig {
            kinds: source.kinds(),
            ..config
        };
        Self {
            board,
            engine: SwapEngine::new(config.rules),
            hooks: GameHooks {
                refill: RefillSweep::new(),
                moves: MoveCounter::new(config.moves),
                cues: Vec::new(),
            },
            source,
            config,
            cascades: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn selected(&self) -> Option<Coord> {
        self.engine.selected()
    }

    pub fn pending_swap(&self) -> Option<PendingSwap> {
        self.engine.pending()
    }

    pub fn moves_left(&self) -> u32 {
        self.hooks.moves.remaining()
    }

    pub fn is_shifting(&self) -> bool {
        self.hooks.refill.is_running()
    }

    /// Out of moves and nothing left to settle
    pub fn is_over(&self) -> bool {
        self.hooks.moves.is_exhausted() && !self.is_shifting() && self.engine.pending().is_none()
    }

    /// Handle a click on `at`
    pub fn select(&mut self, at: Coord) -> SelectOutcome {
        self.engine.select(&mut self.board, &mut self.hooks, at)
    }

    /// Settle the provisional swap named by `token`
    pub fn resolve_swap(&mut self, token: SwapToken) -> SwapResolution {
        self.engine
            .resolve_swap(&mut self.board, &mut self.hooks, token)
    }

    /// Clear every match through `at`; true if anything was cleared
    pub fn clear_all_matches(&mut self, at: Coord) -> bool {
        self.engine
            .clear_all_matches(&mut self.board, &mut self.hooks, at)
    }

    /// Whether a match runs through `at` right now
    pub fn find_any_matches(&self, at: Coord) -> bool {
        self.engine.find_any_matches(&self.board, at)
    }

    /// Take the cues queued since the last call
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.hooks.cues)
    }

    /// Apply one refill step; when the board fills up, clear any matches it formed
    ///
    /// After `MAX_CASCADES` cascades in a row the filled board is kept as it is.
    pub fn advance_refill(&mut self) -> RefillTick {
        match self.hooks.refill.step(&mut self.board, &mut self.source) {
            RefillStep::Idle => RefillTick::Idle,
            RefillStep::Shifted { moved, spawned } => RefillTick::Shifted { moved, spawned },
            RefillStep::Settled => {
                if self.cascades >= MAX_CASCADES {
                    warn!(target: "refill", "{} cascades in a row, keeping the board", self.cascades);
                    self.cascades = 0;
                    return RefillTick::Settled;
                }
                let cleared = self.clear_cascade();
                if cleared == 0 {
                    self.cascades = 0;
                    RefillTick::Settled
                } else {
                    self.cascades += 1;
                    debug!(target: "refill", "cascade cleared {} cells", cleared);
                    RefillTick::Cascade { cleared }
                }
            }
        }
    }

    /// Step the refill sweep (cascades included) until the board is stable
    ///
    /// Returns the number of refill ticks applied.
    pub fn settle(&mut self) -> u32 {
        let mut ticks = 0;
        while self.is_shifting() {
            self.advance_refill();
            ticks += 1;
        }
        ticks
    }

    /// Clear matches anywhere on the board; returns the number of emptied cells
    fn clear_cascade(&mut self) -> usize {
        let coords: Vec<Coord> = self.board.coords().collect();
        coords
            .into_iter()
            .map(|at| {
                self.engine
                    .clear_matches(&mut self.board, &mut self.hooks, at)
                    .len()
            })
            .sum()
    }

    /// Write the observable state into `out`, reusing its allocations
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.width = self.board.width();
        out.height = self.board.height();
        out.selected = self.engine.selected();
        out.pending = self.engine.pending();
        out.moves_left = self.hooks.moves.remaining();
        out.moves_budget = self.hooks.moves.budget();
        out.shifting = self.is_shifting();
        out.refill_generation = self.hooks.refill.generation();
        out.game_over = self.is_over();
        out.seed = self.source.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
