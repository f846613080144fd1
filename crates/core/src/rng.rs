//! RNG module - bag-based tile dealing
//!
//! Tiles are dealt from a shuffled "bag" holding one tile of each enabled kind.
//! Draws empty the bag, then a fresh bag is shuffled. This keeps kinds evenly
//! spread across the board while staying fully deterministic for a given seed.
//!
//! Also provides a simple LCG for deterministic testing.

use arrayvec::ArrayVec;

use crate::types::{TileKind, MIN_KIND_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Bag dealer for new tiles
#[derive(Debug, Clone)]
pub struct TileSource {
    /// Remaining tiles of the current bag (drawn from the back)
    bag: ArrayVec<TileKind, 7>,
    /// Number of kinds in play (2..=7)
    kinds: u8,
    seed: u32,
    rng: SimpleRng,
}

impl TileSource {
    /// Create a dealer over the first `kinds` tile kinds
    ///
    /// `kinds` is clamped to `2..=7`.
    pub fn new(seed: u32, kinds: u8) -> Self {
        let mut source = Self {
            bag: ArrayVec::new(),
            kinds: kinds.clamp(MIN_KIND_COUNT, TileKind::ALL.len() as u8),
            seed,
            rng: SimpleRng::new(seed),
        };
        source.refill_bag();
        source
    }

    /// Shuffle a fresh bag, dropping whatever was left of the old one
    fn refill_bag(&mut self) {
        self.bag.clear();
        self.bag
            .extend(TileKind::ALL[..self.kinds as usize].iter().copied());
        self.rng.shuffle(&mut self.bag);
    }

    /// Draw the next tile
    pub fn draw(&mut self) -> TileKind {
        if self.bag.is_empty() {
            self.refill_bag();
        }
        match self.bag.pop() {
            Some(kind) => kind,
            // refill_bag always leaves at least one kind behind
            None => TileKind::ALL[0],
        }
    }

    /// Draw a tile whose kind is not in `avoid`, if the kinds in play allow it
    ///
    /// Falls back to a plain draw when every kind in play is avoided.
    pub fn draw_avoiding(&mut self, avoid: &[TileKind]) -> TileKind {
        if self.bag.is_empty() {
            self.refill_bag();
        }
        if let Some(pos) = self.bag.iter().rposition(|k| !avoid.contains(k)) {
            return self.bag.remove(pos);
        }

        // Only avoided kinds remain in this bag.
        self.refill_bag();
        match self.bag.iter().rposition(|k| !avoid.contains(k)) {
            Some(pos) => self.bag.remove(pos),
            None => self.draw(),
        }
    }

    /// Number of kinds in play
    pub fn kinds(&self) -> u8 {
        self.kinds
    }

    /// Seed the dealer was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Tiles still in the current bag, for testing/debugging
    #[cfg(test)]
    pub fn current_bag(&self) -> &[TileKind] {
        &self.bag
    }
}

impl Default for TileSource {
    fn default() -> Self {
        Self::new(1, crate::types::DEFAULT_KIND_COUNT)
    }
}
