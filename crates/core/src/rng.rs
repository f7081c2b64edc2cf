//! RNG module - tile spawn randomness
//!
//! A small LCG is enough for picking a spawn cell and the 2-or-4 coin. It is
//! deterministic for a given seed, which keeps tests and replays stable. On
//! the board the seed is the free-running timer count at power-up.

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
    ///
    /// `max` must be nonzero.
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of a power-of-two LCG are weak; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// True with probability `1 / n`
    pub fn one_in(&mut self, n: u32) -> bool {
        self.next_range(n) == 0
    }

    /// Current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
