//! Deterministic RNG for piece generation
//!
//! Uses a simple LCG (Linear Congruential Generator) for reproducible
//! sequences. Same seed always produces the same piece order.

use crate::types::PieceKind;

/// Simple deterministic RNG (LCG algorithm)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid zero state
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG parameters from Numerical Recipes
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random number in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Uniform piece picker: every draw samples all seven kinds independently
#[derive(Debug, Clone)]
pub struct PiecePicker {
    rng: SimpleRng,
}

impl PiecePicker {
    /// Create a new picker with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    /// Current RNG state, usable to reseed a picker at the same point
    pub fn seed(&self) -> u32 {
        self.rng.state
    }
}

impl Default for PiecePicker {
    fn default() -> Self {
        Self::new(1)
    }
}
