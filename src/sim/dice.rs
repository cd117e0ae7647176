//! Injectable random source
//!
//! Every randomized attribute (color, shape, value, position) is drawn through
//! [`Dice`]. Production uses a seeded PCG; tests can script exact draws.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Default game RNG
pub type GameRng = Pcg32;

/// Create the default RNG from a run seed
pub fn seeded_rng(seed: u64) -> GameRng {
    Pcg32::seed_from_u64(seed)
}

/// Source of uniform random draws
pub trait Dice {
    /// Uniform float in [0, 1)
    fn unit(&mut self) -> f32;

    /// Uniform integer in [0, sides). Returns 0 when `sides` is 0.
    fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        ((self.unit() * sides as f32) as u32).min(sides - 1)
    }

    /// Uniform float in [lo, hi)
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo)
    }

    /// Pick one element from a non-empty slice
    fn pick<T: Copy>(&mut self, items: &[T]) -> T
    where
        Self: Sized,
    {
        debug_assert!(!items.is_empty(), "pick from empty set");
        items[self.roll(items.len() as u32) as usize]
    }

    /// Fisher-Yates shuffle
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.roll(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}

impl Dice for Pcg32 {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }

    fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            0
        } else {
            self.random_range(0..sides)
        }
    }
}

/// Replays a fixed list of unit draws, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl Dice for ScriptedDice {
    fn unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 0.999_999)
    }
}
