//! Seeded random source
//!
//! Each game owns its own generator, forked from the campaign seed, so a run
//! is reproducible from one `u64`. Generator state is serialized with the game.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Uniform real and integer draws over a PCG32 stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRng {
    seed: u64,
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform real in `[0, 1)`
    pub fn uniform(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform integer in `[lo, hi]` (inclusive)
    pub fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    /// Bernoulli trial with probability `p`
    pub fn chance(&mut self, p: f32) -> bool {
        self.uniform() < p
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Derive an independent child generator (one draw from this stream)
    pub fn fork(&mut self) -> GameRng {
        GameRng::new(self.rng.next_u64())
    }
}
