//! Seeded simulation RNG.
//!
//! Fault draws come from a `SmallRng` seeded with `ParkingConfig::seed`, so
//! a run replays exactly.  [`SimRng::split`] hands each reservation run its
//! own stream, which keeps run *n*'s draws independent of how long the
//! earlier runs were.

use rand::rngs::SmallRng;
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::{Rng, RngCore, SeedableRng};

/// Odd constant that spreads consecutive stream numbers across the seed space.
const STREAM_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// Reproducible RNG owned by one fault source.
#[derive(Debug, Clone)]
pub struct SimRng {
    rng: SmallRng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    /// Derive the RNG for stream number `stream`.  Advances `self` by one
    /// draw.
    pub fn split(&mut self, stream: u64) -> SimRng {
        let seed = self.rng.next_u64() ^ stream.wrapping_mul(STREAM_SPREAD);
        Self::new(seed)
    }

    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.gen_range(range)
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }
}
