//! Fault injection: "someone else took the spot".
//!
//! The simulator draws once per tick from a [`FaultSource`].  Production
//! runs use [`RandomFault`] seeded from the lot's RNG; tests pin the outcome
//! with [`NeverFault`] or replay an exact sequence with [`ScriptedFault`].

use std::collections::VecDeque;

use sp_core::SimRng;

/// Per-tick fault draw.
pub trait FaultSource: Send {
    /// Called once before run number `run` draws anything.
    fn begin_run(&mut self, _run: u64) {}

    /// `true` if the reserved spot was just taken by another vehicle.
    fn spot_taken(&mut self) -> bool;
}

impl<F: FaultSource + ?Sized> FaultSource for Box<F> {
    fn begin_run(&mut self, run: u64) {
        (**self).begin_run(run)
    }

    fn spot_taken(&mut self) -> bool {
        (**self).spot_taken()
    }
}

// ── RandomFault ───────────────────────────────────────────────────────────────

/// Bernoulli fault with probability `probability` per tick.
///
/// Each run draws from its own split of the root RNG, so run *n* sees the
/// same fault sequence however many ticks earlier runs took.
#[derive(Debug, Clone)]
pub struct RandomFault {
    root:        SimRng,
    rng:         SimRng,
    probability: f64,
}

impl RandomFault {
    /// `probability` is clamped to `[0, 1]`; NaN counts as `0`.
    pub fn new(rng: SimRng, probability: f64) -> Self {
        let probability = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
        Self { root: rng.clone(), rng, probability }
    }

    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl FaultSource for RandomFault {
    fn begin_run(&mut self, run: u64) {
        self.rng = self.root.split(run);
    }

    fn spot_taken(&mut self) -> bool {
        self.rng.unit() < self.probability
    }
}

// ── NeverFault ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverFault;

impl FaultSource for NeverFault {
    fn spot_taken(&mut self) -> bool {
        false
    }
}

// ── ScriptedFault ─────────────────────────────────────────────────────────────

/// Replays a fixed sequence of draws; `false` once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFault {
    script: VecDeque<bool>,
}

impl ScriptedFault {
    pub fn new(script: impl IntoIterator<Item = bool>) -> Self {
        Self { script: script.into_iter().collect() }
    }

    /// Fault on tick `n` (1-based) and never before.
    pub fn on_tick(n: usize) -> Self {
        Self::new((1..=n).map(|t| t == n))
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl FaultSource for ScriptedFault {
    fn spot_taken(&mut self) -> bool {
        self.script.pop_front().unwrap_or(false)
    }
}
