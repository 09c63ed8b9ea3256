//! Random draws used by the cascade stepper.
//!
//! The stepper only ever asks for two things: a Bernoulli trial and a uniform
//! collapse deposit in `[0, upper)`. Keeping them behind a trait lets each run
//! own its generator and lets tests substitute a deterministic source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Returns `true` with probability `p`.
    fn bernoulli(&mut self, p: f64) -> bool;
    /// Returns a value uniformly distributed in `[0, upper)`.
    fn uniform(&mut self, upper: f64) -> f64;
}

/// Adapts any `rand::Rng` into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn bernoulli(&mut self, p: f64) -> bool {
        self.rng.r#gen::<f64>() < p
    }

    fn uniform(&mut self, upper: f64) -> f64 {
        // gen_range panics on an empty range; scaling a unit draw does not.
        self.rng.r#gen::<f64>() * upper
    }
}

/// Seeded standard generator for one cascade run.
pub fn seeded(seed: u64) -> RngSource<StdRng> {
    RngSource::new(StdRng::seed_from_u64(seed))
}

/// Deterministic source: every trial has the same outcome and every uniform
/// draw returns the same fraction of its range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSource {
    pub succeed: bool,
    /// Fraction of `upper` returned by [`RandomSource::uniform`], in `[0, 1)`.
    pub fraction: f64,
}

impl FixedSource {
    pub fn new(succeed: bool, fraction: f64) -> Self {
        Self { succeed, fraction }
    }

    /// Every trial succeeds; collapse draws return the midpoint.
    pub fn always() -> Self {
        Self::new(true, 0.5)
    }

    /// Every trial fails; collapse draws return the midpoint.
    pub fn never() -> Self {
        Self::new(false, 0.5)
    }
}

impl RandomSource for FixedSource {
    fn bernoulli(&mut self, _p: f64) -> bool {
        self.succeed
    }

    fn uniform(&mut self, upper: f64) -> f64 {
        self.fraction * upper
    }
}
