use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{CascadeError, Result, ensure_positive};
use crate::sim::cascade::BremsstrahlungPolicy;

/// Configuration of an ensemble run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    /// Energies of the incident electron in MeV, one ensemble per entry.
    pub initial_energies: Vec<f64>,
    /// Independent showers per initial energy. At least 2.
    pub iterations: usize,
    /// Step length as a fraction of the radiation length.
    pub step_size: f64,
    /// Master seed; per-run seeds are derived from it in (energy, iteration) order.
    pub seed: u64,
    /// Run the showers of one energy point on the rayon pool.
    /// Results do not depend on this flag.
    pub parallel: bool,
    pub bremsstrahlung: BremsstrahlungPolicy,
}

impl EnsembleConfig {
    pub fn new() -> Self {
        Self {
            initial_energies: linspace(10_000.0, 100_000.0, 5),
            iterations: 100,
            step_size: 0.1,
            seed: 0,
            parallel: true,
            bremsstrahlung: BremsstrahlungPolicy::Faithful,
        }
    }

    /// Checks every precondition of an ensemble run.
    pub fn validate(&self) -> Result<()> {
        if self.iterations < 2 {
            return Err(CascadeError::invalid(format!(
                "iterations must be >= 2, got {}",
                self.iterations
            )));
        }
        ensure_positive("step_size", self.step_size)?;
        for &energy in &self.initial_energies {
            ensure_positive("initial_energy", energy)?;
        }
        Ok(())
    }
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    Array1::linspace(start, end, n).to_vec()
}
