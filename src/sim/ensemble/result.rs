use serde::{Deserialize, Serialize};

use crate::sim::stats::SeriesSummary;

/// Reduced statistics of all showers run at one initial energy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleResult {
    /// Incident electron energy in MeV.
    pub initial_energy: f64,
    pub iterations: usize,
    /// Longest trajectory in the ensemble, counting step 0.
    pub max_length: usize,
    /// Active particle count per step.
    pub active: SeriesSummary,
    /// Ionized energy deposited per step, in MeV.
    pub step_ionized: SeriesSummary,
    /// Mean total ionized energy in MeV.
    pub mean_total_ionized: f64,
    pub std_err_total_ionized: f64,
}

impl EnsembleResult {
    /// Step index at which the mean active particle count peaks.
    pub fn shower_maximum(&self) -> Option<usize> {
        self.active
            .mean
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }

    /// Mean total ionized energy as a fraction of the initial energy.
    pub fn deposited_fraction(&self) -> f64 {
        self.mean_total_ionized / self.initial_energy
    }
}

/// Progress snapshot reported after each completed energy point.
#[derive(Debug, Clone, Copy)]
pub struct EnsembleProgress {
    /// Index of the energy point just finished.
    pub energy_index: usize,
    pub energy_count: usize,
    pub initial_energy: f64,
    pub iterations: usize,
    pub max_length: usize,
}
