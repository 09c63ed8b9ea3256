use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::info;

use crate::error::Result;
use crate::sim::cascade::{CascadeSimulator, Trajectory};
use crate::sim::materials::Material;
use crate::sim::random::{RandomSource, seeded};
use crate::sim::stats::{self, SeriesSummary};

use super::config::EnsembleConfig;
use super::result::{EnsembleProgress, EnsembleResult};

trait ProgressReporter {
    fn report(&mut self, progress: &EnsembleProgress);
}

struct NoProgress;
impl ProgressReporter for NoProgress {
    fn report(&mut self, _progress: &EnsembleProgress) {}
}

struct FnProgress<F> {
    f: F,
}
impl<F> ProgressReporter for FnProgress<F>
where
    F: FnMut(&EnsembleProgress),
{
    fn report(&mut self, progress: &EnsembleProgress) {
        (self.f)(progress);
    }
}

/// Runs many independent showers per initial energy and reduces them to
/// per-step statistics.
pub struct EnsembleAggregator {
    config: EnsembleConfig,
    material: Material,
}

impl EnsembleAggregator {
    /// Validates the configuration and material up front.
    pub fn new(config: EnsembleConfig, material: Material) -> Result<Self> {
        config.validate()?;
        material.validate()?;
        Ok(Self { config, material })
    }

    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// One result per initial energy, in configuration order.
    pub fn run(&self) -> Result<Vec<EnsembleResult>> {
        let seeds = self.run_seeds();
        self.run_inner(|e, i| seeded(seeds[e][i]), NoProgress)
    }

    /// Like [`EnsembleAggregator::run`], calling `report` after each energy point.
    pub fn run_with_progress<F>(&self, report: F) -> Result<Vec<EnsembleResult>>
    where
        F: FnMut(&EnsembleProgress),
    {
        let seeds = self.run_seeds();
        self.run_inner(|e, i| seeded(seeds[e][i]), FnProgress { f: report })
    }

    /// Runs with caller-supplied random sources.
    ///
    /// `make_source(energy_index, iteration)` is called once per shower and
    /// must return a source independent of every other run.
    pub fn run_with_sources<S, F>(&self, make_source: F) -> Result<Vec<EnsembleResult>>
    where
        S: RandomSource,
        F: Fn(usize, usize) -> S + Sync,
    {
        self.run_inner(make_source, NoProgress)
    }

    /// Draws one seed per shower from the master seed before any shower runs,
    /// so sequential and parallel execution see the same streams.
    fn run_seeds(&self) -> Vec<Vec<u64>> {
        let mut master = StdRng::seed_from_u64(self.config.seed);
        self.config
            .initial_energies
            .iter()
            .map(|_| {
                (0..self.config.iterations)
                    .map(|_| master.r#gen::<u64>())
                    .collect()
            })
            .collect()
    }

    fn run_inner<S, F, R>(&self, make_source: F, mut reporter: R) -> Result<Vec<EnsembleResult>>
    where
        S: RandomSource,
        F: Fn(usize, usize) -> S + Sync,
        R: ProgressReporter,
    {
        let energy_count = self.config.initial_energies.len();
        let mut results = Vec::with_capacity(energy_count);

        for (energy_index, &energy) in self.config.initial_energies.iter().enumerate() {
            let simulator = CascadeSimulator::from_material(energy, &self.material)?
                .with_policy(self.config.bremsstrahlung);
            let step_size = self.config.step_size;

            let run_one = |iteration: usize| -> Result<(Trajectory, f64)> {
                let mut source = make_source(energy_index, iteration);
                simulator.run(step_size, &mut source)
            };

            let runs: Vec<(Trajectory, f64)> = if self.config.parallel {
                (0..self.config.iterations)
                    .into_par_iter()
                    .map(run_one)
                    .collect::<Result<_>>()?
            } else {
                (0..self.config.iterations)
                    .map(run_one)
                    .collect::<Result<_>>()?
            };

            let result = reduce(energy, runs)?;
            info!(
                material = %self.material.name,
                initial_energy = energy,
                max_length = result.max_length,
                mean_total_ionized = result.mean_total_ionized,
                "ensemble point finished"
            );

            reporter.report(&EnsembleProgress {
                energy_index,
                energy_count,
                initial_energy: energy,
                iterations: self.config.iterations,
                max_length: result.max_length,
            });
            results.push(result);
        }

        Ok(results)
    }
}

/// Aligns the trajectories of one energy point and computes its statistics.
fn reduce(initial_energy: f64, runs: Vec<(Trajectory, f64)>) -> Result<EnsembleResult> {
    let max_length = runs.iter().map(|(t, _)| t.len()).max().unwrap_or(0);

    let mut active = Vec::with_capacity(runs.len());
    let mut step_ionized = Vec::with_capacity(runs.len());
    let mut totals = Vec::with_capacity(runs.len());
    for (trajectory, total) in runs {
        active.push(trajectory.active_series());
        step_ionized.push(trajectory.step_ionized_series());
        totals.push(total);
    }

    Ok(EnsembleResult {
        initial_energy,
        iterations: totals.len(),
        max_length,
        active: SeriesSummary::from_series(&active)?,
        step_ionized: SeriesSummary::from_series(&step_ionized)?,
        mean_total_ionized: stats::mean(&totals),
        std_err_total_ionized: stats::standard_error(&totals)?,
    })
}

/// Runs one ensemble per initial energy with default seeding.
pub fn run_ensemble(
    initial_energies: &[f64],
    iterations: usize,
    step_size: f64,
    material: &Material,
) -> Result<Vec<EnsembleResult>> {
    let config = EnsembleConfig {
        initial_energies: initial_energies.to_vec(),
        iterations,
        step_size,
        ..EnsembleConfig::new()
    };
    EnsembleAggregator::new(config, material.clone())?.run()
}
