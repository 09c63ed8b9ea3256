//! Ensembles of independent showers.
//!
//! For every initial energy the aggregator runs the configured number of
//! showers, pads their trajectories to the longest one and reduces them to
//! per-step mean and standard-error curves plus total-deposit statistics.

mod config;
mod result;
mod simulation;

pub use config::{EnsembleConfig, linspace};
pub use result::{EnsembleProgress, EnsembleResult};
pub use simulation::{EnsembleAggregator, run_ensemble};
