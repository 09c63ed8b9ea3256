mod error;
pub mod io;
pub mod sim;

// Prelude
pub use error::{CascadeError, Result};
pub use sim::cascade::{BremsstrahlungPolicy, CascadeSimulator, StepRecord, Trajectory};
pub use sim::ensemble::{EnsembleAggregator, EnsembleConfig, EnsembleResult, run_ensemble};
pub use sim::materials::{Material, MaterialLibrary};
pub use sim::random::{FixedSource, RandomSource, RngSource, seeded};
