//! Single-shower stepping.
//!
//! Each step applies ionization loss, bremsstrahlung, collapse of
//! sub-threshold charged particles and photon absorption/pair production,
//! then records the deposited energy and the surviving population.

mod simulation;
mod state;
mod trajectory;

pub use simulation::{BremsstrahlungPolicy, CascadeSimulator};
pub use state::{CascadeState, PAIR_PRODUCTION_SCALE, PAIR_PRODUCTION_THRESHOLD};
pub use trajectory::{StepRecord, Trajectory};
