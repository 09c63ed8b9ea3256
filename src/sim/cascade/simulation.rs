use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CascadeError, Result, ensure_positive};
use crate::sim::materials::Material;
use crate::sim::random::RandomSource;

use super::state::{CascadeState, StepParams};
use super::trajectory::Trajectory;

/// Which charged particles may radiate in a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BremsstrahlungPolicy {
    /// Every charged particle is tested, including those about to collapse.
    /// A collapsing particle that radiates deposits a draw on its halved energy.
    #[default]
    Faithful,
    /// Only particles that survive the ionization loss may radiate.
    SurvivorsOnly,
}

/// Longitudinal shower initiated by a single electron.
///
/// The simulator holds only the initial condition and material constants;
/// every call to [`CascadeSimulator::run`] starts from a fresh [`CascadeState`].
#[derive(Debug, Clone)]
pub struct CascadeSimulator {
    initial_energy: f64,
    critical_energy: f64,
    ionization_energy: f64,
    policy: BremsstrahlungPolicy,
}

impl CascadeSimulator {
    /// Creates a simulator. All energies are in MeV and must be finite and > 0.
    pub fn new(initial_energy: f64, critical_energy: f64, ionization_energy: f64) -> Result<Self> {
        ensure_positive("initial_energy", initial_energy)?;
        ensure_positive("critical_energy", critical_energy)?;
        ensure_positive("ionization_energy", ionization_energy)?;
        Ok(Self {
            initial_energy,
            critical_energy,
            ionization_energy,
            policy: BremsstrahlungPolicy::default(),
        })
    }

    pub fn from_material(initial_energy: f64, material: &Material) -> Result<Self> {
        Self::new(
            initial_energy,
            material.critical_energy,
            material.ionization_energy,
        )
    }

    pub fn with_policy(mut self, policy: BremsstrahlungPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn initial_energy(&self) -> f64 {
        self.initial_energy
    }

    pub fn critical_energy(&self) -> f64 {
        self.critical_energy
    }

    pub fn ionization_energy(&self) -> f64 {
        self.ionization_energy
    }

    pub fn policy(&self) -> BremsstrahlungPolicy {
        self.policy
    }

    /// Steps the cascade until no particle is left.
    ///
    /// `step_size` is the step length as a fraction of the radiation length
    /// and must be finite and > 0; a zero step would never reduce any energy.
    /// Steps so small that the loss vanishes against the initial energy, or
    /// that round a branching probability to zero, are rejected for the same
    /// reason.
    ///
    /// Returns the trajectory (step 0 through extinction) and the final
    /// cumulative ionized energy. Collapsing particles deposit a uniform
    /// fraction of their energy, so the total generally stays below the
    /// initial energy even for very small steps.
    pub fn run<S>(&self, step_size: f64, rng: &mut S) -> Result<(Trajectory, f64)>
    where
        S: RandomSource + ?Sized,
    {
        ensure_positive("step_size", step_size)?;

        let params = StepParams::new(
            self.critical_energy,
            self.ionization_energy,
            step_size,
            self.policy,
        );
        if !params.makes_progress(self.initial_energy) {
            return Err(CascadeError::invalid(format!(
                "step_size {step_size} is too small to change a {} MeV particle",
                self.initial_energy
            )));
        }
        let mut state = CascadeState::new(self.initial_energy);
        let mut trajectory = Trajectory::new();

        while !state.is_extinguished() {
            let record = state.advance(&params, rng);
            trajectory.push(record);
        }

        debug!(
            initial_energy = self.initial_energy,
            steps = state.step,
            total_ionized = state.total_ionized,
            "cascade extinguished"
        );

        Ok((trajectory, state.total_ionized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::{FixedSource, seeded};

    #[test]
    fn test_rejects_non_positive_parameters() {
        assert!(CascadeSimulator::new(0.0, 10.0, 1.0).is_err());
        assert!(CascadeSimulator::new(100.0, -1.0, 1.0).is_err());
        assert!(CascadeSimulator::new(100.0, 10.0, 0.0).is_err());
        assert!(CascadeSimulator::new(f64::NAN, 10.0, 1.0).is_err());
    }

    #[test]
    fn test_rejects_zero_step() {
        let sim = CascadeSimulator::new(100.0, 10.0, 1.0).unwrap();
        let err = sim.run(0.0, &mut FixedSource::always()).unwrap_err();
        assert!(matches!(err, CascadeError::InvalidParameter(_)));
        assert!(sim.run(-0.5, &mut FixedSource::always()).is_err());
        assert!(sim.run(f64::INFINITY, &mut FixedSource::always()).is_err());
    }

    #[test]
    fn test_rejects_step_too_small_to_progress() {
        let sim = CascadeSimulator::new(100.0, 10.0, 1.0).unwrap();
        let err = sim.run(1e-20, &mut seeded(0)).unwrap_err();
        assert!(matches!(err, CascadeError::InvalidParameter(_)));
        assert!(sim.run(f64::MIN_POSITIVE, &mut seeded(0)).is_err());

        // Small but representable steps still run to extinction.
        let sim = CascadeSimulator::new(2.0, 10.0, 1.0).unwrap();
        let (trajectory, total) = sim.run(1e-3, &mut FixedSource::never()).unwrap();
        assert_eq!(trajectory.extinction_step(), Some(trajectory.len() - 1));
        assert!(total > 0.0 && total <= 2.0);
    }

    #[test]
    fn test_deterministic_always_succeed() {
        let sim = CascadeSimulator::new(100.0, 10.0, 1.0).unwrap();
        let (trajectory, total) = sim.run(1.0, &mut FixedSource::always()).unwrap();

        assert_eq!(trajectory.len(), 11);
        assert_eq!(trajectory.extinction_step(), Some(10));
        assert!((total - 92.5).abs() < 1e-9);

        let active: Vec<usize> = trajectory
            .records()
            .iter()
            .map(|r| r.active_particles)
            .collect();
        assert_eq!(active, vec![1, 2, 4, 8, 16, 21, 21, 21, 11, 11, 0]);

        let step_ionized = trajectory.step_ionized_series();
        let expected = [0.0, 1.0, 1.0, 3.0, 5.0, 11.0, 21.0, 21.0, 14.65625, 11.0, 3.84375];
        for (got, want) in step_ionized.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_deterministic_never_succeed() {
        // Without radiation the primary loses 1 MeV per step for 99 steps and
        // collapses with half of the remaining 1 MeV.
        let sim = CascadeSimulator::new(100.0, 10.0, 1.0).unwrap();
        let (trajectory, total) = sim.run(1.0, &mut FixedSource::never()).unwrap();
        assert_eq!(trajectory.len(), 101);
        assert!((total - 99.5).abs() < 1e-9);
    }

    #[test]
    fn test_rerun_starts_fresh() {
        let sim = CascadeSimulator::new(100.0, 10.0, 1.0).unwrap();
        let (a, ta) = sim.run(1.0, &mut FixedSource::always()).unwrap();
        let (b, tb) = sim.run(1.0, &mut FixedSource::always()).unwrap();
        assert_eq!(a, b);
        assert_eq!(ta, tb);
    }

    #[test]
    fn test_policies_diverge_when_loss_exceeds_critical() {
        let faithful = CascadeSimulator::new(20.0, 2.0, 5.0).unwrap();
        let survivors_only = faithful
            .clone()
            .with_policy(BremsstrahlungPolicy::SurvivorsOnly);

        let (a, ta) = faithful.run(1.0, &mut FixedSource::always()).unwrap();
        let (b, tb) = survivors_only.run(1.0, &mut FixedSource::always()).unwrap();

        assert_eq!(a.len(), 6);
        assert_eq!(b.len(), 5);
        assert!((ta - 15.0).abs() < 1e-9);
        assert!((tb - 15.0).abs() < 1e-9);
        assert_ne!(a.active_series(), b.active_series());
    }

    #[test]
    fn test_random_run_properties() {
        let sim = CascadeSimulator::from_material(1000.0, &Material::cesium_iodide()).unwrap();
        for seed in 0..20 {
            let (trajectory, total) = sim.run(0.3, &mut seeded(seed)).unwrap();
            let records = trajectory.records();
            assert_eq!(records[0].active_particles, 1);
            assert_eq!(records.last().unwrap().active_particles, 0);
            for pair in records.windows(2) {
                assert!(pair[1].total_ionized >= pair[0].total_ionized);
                assert_eq!(pair[1].step, pair[0].step + 1);
            }
            for r in &records[..records.len() - 1] {
                assert!(r.active_particles > 0);
            }
            assert!(total >= 0.0 && total <= 1000.0 + 1e-9);
        }
    }
}
