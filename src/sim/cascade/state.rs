use crate::sim::random::RandomSource;

use super::simulation::BremsstrahlungPolicy;
use super::trajectory::StepRecord;

/// Photons at or below this energy (2 m_e c^2, MeV) cannot pair-produce and
/// are absorbed instead.
pub const PAIR_PRODUCTION_THRESHOLD: f64 = 1.022;

/// Pair-production mean free path relative to the radiation length (7/9).
pub const PAIR_PRODUCTION_SCALE: f64 = 7.0 / 9.0;

/// Per-run constants of the stepping algorithm.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StepParams {
    pub critical_energy: f64,
    /// Ionization loss of one charged particle over one step.
    pub step_loss: f64,
    pub brem_probability: f64,
    pub pair_probability: f64,
    pub policy: BremsstrahlungPolicy,
}

impl StepParams {
    pub fn new(
        critical_energy: f64,
        ionization_energy: f64,
        step_size: f64,
        policy: BremsstrahlungPolicy,
    ) -> Self {
        Self {
            critical_energy,
            step_loss: ionization_energy * step_size,
            brem_probability: -(-step_size).exp_m1(),
            pair_probability: -(-step_size * PAIR_PRODUCTION_SCALE).exp_m1(),
            policy,
        }
    }

    /// True when a particle of `energy` (or anything smaller) is guaranteed to
    /// change within a step: the loss is representable against `energy` and
    /// both branching probabilities are non-zero.
    pub fn makes_progress(&self, energy: f64) -> bool {
        energy - self.step_loss < energy
            && self.brem_probability > 0.0
            && self.pair_probability > 0.0
    }
}

/// Mutable state of one running cascade.
///
/// Particles carry no identity beyond their energy, so the population is two
/// flat arrays of energies in MeV.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeState {
    pub charged: Vec<f64>,
    pub photons: Vec<f64>,
    /// Never decreases.
    pub total_ionized: f64,
    pub step: usize,
}

impl CascadeState {
    pub fn new(initial_energy: f64) -> Self {
        Self {
            charged: vec![initial_energy],
            photons: Vec::new(),
            total_ionized: 0.0,
            step: 0,
        }
    }

    pub fn active_count(&self) -> usize {
        self.charged.len() + self.photons.len()
    }

    pub fn is_extinguished(&self) -> bool {
        self.active_count() == 0
    }

    /// Applies one full transition and returns its record.
    pub(crate) fn advance<S>(&mut self, params: &StepParams, rng: &mut S) -> StepRecord
    where
        S: RandomSource + ?Sized,
    {
        let mut deposited = 0.0;

        // Survivor mask is evaluated on pre-step energies.
        let survivor: Vec<bool> = self.charged.iter().map(|&e| e > params.step_loss).collect();
        deposited += self.ionization_loss(&survivor, params.step_loss);

        let brem_photons = self.bremsstrahlung(&survivor, params, rng);
        deposited += self.collapse_sub_threshold(&survivor, rng);

        let (pairs, absorbed) = self.photon_interactions(params.pair_probability, rng);
        deposited += absorbed;

        self.charged.extend_from_slice(&pairs);
        self.charged.extend_from_slice(&pairs);
        self.photons.extend(brem_photons);

        self.total_ionized += deposited;
        self.step += 1;

        StepRecord {
            step: self.step,
            total_ionized: self.total_ionized,
            step_ionized: deposited,
            active_particles: self.active_count(),
        }
    }

    /// Subtracts the step loss from every survivor and returns the energy lost.
    fn ionization_loss(&mut self, survivor: &[bool], step_loss: f64) -> f64 {
        let mut count = 0usize;
        for (energy, _) in self
            .charged
            .iter_mut()
            .zip(survivor)
            .filter(|(_, alive)| **alive)
        {
            *energy -= step_loss;
            count += 1;
        }
        step_loss * count as f64
    }

    /// Halves eligible charged particles and returns the emitted photons.
    ///
    /// With [`BremsstrahlungPolicy::Faithful`] every slot is tested against its
    /// current value, so a sub-threshold particle still holding more than the
    /// critical energy can radiate before it is removed.
    fn bremsstrahlung<S>(
        &mut self,
        survivor: &[bool],
        params: &StepParams,
        rng: &mut S,
    ) -> Vec<f64>
    where
        S: RandomSource + ?Sized,
    {
        let mut emitted = Vec::new();
        for (energy, &alive) in self.charged.iter_mut().zip(survivor) {
            if !alive && params.policy == BremsstrahlungPolicy::SurvivorsOnly {
                continue;
            }
            if rng.bernoulli(params.brem_probability) && *energy > params.critical_energy {
                *energy *= 0.5;
                emitted.push(*energy);
            }
        }
        emitted
    }

    /// Removes sub-threshold charged particles, each depositing a uniform
    /// fraction of what it still holds. Returns the deposited energy.
    fn collapse_sub_threshold<S>(&mut self, survivor: &[bool], rng: &mut S) -> f64
    where
        S: RandomSource + ?Sized,
    {
        let mut deposited = 0.0;
        let mut kept = Vec::with_capacity(self.charged.len());
        for (energy, &alive) in self.charged.drain(..).zip(survivor) {
            if alive {
                kept.push(energy);
            } else {
                deposited += rng.uniform(energy);
            }
        }
        self.charged = kept;
        deposited
    }

    /// Absorbs low-energy photons and converts the others with the
    /// pair-production probability.
    ///
    /// Returns the halved energies of converted photons (each becomes two
    /// charged particles) and the energy deposited by absorption.
    fn photon_interactions<S>(
        &mut self,
        pair_probability: f64,
        rng: &mut S,
    ) -> (Vec<f64>, f64)
    where
        S: RandomSource + ?Sized,
    {
        let mut pairs = Vec::new();
        let mut absorbed = 0.0;
        let mut kept = Vec::with_capacity(self.photons.len());
        for energy in self.photons.drain(..) {
            if energy <= PAIR_PRODUCTION_THRESHOLD {
                absorbed += rng.uniform(energy);
            } else if rng.bernoulli(pair_probability) {
                pairs.push(energy * 0.5);
            } else {
                kept.push(energy);
            }
        }
        self.photons = kept;
        (pairs, absorbed)
    }
}
