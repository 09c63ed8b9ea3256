use serde::{Deserialize, Serialize};

/// Snapshot emitted once per step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    /// Ionized energy deposited since the start of the cascade, in MeV.
    pub total_ionized: f64,
    /// Ionized energy deposited during this step only, in MeV.
    pub step_ionized: f64,
    /// Charged particles plus photons alive after this step.
    pub active_particles: usize,
}

impl StepRecord {
    /// Record for step 0: one incident particle, nothing deposited.
    pub fn initial() -> Self {
        Self {
            step: 0,
            total_ionized: 0.0,
            step_ionized: 0.0,
            active_particles: 1,
        }
    }
}

/// Ordered step records from the initial condition through extinction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    records: Vec<StepRecord>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self {
            records: vec![StepRecord::initial()],
        }
    }

    pub fn push(&mut self, record: StepRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Number of records, including step 0.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of the step at which the active particle count reached zero.
    pub fn extinction_step(&self) -> Option<usize> {
        self.records
            .last()
            .filter(|r| r.active_particles == 0)
            .map(|r| r.step)
    }

    /// Cumulative ionized energy after the last recorded step.
    pub fn total_ionized(&self) -> f64 {
        self.records.last().map_or(0.0, |r| r.total_ionized)
    }

    /// Active particle count per step.
    pub fn active_series(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.active_particles as f64)
            .collect()
    }

    /// Ionized energy deposited per step.
    pub fn step_ionized_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.step_ionized).collect()
    }
}
