//! JSON storage for ensemble configurations and results.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::sim::ensemble::{EnsembleConfig, EnsembleResult};
use crate::sim::materials::Material;

/// All ensemble results obtained for one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialReport {
    pub material: Material,
    pub config: EnsembleConfig,
    pub results: Vec<EnsembleResult>,
}

/// Reads an ensemble configuration. Missing fields take their defaults.
///
/// # Example
/// ```no_run
/// use emshower::io::read_config;
/// use std::path::Path;
///
/// let config = read_config(Path::new("ensemble.json")).unwrap();
/// println!("{} iterations", config.iterations);
/// ```
pub fn read_config(path: &Path) -> Result<EnsembleConfig> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let config: EnsembleConfig = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse ensemble config: {}", path.display()))?;

    Ok(config)
}

/// Writes an ensemble configuration as pretty-printed JSON.
pub fn write_config(path: &Path, config: &EnsembleConfig) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, config)
        .with_context(|| format!("Failed to write ensemble config to: {}", path.display()))?;

    Ok(())
}

/// Writes the reports of one or more materials as pretty-printed JSON.
pub fn write_reports(path: &Path, reports: &[MaterialReport]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, reports)
        .with_context(|| format!("Failed to write reports to: {}", path.display()))?;

    Ok(())
}

/// Reads reports written by [`write_reports`].
pub fn read_reports(path: &Path) -> Result<Vec<MaterialReport>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let reports: Vec<MaterialReport> = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse reports: {}", path.display()))?;

    Ok(reports)
}
