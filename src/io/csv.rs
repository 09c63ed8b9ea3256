//! CSV export of per-step ensemble curves.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::sim::ensemble::EnsembleResult;

const HEADER: &str = "step,mean_active,stderr_active,mean_step_ionized,stderr_step_ionized";

/// Writes the per-step curves of one ensemble result, one row per step.
pub fn write_curves_csv(path: &Path, result: &EnsembleResult) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_curves(&mut writer, result)
        .with_context(|| format!("Failed to write curves to: {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

fn write_curves<W: Write>(writer: &mut W, result: &EnsembleResult) -> Result<()> {
    let columns = [
        &result.active.mean,
        &result.active.std_err,
        &result.step_ionized.mean,
        &result.step_ionized.std_err,
    ];
    if columns.iter().any(|c| c.len() != result.max_length) {
        bail!(
            "Curves of the {} MeV result do not all have max_length = {} entries",
            result.initial_energy,
            result.max_length
        );
    }

    writeln!(writer, "{HEADER}")?;
    for (step, (((mean_active, err_active), mean_ionized), err_ionized)) in result
        .active
        .mean
        .iter()
        .zip(&result.active.std_err)
        .zip(&result.step_ionized.mean)
        .zip(&result.step_ionized.std_err)
        .enumerate()
    {
        writeln!(
            writer,
            "{step},{mean_active},{err_active},{mean_ionized},{err_ionized}"
        )?;
    }
    Ok(())
}

/// File name for the curves of `material` at `initial_energy`, e.g.
/// `cesium_iodide_10000MeV.csv`.
pub fn curves_file_name(material: &str, initial_energy: f64) -> String {
    let slug: String = material
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{slug}_{initial_energy}MeV.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stats::SeriesSummary;
    use tempfile::tempdir;

    fn result() -> EnsembleResult {
        EnsembleResult {
            initial_energy: 100.0,
            iterations: 2,
            max_length: 2,
            active: SeriesSummary {
                mean: vec![1.0, 0.5],
                std_err: vec![0.0, 0.5],
            },
            step_ionized: SeriesSummary {
                mean: vec![0.0, 2.25],
                std_err: vec![0.0, 0.25],
            },
            mean_total_ionized: 2.25,
            std_err_total_ionized: 0.25,
        }
    }

    #[test]
    fn test_write_curves() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("curves.csv");
        write_curves_csv(&path, &result())?;

        let text = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "0,1,0,0,0");
        assert_eq!(lines[2], "1,0.5,0.5,2.25,0.25");
        Ok(())
    }

    #[test]
    fn test_mismatched_curves_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.csv");
        let mut short = result();
        short.step_ionized.std_err.pop();
        assert!(write_curves_csv(&path, &short).is_err());

        let mut long = result();
        long.max_length = 5;
        assert!(write_curves_csv(&path, &long).is_err());
    }

    #[test]
    fn test_curves_file_name() {
        assert_eq!(
            curves_file_name("cesium iodide", 10000.0),
            "cesium_iodide_10000MeV.csv"
        );
        assert_eq!(curves_file_name("H2O", 32500.5), "h2o_32500.5MeV.csv");
    }
}
