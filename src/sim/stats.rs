//! Sample statistics over ensembles of ragged per-step series.
//!
//! Series of different lengths are right-padded with zeros to a common length
//! before any statistic is taken. For shower curves this is exact: past its
//! extinction step a shower has no active particles and deposits nothing.

use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{CascadeError, Result};

/// A per-step series padded to a common length.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    values: Vec<f64>,
    extinct_at: usize,
}

impl AlignedSeries {
    /// Right-pads `series` with zeros to `len`. A series already at least
    /// `len` long is kept whole.
    pub fn pad(series: &[f64], len: usize) -> Self {
        let mut values = series.to_vec();
        if values.len() < len {
            values.resize(len, 0.0);
        }
        Self {
            values,
            extinct_at: series.len(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Length of the series before padding.
    pub fn extinct_at(&self) -> usize {
        self.extinct_at
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of zeros appended by padding.
    pub fn padding(&self) -> usize {
        self.values.len() - self.extinct_at
    }
}

/// Pads every series to the length of the longest one.
pub fn align(series: &[Vec<f64>]) -> Vec<AlignedSeries> {
    let max_len = series.iter().map(Vec::len).max().unwrap_or(0);
    series
        .iter()
        .map(|s| AlignedSeries::pad(s, max_len))
        .collect()
}

/// Per-step mean and standard error across an ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub mean: Vec<f64>,
    pub std_err: Vec<f64>,
}

impl SeriesSummary {
    /// Aligns `series` and reduces it column by column.
    ///
    /// Uses the Bessel-corrected sample standard deviation, so at least two
    /// series are required.
    pub fn from_series(series: &[Vec<f64>]) -> Result<Self> {
        ensure_samples(series.len())?;
        let aligned = align(series);
        let len = aligned.first().map_or(0, AlignedSeries::len);
        let matrix = Array2::from_shape_fn((aligned.len(), len), |(i, j)| aligned[i].values[j]);
        Ok(Self::from_matrix(&matrix))
    }

    /// Reduces a (samples x steps) matrix along the sample axis.
    fn from_matrix(matrix: &Array2<f64>) -> Self {
        let n = matrix.nrows() as f64;
        let mean = matrix
            .mean_axis(Axis(0))
            .map(|m| m.to_vec())
            .unwrap_or_default();
        let std_err = matrix
            .std_axis(Axis(0), 1.0)
            .mapv(|s| s / n.sqrt())
            .to_vec();
        Self { mean, std_err }
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}

fn ensure_samples(n: usize) -> Result<()> {
    if n < 2 {
        return Err(CascadeError::invalid(format!(
            "at least 2 samples are needed for a sample standard deviation, got {n}"
        )));
    }
    Ok(())
}

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    ArrayView1::from(values).mean().unwrap_or(f64::NAN)
}

/// Sample standard deviation with Bessel's correction.
pub fn sample_std(values: &[f64]) -> Result<f64> {
    ensure_samples(values.len())?;
    Ok(ArrayView1::from(values).std(1.0))
}

/// Standard error of the mean: sample standard deviation over sqrt(n).
pub fn standard_error(values: &[f64]) -> Result<f64> {
    Ok(sample_std(values)? / (values.len() as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pad_marks_extinction() {
        let s = AlignedSeries::pad(&[3.0, 2.0], 5);
        assert_eq!(s.values(), &[3.0, 2.0, 0.0, 0.0, 0.0]);
        assert_eq!(s.extinct_at(), 2);
        assert_eq!(s.padding(), 3);
    }

    #[test]
    fn test_pad_keeps_longer_series() {
        let s = AlignedSeries::pad(&[1.0, 2.0, 3.0], 2);
        assert_eq!(s.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(s.padding(), 0);
    }

    #[test]
    fn test_align_ragged_lengths() {
        let series = vec![vec![1.0; 5], vec![2.0; 8], vec![3.0; 3]];
        let aligned = align(&series);
        assert!(aligned.iter().all(|a| a.len() == 8));
        assert!(aligned[0].values()[5..].iter().all(|&v| v == 0.0));
        assert!(aligned[2].values()[3..].iter().all(|&v| v == 0.0));
        assert_eq!(aligned[1].padding(), 0);
    }

    #[test]
    fn test_scalar_statistics() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values), 5.0);
        // Sum of squared deviations is 32, so s^2 = 32 / 7.
        let std = sample_std(&values).unwrap();
        assert_relative_eq!(std, (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
        let se = standard_error(&values).unwrap();
        assert_relative_eq!(se, std / 8.0f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_requires_two_samples() {
        assert!(sample_std(&[1.0]).is_err());
        assert!(standard_error(&[]).is_err());
        assert!(SeriesSummary::from_series(&[vec![1.0, 2.0]]).is_err());
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_summary_of_identical_series() {
        let series = vec![vec![1.0, 4.0, 2.0]; 4];
        let summary = SeriesSummary::from_series(&series).unwrap();
        assert_eq!(summary.mean, vec![1.0, 4.0, 2.0]);
        assert!(summary.std_err.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_summary_pads_before_reducing() {
        let series = vec![vec![2.0, 2.0, 2.0], vec![4.0]];
        let summary = SeriesSummary::from_series(&series).unwrap();
        assert_eq!(summary.len(), 3);
        assert_relative_eq!(summary.mean[0], 3.0);
        assert_relative_eq!(summary.mean[1], 1.0);
        // Column [2, 0]: s = sqrt(2), se = s / sqrt(2) = 1.
        assert_relative_eq!(summary.std_err[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(summary.std_err[0], 1.0, epsilon = 1e-12);
    }
}
