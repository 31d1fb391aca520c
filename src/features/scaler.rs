//! Standard scaling
//!
//! Zero-mean, unit-variance scaling of the selected numeric columns,
//! fitted on training data and replayed at inference time.

use crate::error::{PipelineError, Result};
use ndarray::{Array2, ArrayView2};

/// Per-column standardizer.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    fitted: bool,
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Create an unfitted scaler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn per-column means and standard deviations.
    pub fn fit(&mut self, x: ArrayView2<'_, f64>) {
        self.fitted = true;
        let n = x.nrows().max(1) as f64;
        self.means = x
            .columns()
            .into_iter()
            .map(|col| col.sum() / n)
            .collect();
        self.stds = x
            .columns()
            .into_iter()
            .zip(&self.means)
            .map(|(col, &mean)| {
                let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                var.sqrt()
            })
            .collect();
    }

    /// Scale a matrix with the fitted statistics. Zero-variance columns
    /// are centered but not divided.
    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        if !self.fitted {
            return Err(PipelineError::NotFitted("StandardScaler"));
        }
        if x.ncols() != self.means.len() {
            return Err(PipelineError::invalid_input(format!(
                "expected {} columns, got {}",
                self.means.len(),
                x.ncols()
            )));
        }

        let mut out = x.to_owned();
        for (j, mut col) in out.columns_mut().into_iter().enumerate() {
            let mean = self.means[j];
            let std = self.stds[j];
            if std > 0.0 {
                col.mapv_inplace(|v| (v - mean) / std);
            } else {
                col.mapv_inplace(|v| v - mean);
            }
        }
        Ok(out)
    }

    /// Fit and scale in one step.
    pub fn fit_transform(&mut self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        self.fit(x);
        self.transform(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standardizes_columns() {
        let x = array![[1.0, 10.0], [3.0, 10.0], [5.0, 10.0]];
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(x.view()).unwrap();

        let col0: Vec<f64> = scaled.column(0).to_vec();
        assert!((col0.iter().sum::<f64>()).abs() < 1e-9);
        assert!((col0[2] - -col0[0]).abs() < 1e-9);
        // zero-variance column is centered only
        assert_eq!(scaled.column(1).to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let scaler = StandardScaler::new();
        assert!(scaler.transform(array![[1.0]].view()).is_err());
    }

    #[test]
    fn test_column_count_mismatch_fails() {
        let mut scaler = StandardScaler::new();
        scaler.fit(array![[1.0, 2.0]].view());
        assert!(scaler.transform(array![[1.0]].view()).is_err());
    }
}
