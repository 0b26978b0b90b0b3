extern crate nalgebra as na;

use na::{DMatrix, DVector};

use crate::Float;
use crate::error::{ClassifyError, Result};

/// Per-column centring and scaling, fitted once on training rows.
#[derive(Debug,Clone,PartialEq)]
pub struct StandardScaler {
    pub mean: DVector<Float>,
    /// Population standard deviation, 1 for constant columns.
    pub scale: DVector<Float>
}

impl StandardScaler {
    pub fn fit(samples: &DMatrix<Float>) -> Result<StandardScaler> {
        let n = samples.nrows();
        if n == 0 {
            return Err(ClassifyError::EmptyPartition("training"));
        }

        let mean = DVector::<Float>::from_iterator(samples.ncols(), samples.column_iter().map(|c| c.mean()));
        let scale = DVector::<Float>::from_iterator(samples.ncols(), samples.column_iter().zip(mean.iter()).map(|(column, &m)| {
            let variance = column.iter().map(|v| (v - m).powi(2)).sum::<Float>() / n as Float;
            match variance.sqrt() {
                deviation if deviation > Float::EPSILON => deviation,
                _ => 1.0
            }
        }));

        Ok(StandardScaler{mean, scale})
    }

    pub fn transform(&self, samples: &DMatrix<Float>) -> Result<DMatrix<Float>> {
        if samples.ncols() != self.mean.len() {
            return Err(ClassifyError::DimensionMismatch{expected: self.mean.len(), actual: samples.ncols()});
        }

        Ok(DMatrix::<Float>::from_fn(samples.nrows(), samples.ncols(), |r,c| (samples[(r,c)] - self.mean[c])/self.scale[c]))
    }

    pub fn fit_transform(samples: &DMatrix<Float>) -> Result<(StandardScaler, DMatrix<Float>)> {
        let scaler = StandardScaler::fit(samples)?;
        let transformed = scaler.transform(samples)?;
        Ok((scaler, transformed))
    }
}
