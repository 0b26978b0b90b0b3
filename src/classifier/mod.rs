//! Linear classification of fused feature rows.

extern crate nalgebra as na;

use na::DMatrix;

use crate::Float;
use crate::error::Result;

pub mod svm_runtime_params;
pub mod linear_svm;

/// Learns a model from examples stored as matrix rows with one label per row.
pub trait Classifier {
    type Model: TrainedModel;
    fn train(&self, samples: &DMatrix<Float>, labels: &[usize]) -> Result<Self::Model>;
}

pub trait TrainedModel {
    // One predicted label per row
    fn predict(&self, samples: &DMatrix<Float>) -> Vec<usize>;
}
