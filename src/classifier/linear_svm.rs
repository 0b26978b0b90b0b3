//! One-vs-one linear SVM. Every pair of classes gets a hinge loss machine with a bias
//! term, solved in the dual by coordinate descent over a seeded permutation per epoch.
//! Prediction is a majority vote, ties go to the lower class index.

extern crate nalgebra as na;

use na::{DMatrix, DVector};
use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tracing::{debug, warn};

use crate::Float;
use crate::error::{ClassifyError, Result};
use super::{Classifier, TrainedModel, svm_runtime_params::SvmRuntimeParams};

const MIN_STEP_GRADIENT: Float = 1e-12;

#[derive(Debug,Clone)]
pub struct LinearSvm {
    pub params: SvmRuntimeParams
}

impl LinearSvm {
    pub fn new(params: &SvmRuntimeParams) -> LinearSvm {
        LinearSvm{params: params.clone()}
    }
}

/// Separates `classes[positive]` (decision > 0) from `classes[negative]`.
#[derive(Debug,Clone)]
pub struct BinaryMachine {
    pub positive: usize,
    pub negative: usize,
    pub weights: DVector<Float>,
    pub bias: Float,
    pub epochs: usize
}

#[derive(Debug,Clone)]
pub struct LinearSvmModel {
    /// Sorted labels seen during training.
    pub classes: Vec<usize>,
    pub machines: Vec<BinaryMachine>
}

/// Dual coordinate descent for one binary problem. `examples` holds one example per column,
/// `targets` are +1/-1. Returns weights, bias and the number of epochs run.
fn solve_dual(examples: &DMatrix<Float>, targets: &[Float], params: &SvmRuntimeParams, rng: &mut SmallRng) -> (DVector<Float>, Float, usize) {
    let n = examples.ncols();
    let c = params.c;
    let mut weights = DVector::<Float>::zeros(examples.nrows());
    let mut bias = 0.0;
    let mut alpha = vec![0.0 as Float; n];
    // bias is an extra feature fixed at 1
    let q_diag = examples.column_iter().map(|x| x.norm_squared() + 1.0).collect::<Vec<Float>>();
    let mut order = (0..n).collect::<Vec<usize>>();

    for epoch in 0..params.max_iterations {
        order.shuffle(rng);
        let mut pg_max = Float::NEG_INFINITY;
        let mut pg_min = Float::INFINITY;

        for &i in &order {
            let x = examples.column(i);
            let y = targets[i];
            let gradient = y*(weights.dot(&x) + bias) - 1.0;
            let projected = match alpha[i] {
                a if a <= 0.0 => gradient.min(0.0),
                a if a >= c => gradient.max(0.0),
                _ => gradient
            };

            pg_max = pg_max.max(projected);
            pg_min = pg_min.min(projected);

            if projected.abs() > MIN_STEP_GRADIENT {
                let alpha_old = alpha[i];
                alpha[i] = (alpha_old - gradient/q_diag[i]).clamp(0.0, c);
                let delta = (alpha[i] - alpha_old)*y;
                weights.axpy(delta, &x, 1.0);
                bias += delta;
            }
        }

        if pg_max - pg_min < params.tolerance {
            return (weights, bias, epoch+1);
        }
    }

    warn!("dual coordinate descent stopped after {} epochs without reaching tolerance {}", params.max_iterations, params.tolerance);
    (weights, bias, params.max_iterations)
}

impl Classifier for LinearSvm {
    type Model = LinearSvmModel;

    fn train(&self, samples: &DMatrix<Float>, labels: &[usize]) -> Result<LinearSvmModel> {
        self.params.validate()?;
        if samples.nrows() != labels.len() {
            return Err(ClassifyError::DimensionMismatch{expected: samples.nrows(), actual: labels.len()});
        }
        if labels.is_empty() {
            return Err(ClassifyError::EmptyPartition("training"));
        }

        let mut classes = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let mut rng = SmallRng::seed_from_u64(self.params.seed);
        let by_column = samples.transpose();
        let mut machines = Vec::<BinaryMachine>::with_capacity(classes.len()*(classes.len()-1)/2);

        for positive in 0..classes.len() {
            for negative in positive+1..classes.len() {
                let (label_pos, label_neg) = (classes[positive], classes[negative]);
                let members = (0..labels.len()).filter(|&i| labels[i] == label_pos || labels[i] == label_neg).collect::<Vec<usize>>();
                let examples = by_column.select_columns(members.iter());
                let targets = members.iter().map(|&i| if labels[i] == label_pos {1.0} else {-1.0}).collect::<Vec<Float>>();

                let (weights, bias, epochs) = solve_dual(&examples, &targets, &self.params, &mut rng);
                debug!("class {} vs {}: {} examples, {} epochs", label_pos, label_neg, members.len(), epochs);

                machines.push(BinaryMachine{positive, negative, weights, bias, epochs});
            }
        }

        Ok(LinearSvmModel{classes, machines})
    }
}

/// Index of the first maximum.
fn winner(votes: &[usize]) -> usize {
    votes.iter().enumerate().fold((0, 0), |(best, best_count), (idx, &count)| match count {
        count if count > best_count => (idx, count),
        _ => (best, best_count)
    }).0
}

impl TrainedModel for LinearSvmModel {
    fn predict(&self, samples: &DMatrix<Float>) -> Vec<usize> {
        let n = samples.nrows();
        let mut votes = vec![vec![0usize; self.classes.len()]; n];

        for machine in &self.machines {
            let scores = samples*&machine.weights;
            for (sample_votes, &score) in votes.iter_mut().zip(scores.iter()) {
                match score + machine.bias {
                    s if s > 0.0 => sample_votes[machine.positive] += 1,
                    _ => sample_votes[machine.negative] += 1
                }
            }
        }

        votes.iter().map(|v| self.classes[winner(v)]).collect()
    }
}
