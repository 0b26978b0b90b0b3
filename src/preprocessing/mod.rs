extern crate nalgebra as na;

use na::DMatrix;
use serde::{Serialize, Deserialize};

use crate::Float;
use crate::error::{ClassifyError, Result};
use crate::dataset::{Dataset, Split};

pub mod standard_scaler;

#[derive(Debug,Copy,Clone,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// Leading `train_parts/total_parts` of the load order train, the rest evaluates.
    Positional,
    /// The `train/` and `test/` directories are the partition.
    Directory
}

impl Default for SplitStrategy {
    fn default() -> SplitStrategy {
        SplitStrategy::Positional
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct SplitParameters {
    pub strategy: SplitStrategy,
    pub train_parts: usize,
    pub total_parts: usize
}

impl Default for SplitParameters {
    fn default() -> SplitParameters {
        SplitParameters {
            strategy: SplitStrategy::Positional,
            train_parts: 4,
            total_parts: 5
        }
    }
}

impl SplitParameters {
    pub fn validate(&self) -> Result<()> {
        match (self.train_parts, self.total_parts) {
            (t, n) if t > 0 && t < n => Ok(()),
            (t, n) => Err(ClassifyError::InvalidParameters(format!("split ratio {}/{} does not leave both partitions non-empty", t, n)))
        }
    }

    /// Number of leading examples that train under the positional strategy.
    pub fn positional_boundary(&self, total: usize) -> usize {
        (total/self.total_parts)*self.train_parts
    }
}

/// Rows are examples.
#[derive(Debug,Clone)]
pub struct Partition {
    pub x_train: DMatrix<Float>,
    pub y_train: Vec<usize>,
    pub x_eval: DMatrix<Float>,
    pub y_eval: Vec<usize>
}

pub fn partition(dataset: &Dataset, params: &SplitParameters) -> Result<Partition> {
    params.validate()?;
    let total = dataset.len();
    if total == 0 {
        return Err(ClassifyError::EmptyDataset(dataset.root.clone()));
    }

    let (train_idx, eval_idx): (Vec<usize>, Vec<usize>) = match params.strategy {
        SplitStrategy::Positional => {
            let boundary = params.positional_boundary(total);
            (0..total).partition(|&i| i < boundary)
        },
        SplitStrategy::Directory => (0..total).partition(|&i| dataset.splits[i] == Split::Train)
    };

    if train_idx.is_empty() {
        return Err(ClassifyError::EmptyPartition("training"));
    }
    if eval_idx.is_empty() {
        return Err(ClassifyError::EmptyPartition("evaluation"));
    }

    Ok(Partition {
        x_train: dataset.features.select_rows(train_idx.iter()),
        y_train: train_idx.iter().map(|&i| dataset.labels[i]).collect(),
        x_eval: dataset.features.select_rows(eval_idx.iter()),
        y_eval: eval_idx.iter().map(|&i| dataset.labels[i]).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dataset(n: usize) -> Dataset {
        Dataset {
            root: PathBuf::from("synthetic"),
            features: DMatrix::<Float>::from_fn(n, 3, |r,c| (r*3+c) as Float),
            labels: (0..n).map(|i| i % 4).collect(),
            splits: (0..n).map(|i| if i % 2 == 0 {Split::Train} else {Split::Test}).collect(),
            sources: (0..n).map(|i| PathBuf::from(format!("{}.png",i))).collect()
        }
    }

    #[test]
    fn positional_boundary_of_eighty_is_sixty_four() {
        let partition = partition(&dataset(80), &SplitParameters::default()).unwrap();

        assert_eq!(partition.x_train.nrows(), 64);
        assert_eq!(partition.x_eval.nrows(), 16);
        assert_eq!(partition.y_eval[0], 64 % 4);
        assert_eq!(partition.x_eval[(0,0)], (64*3) as Float);
    }

    #[test]
    fn five_examples_give_four_and_one() {
        let partition = partition(&dataset(5), &SplitParameters::default()).unwrap();

        assert_eq!(partition.y_train.len(), 4);
        assert_eq!(partition.y_eval, vec![0]);
    }

    #[test]
    fn too_few_examples_leave_training_empty() {
        let result = partition(&dataset(4), &SplitParameters::default());
        assert!(matches!(result, Err(ClassifyError::EmptyPartition("training"))));
    }

    #[test]
    fn directory_strategy_follows_origin() {
        let params = SplitParameters{strategy: SplitStrategy::Directory, ..SplitParameters::default()};
        let partition = partition(&dataset(6), &params).unwrap();

        assert_eq!(partition.y_train, vec![0,2,0]);
        assert_eq!(partition.y_eval, vec![1,3,1]);
    }

    #[test]
    fn ratio_must_leave_room_for_both() {
        assert!(SplitParameters{train_parts: 5, ..SplitParameters::default()}.validate().is_err());
        assert!(SplitParameters{train_parts: 0, ..SplitParameters::default()}.validate().is_err());
    }
}
