use std::path::PathBuf;
use thiserror::Error;

use crate::dataset::Split;

pub type Result<T> = std::result::Result<T, ClassifyError>;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("could not decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("fused feature has {actual} values, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("no labelled examples could be loaded from {0}")]
    EmptyDataset(PathBuf),

    #[error("{0} split contributed no examples")]
    EmptySplit(Split),

    #[error("{0} partition is empty")]
    EmptyPartition(&'static str),

    #[error("dataset directory {0} does not exist")]
    MissingDirectory(PathBuf),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("failed to list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}
