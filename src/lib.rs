//! Scene classification from fused hand-crafted image features.
//!
//! Every image is reduced to one fixed-length vector made of a HOG descriptor,
//! the mean of its SIFT descriptors and a joint colour histogram. The vectors of a
//! labelled directory tree are standardized and fed to a linear SVM.

pub mod image;
pub mod filter;
pub mod numerics;
pub mod pyramid;
pub mod features;
pub mod descriptor;
pub mod hog;
pub mod color_histogram;
pub mod fusion;
pub mod dataset;
pub mod preprocessing;
pub mod classifier;
pub mod report;
pub mod runtime_parameters;
pub mod pipeline;
pub mod error;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

pub use error::{ClassifyError, Result};
pub use dataset::{Dataset, Split, category_map::CategoryMap};
pub use fusion::{FeatureExtractor, FusedFeature};
pub use runtime_parameters::PipelineParameters;
pub use report::ClassificationReport;

#[repr(u8)]
#[derive(Debug,Copy,Clone)]
pub enum GradientDirection {
    HORIZINTAL,
    VERTICAL
}
