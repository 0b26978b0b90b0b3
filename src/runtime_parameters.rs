use std::fs;
use std::path::{Path,PathBuf};
use serde::{Serialize, Deserialize};

use crate::error::{ClassifyError, Result};
use crate::hog::hog_runtime_params::HogRuntimeParams;
use crate::pyramid::sift::sift_runtime_params::SiftRuntimeParams;
use crate::preprocessing::SplitParameters;
use crate::classifier::svm_runtime_params::SvmRuntimeParams;
use crate::dataset::category_map::{CategoryMap, DEFAULT_CATEGORIES};

/// Everything that shapes a run. Every field has a default, a YAML file only needs to
/// name what it changes.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct PipelineParameters {
    pub dataset_root: PathBuf,
    /// Canonical (width, height) every image is resized to before extraction.
    pub resize_dim: (u32,u32),
    pub hog: HogRuntimeParams,
    pub sift: SiftRuntimeParams,
    /// Bins per channel of the joint colour histogram.
    pub color_bins: usize,
    pub split: SplitParameters,
    pub svm: SvmRuntimeParams,
    pub categories: Vec<String>
}

impl Default for PipelineParameters {
    fn default() -> PipelineParameters {
        PipelineParameters {
            dataset_root: PathBuf::from("Labelled Dataset"),
            resize_dim: (128,128),
            hog: HogRuntimeParams::default(),
            sift: SiftRuntimeParams::default(),
            color_bins: 8,
            split: SplitParameters::default(),
            svm: SvmRuntimeParams::default(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
        }
    }
}

impl PipelineParameters {
    pub fn from_yaml_str(yaml: &str) -> Result<PipelineParameters> {
        let params: PipelineParameters = serde_yaml::from_str(yaml)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_yaml_file(path: &Path) -> Result<PipelineParameters> {
        let contents = fs::read_to_string(path)?;
        PipelineParameters::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ClassifyError::InvalidParameters(msg));

        if self.resize_dim.0 == 0 || self.resize_dim.1 == 0 {
            return invalid(format!("resize_dim must be positive, got {:?}", self.resize_dim));
        }
        if self.color_bins == 0 || self.color_bins > 256 {
            return invalid(format!("color_bins must be in 1..=256, got {}", self.color_bins));
        }
        if self.sift.sigma_count == 0 || self.sift.octave_count == 0 || self.sift.orientation_bins < 3 {
            return invalid(format!("degenerate sift parameters: {:?}", self.sift));
        }
        if self.categories.is_empty() {
            return invalid("at least one category is required".to_string());
        }
        let category_map = CategoryMap::new(&self.categories);
        if let Some(duplicate) = self.categories.iter().enumerate().find(|(label, name)| category_map.index(name) != Some(*label)) {
            return invalid(format!("category {} is listed more than once", duplicate.1));
        }
        self.split.validate()?;
        self.svm.validate()
    }
}
