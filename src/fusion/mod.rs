//! Fuses the three descriptor families of one image into a single fixed-length vector.
//!
//! Layout: `[hog | mean sift descriptor | colour histogram]`. The layout is the schema the
//! classifier is trained against and never changes between images.

extern crate image as image_rs;
extern crate nalgebra as na;

use std::path::Path;
use image_rs::RgbImage;
use na::DVector;

use crate::Float;
use crate::error::{ClassifyError, Result};
use crate::image::{load_resized_rgb, resize_rgb, to_gray};
use crate::hog::{hog, HogSpec};
use crate::color_histogram::{color_histogram, color_histogram_length};
use crate::descriptor::{DESCRIPTOR_SIZE, feature_vector::FeatureVector};
use crate::pyramid::sift::{sift_feature_vectors, sift_runtime_params::SiftRuntimeParams};
use crate::runtime_parameters::PipelineParameters;

pub type FusedFeature = DVector<Float>;

/// Element-wise mean of the descriptors, the zero vector when there are none.
pub fn keypoint_summary(descriptors: &[FeatureVector]) -> DVector<Float> {
    let mut summary = DVector::<Float>::zeros(DESCRIPTOR_SIZE);
    if descriptors.is_empty() {
        return summary;
    }

    for descriptor in descriptors {
        summary.iter_mut().zip(descriptor.data.iter()).for_each(|(s, &v)| *s += v);
    }
    summary / descriptors.len() as Float
}

/// Concatenates the parts in the fixed order shape, keypoint summary, colour.
pub fn fuse(shape: &DVector<Float>, keypoint_summary: &DVector<Float>, color: &DVector<Float>) -> FusedFeature {
    let data = shape.iter().chain(keypoint_summary.iter()).chain(color.iter()).cloned().collect::<Vec<Float>>();
    DVector::from_vec(data)
}

#[derive(Debug,Clone)]
pub struct FeatureExtractor {
    resize_dim: (u32,u32),
    hog_spec: HogSpec,
    sift_params: SiftRuntimeParams,
    color_bins: usize
}

impl FeatureExtractor {
    pub fn new(params: &PipelineParameters) -> Result<FeatureExtractor> {
        params.validate()?;
        let (width, height) = params.resize_dim;
        let hog_spec = HogSpec::from_options(width, height, &params.hog)?;

        Ok(FeatureExtractor {
            resize_dim: params.resize_dim,
            hog_spec,
            sift_params: params.sift.clone(),
            color_bins: params.color_bins
        })
    }

    pub fn hog_length(&self) -> usize {
        self.hog_spec.descriptor_length()
    }

    /// Length every fused vector of this extractor has.
    pub fn expected_dimension(&self) -> usize {
        self.hog_length() + DESCRIPTOR_SIZE + color_histogram_length(self.color_bins)
    }

    /// Decodes and fuses one file. The only failure is an undecodable image.
    pub fn extract_from_path(&self, path: &Path) -> Result<FusedFeature> {
        let image = load_resized_rgb(path, self.resize_dim)?;
        self.extract_resized(&image)
    }

    /// Fuses an already decoded image of any size.
    pub fn extract(&self, image: &RgbImage) -> Result<FusedFeature> {
        self.extract_resized(&resize_rgb(image, self.resize_dim))
    }

    fn extract_resized(&self, image: &RgbImage) -> Result<FusedFeature> {
        let shape = hog(image, &self.hog_spec);
        let descriptors = sift_feature_vectors(&to_gray(image), &self.sift_params);
        let summary = keypoint_summary(&descriptors);
        let color = color_histogram(image, self.color_bins);

        let fused = fuse(&shape, &summary, &color);
        self.check_dimension(&fused)?;
        Ok(fused)
    }

    pub fn check_dimension(&self, fused: &FusedFeature) -> Result<()> {
        match fused.len() {
            l if l == self.expected_dimension() => Ok(()),
            actual => Err(ClassifyError::DimensionMismatch{expected: self.expected_dimension(), actual})
        }
    }

    /// Range of the keypoint summary inside a fused vector.
    pub fn keypoint_range(&self) -> std::ops::Range<usize> {
        self.hog_length()..self.hog_length()+DESCRIPTOR_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DESCRIPTOR_SIZE;
    use na::SVector;
    use approx::assert_relative_eq;

    #[test]
    fn summary_of_nothing_is_zero() {
        let summary = keypoint_summary(&[]);
        assert_eq!(summary.len(), DESCRIPTOR_SIZE);
        assert!(summary.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn summary_is_element_wise_mean() {
        let a = FeatureVector{data: SVector::<Float,DESCRIPTOR_SIZE>::from_element(2.0)};
        let mut b = FeatureVector{data: SVector::<Float,DESCRIPTOR_SIZE>::from_element(4.0)};
        b.data[5] = 10.0;

        let summary = keypoint_summary(&[a,b]);
        assert_relative_eq!(summary[0], 3.0);
        assert_relative_eq!(summary[5], 6.0);
    }

    #[test]
    fn fuse_keeps_order() {
        let fused = fuse(&DVector::from_vec(vec![1.0]), &DVector::from_vec(vec![2.0,3.0]), &DVector::from_vec(vec![4.0]));
        assert_eq!(fused.as_slice(), &[1.0,2.0,3.0,4.0]);
    }

    #[test]
    fn default_dimension() {
        let extractor = FeatureExtractor::new(&PipelineParameters::default()).unwrap();
        assert_eq!(extractor.expected_dimension(), 1764 + 128 + 512);
        assert_eq!(extractor.keypoint_range(), 1764..1892);
    }

    #[test]
    fn short_vector_is_a_mismatch() {
        let extractor = FeatureExtractor::new(&PipelineParameters::default()).unwrap();
        let result = extractor.check_dimension(&DVector::zeros(10));
        assert!(matches!(result, Err(ClassifyError::DimensionMismatch{expected: 2404, actual: 10})));
    }
}
