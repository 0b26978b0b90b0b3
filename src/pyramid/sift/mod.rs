extern crate image as image_rs;

use image_rs::GrayImage;

use crate::image::Image;
use crate::filter::gaussian_2_d_convolution;
use crate::pyramid::Pyramid;
use crate::features::sift_feature::{self, processing::refine_sift_feature};
use crate::descriptor::{
    feature_vector::FeatureVector,
    orientation_histogram::generate_keypoints_from_extrema,
    local_image_descriptor::LocalImageDescriptor,
    keypoint::KeyPoint
};

use self::{sift_octave::SiftOctave,sift_runtime_params::SiftRuntimeParams};

pub mod sift_runtime_params;
pub mod sift_octave;

pub type SiftPyramid = Pyramid<SiftOctave>;

pub fn build_sift_pyramid(base_gray_image: &GrayImage, runtime_params: &SiftRuntimeParams) -> SiftPyramid {
    let mut octaves: Vec<SiftOctave> = Vec::with_capacity(runtime_params.octave_count);

    let base_image = Image::from_gray_image(base_gray_image, true);
    let (base_image, sigma_in) = match runtime_params.upsample {
        true => (Image::upsample_double(&base_image), 2.0*runtime_params.sigma_in),
        false => (base_image, runtime_params.sigma_in)
    };

    let sigma_diff = (runtime_params.sigma_initial.powi(2) - sigma_in.powi(2)).max(0.01).sqrt();
    let kernel = SiftOctave::blur_kernel(sigma_diff, runtime_params.blur_half_factor);
    let mut octave_image = gaussian_2_d_convolution(&base_image, &kernel);

    for i in 0..runtime_params.octave_count {

        if i > 0 {
            // the image at index s has twice the base sigma of the previous octave
            octave_image = Image::downsample_half(&octaves[i-1].images[runtime_params.sigma_count]);
        }

        if octave_image.width().min(octave_image.height()) < runtime_params.min_octave_size.max(2*runtime_params.border+3) {
            break;
        }

        octaves.push(SiftOctave::build_octave(&octave_image, runtime_params));
    }

    Pyramid{octaves}
}

pub fn keypoints_from_pyramid(pyramid: &SiftPyramid, runtime_params: &SiftRuntimeParams) -> Vec<KeyPoint> {
    (0..pyramid.octaves.len()).flat_map(|octave_level| keypoints_from_octave(pyramid, octave_level, runtime_params)).collect()
}

pub fn keypoints_from_octave(pyramid: &SiftPyramid, octave_level: usize, runtime_params: &SiftRuntimeParams) -> Vec<KeyPoint> {
    let octave = &pyramid.octaves[octave_level];
    let mut keypoints = Vec::<KeyPoint>::new();

    for dog_level in 1..octave.s()+1 {
        let features = sift_feature::detect_sift_feature(octave, octave_level, dog_level, runtime_params);
        let refined_features = features.iter().filter_map(|x| refine_sift_feature(octave, x, runtime_params));
        keypoints.extend(refined_features.flat_map(|x| generate_keypoints_from_extrema(octave, &x, runtime_params)));
    }

    keypoints
}

/// All 128-d SIFT descriptors of the image, in pyramid order. Empty if nothing was detected.
pub fn feature_vectors_from_pyramid(pyramid: &SiftPyramid, runtime_params: &SiftRuntimeParams) -> Vec<FeatureVector> {
    keypoints_from_pyramid(pyramid, runtime_params).iter().map(|keypoint| {
        let octave = &pyramid.octaves[keypoint.octave_level];
        let descriptor = LocalImageDescriptor::new(octave, keypoint, runtime_params);
        FeatureVector::new(&descriptor, runtime_params.descriptor_magnitude_threshold)
    }).collect()
}

pub fn sift_feature_vectors(gray_image: &GrayImage, runtime_params: &SiftRuntimeParams) -> Vec<FeatureVector> {
    let pyramid = build_sift_pyramid(gray_image, runtime_params);
    feature_vectors_from_pyramid(&pyramid, runtime_params)
}
