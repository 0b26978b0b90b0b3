extern crate nalgebra as na;

use na::DMatrix;
use std::fmt;

use crate::Float;
use crate::features::Feature;
use crate::pyramid::sift::{sift_octave::SiftOctave,sift_runtime_params::SiftRuntimeParams};

pub mod processing;

/// Scale space extremum in octave coordinates. `sigma_level` carries the sub-level offset
/// after refinement, `layer` the difference of gaussian index it was found on.
#[derive(Debug,Clone)]
pub struct SiftFeature {
    pub x: Float,
    pub y: Float,
    pub sigma_level: Float,
    pub layer: usize,
    pub octave_level: usize
}

impl Feature for SiftFeature {
    fn get_x_image(&self) -> usize {
        self.x.round() as usize
    }
    fn get_y_image(&self) -> usize {
        self.y.round() as usize
    }
    fn get_closest_sigma_level(&self) -> usize {
        self.layer
    }
}

impl fmt::Display for SiftFeature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x: {}, y: {}, s: {}, o: {}", self.x, self.y, self.sigma_level, self.octave_level)
    }
}

pub fn detect_sift_feature(source_octave: &SiftOctave, octave_level: usize, sigma_level: usize, runtime_params: &SiftRuntimeParams) -> Vec<SiftFeature> {

    let mut extrema_vec: Vec<SiftFeature> = Vec::new();

    assert!(sigma_level+1 < source_octave.difference_of_gaussians.len());
    assert!(sigma_level > 0);

    let image_buffer = &source_octave.difference_of_gaussians[sigma_level].buffer;
    let prev_buffer = &source_octave.difference_of_gaussians[sigma_level-1].buffer;
    let next_buffer = &source_octave.difference_of_gaussians[sigma_level+1].buffer;

    let threshold = 0.5*runtime_params.contrast_threshold/(runtime_params.sigma_count as Float);
    let offset = runtime_params.border.max(1);

    if image_buffer.ncols() <= 2*offset || image_buffer.nrows() <= 2*offset {
        return extrema_vec;
    }

    for y in offset..image_buffer.nrows()-offset {
        for x in offset..image_buffer.ncols()-offset {

            let sample_value = image_buffer[(y,x)];
            if sample_value.abs() <= threshold {
                continue;
            }

            let (is_smallest_curr, is_largest_curr) = is_sample_extrema_in_neighbourhood(sample_value,x,y,image_buffer,true);
            let (is_smallest_prev, is_largest_prev) = is_sample_extrema_in_neighbourhood(sample_value,x,y,prev_buffer,false);
            let (is_smallest_next, is_largest_next) = is_sample_extrema_in_neighbourhood(sample_value,x,y,next_buffer,false);

            let is_extrema = (is_smallest_curr && is_smallest_prev && is_smallest_next) || (is_largest_curr && is_largest_prev && is_largest_next);

            if is_extrema {
                extrema_vec.push(SiftFeature{x: x as Float, y: y as Float, sigma_level: sigma_level as Float, layer: sigma_level, octave_level});
            }
        }
    }

    extrema_vec
}

fn is_sample_extrema_in_neighbourhood(sample: Float, x_sample: usize, y_sample: usize, neighbourhood_buffer: &DMatrix<Float>, skip_center: bool) -> (bool,bool) {

    let mut is_smallest = true;
    let mut is_largest = true;

    for y in y_sample-1..y_sample+2 {
        for x in x_sample-1..x_sample+2 {

            if x == x_sample && y == y_sample && skip_center {
                continue;
            }

            let value = neighbourhood_buffer[(y,x)];
            is_smallest &= sample < value;
            is_largest &= sample > value;

            if !(is_smallest || is_largest) {
                return (false,false);
            }
        }
    }

    (is_smallest,is_largest)
}
