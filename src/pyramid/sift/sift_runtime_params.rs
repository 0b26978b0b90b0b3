use serde::{Serialize, Deserialize};
use crate::Float;

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct SiftRuntimeParams {
    pub upsample: bool,
    pub octave_count: usize,
    pub min_octave_size: usize,
    pub sigma_count: usize,
    pub sigma_initial: Float,
    pub sigma_in: Float,
    pub blur_half_factor: Float,
    pub contrast_threshold: Float,
    pub edge_r: Float,
    pub border: usize,
    pub max_interpolation_steps: usize,
    pub orientation_bins: usize,
    pub orientation_peak_ratio: Float,
    pub orientation_sigma_factor: Float,
    pub orientation_radius_factor: Float,
    pub descriptor_scale_factor: Float,
    pub descriptor_magnitude_threshold: Float
}

impl Default for SiftRuntimeParams {
    fn default() -> SiftRuntimeParams {
        SiftRuntimeParams {
            upsample: true,
            octave_count: 4,
            min_octave_size: 16,
            sigma_count: 3,
            sigma_initial: 1.6,
            sigma_in: 0.5,
            blur_half_factor: 3.0,
            contrast_threshold: 0.04,
            edge_r: 10.0,
            border: 5,
            max_interpolation_steps: 5,
            orientation_bins: 36,
            orientation_peak_ratio: 0.8,
            orientation_sigma_factor: 1.5,
            orientation_radius_factor: 3.0,
            descriptor_scale_factor: 3.0,
            descriptor_magnitude_threshold: 0.2
        }
    }
}
