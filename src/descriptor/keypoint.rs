use crate::Float;

/// Oriented keypoint in octave coordinates. `scale` is the blur of its layer relative to the octave.
#[derive(Debug,Clone)]
pub struct KeyPoint {
    pub x: Float,
    pub y: Float,
    pub layer: usize,
    pub octave_level: usize,
    pub scale: Float,
    pub orientation: Float
}
