pub mod orientation_histogram;
pub mod local_image_descriptor;
pub mod feature_vector;
pub mod keypoint;

/// Side length of the spatial histogram grid.
pub const DESCRIPTOR_WIDTH: usize = 4;
pub const DESCRIPTOR_BINS: usize = DESCRIPTOR_WIDTH*DESCRIPTOR_WIDTH;
pub const ORIENTATION_BINS: usize = 8;
pub const DESCRIPTOR_SIZE: usize = DESCRIPTOR_BINS*ORIENTATION_BINS;
