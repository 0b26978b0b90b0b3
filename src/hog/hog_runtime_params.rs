use serde::{Serialize, Deserialize};

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct HogRuntimeParams {
    /// Number of unsigned orientation bins over [0,180).
    pub orientations: usize,
    /// Side of a square cell in pixels.
    pub cell_size: usize,
    /// Side of a square block in cells.
    pub block_size: usize,
    /// Block step in cells.
    pub block_stride: usize
}

impl Default for HogRuntimeParams {
    fn default() -> HogRuntimeParams {
        HogRuntimeParams {
            orientations: 9,
            cell_size: 16,
            block_size: 2,
            block_stride: 1
        }
    }
}
