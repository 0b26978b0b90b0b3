//! Histogram of oriented gradients over colour images.
//!
//! Per pixel the channel with the strongest gradient wins. Cells accumulate magnitude
//! weighted, unsigned orientation histograms averaged over the cell area and every block
//! of cells is L2-Hys normalized. The output is ordered by block row, block column,
//! cell row, cell column and orientation.

extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::RgbImage;
use na::{DMatrix,DVector};

use crate::Float;
use crate::error::{ClassifyError, Result};
use self::hog_runtime_params::HogRuntimeParams;

pub mod hog_runtime_params;

const L2_HYS_CLIP: Float = 0.2;
const L2_HYS_EPS: Float = 1e-5;

/// Tiling of a fixed image size, validated up front.
#[derive(Debug,Clone,PartialEq)]
pub struct HogSpec {
    pub options: HogRuntimeParams,
    pub cells_wide: usize,
    pub cells_high: usize,
    pub blocks_wide: usize,
    pub blocks_high: usize
}

impl HogSpec {
    pub fn from_options(width: u32, height: u32, options: &HogRuntimeParams) -> Result<HogSpec> {
        if options.orientations == 0 || options.cell_size == 0 || options.block_size == 0 || options.block_stride == 0 {
            return Err(ClassifyError::InvalidParameters(format!("hog options must be positive: {:?}", options)));
        }

        let cells_wide = width as usize / options.cell_size;
        let cells_high = height as usize / options.cell_size;

        if cells_wide < options.block_size || cells_high < options.block_size {
            return Err(ClassifyError::InvalidParameters(format!(
                "{}x{} image holds {}x{} cells, fewer than one {}x{} block", width, height, cells_wide, cells_high, options.block_size, options.block_size)));
        }

        let blocks_wide = (cells_wide - options.block_size)/options.block_stride + 1;
        let blocks_high = (cells_high - options.block_size)/options.block_stride + 1;

        Ok(HogSpec{options: options.clone(), cells_wide, cells_high, blocks_wide, blocks_high})
    }

    pub fn block_descriptor_length(&self) -> usize {
        self.options.block_size.pow(2)*self.options.orientations
    }

    pub fn descriptor_length(&self) -> usize {
        self.blocks_wide*self.blocks_high*self.block_descriptor_length()
    }
}

/// Gradient magnitude and unsigned orientation in degrees of the dominant channel.
pub fn dominant_channel_gradients(image: &RgbImage) -> (DMatrix<Float>,DMatrix<Float>) {
    let (width, height) = image.dimensions();
    let (width, height) = (width as usize, height as usize);
    let sample = |x: usize, y: usize, c: usize| image.get_pixel(x as u32, y as u32).0[c] as Float;

    let mut magnitude = DMatrix::<Float>::zeros(height,width);
    let mut orientation = DMatrix::<Float>::zeros(height,width);

    for y in 0..height {
        for x in 0..width {
            let mut best = (0.0, 0.0, -1.0);
            for c in 0..3 {
                // border rows and columns have no central difference
                let g_row = match y {
                    y if y == 0 || y+1 >= height => 0.0,
                    y => sample(x,y+1,c) - sample(x,y-1,c)
                };
                let g_col = match x {
                    x if x == 0 || x+1 >= width => 0.0,
                    x => sample(x+1,y,c) - sample(x-1,y,c)
                };
                let m = g_row.hypot(g_col);
                if m > best.2 {
                    best = (g_row, g_col, m);
                }
            }
            let (g_row, g_col, m) = best;
            magnitude[(y,x)] = m;
            orientation[(y,x)] = g_row.atan2(g_col).to_degrees().rem_euclid(180.0);
        }
    }

    (magnitude,orientation)
}

/// Per cell orientation histograms, `cells_high*cells_wide` rows of `orientations` bins.
pub fn cell_histograms(magnitude: &DMatrix<Float>, orientation: &DMatrix<Float>, spec: &HogSpec) -> DMatrix<Float> {
    let options = &spec.options;
    let bin_width = 180.0/(options.orientations as Float);
    let cell_area = (options.cell_size*options.cell_size) as Float;
    let mut histograms = DMatrix::<Float>::zeros(spec.cells_high*spec.cells_wide, options.orientations);

    for cell_r in 0..spec.cells_high {
        for cell_c in 0..spec.cells_wide {
            let cell_idx = cell_r*spec.cells_wide + cell_c;
            for y in cell_r*options.cell_size..(cell_r+1)*options.cell_size {
                for x in cell_c*options.cell_size..(cell_c+1)*options.cell_size {
                    let bin = ((orientation[(y,x)]/bin_width).floor() as usize).min(options.orientations-1);
                    histograms[(cell_idx,bin)] += magnitude[(y,x)]/cell_area;
                }
            }
        }
    }

    histograms
}

pub fn l2_hys(block: &mut [Float]) -> () {
    let norm = (block.iter().map(|v| v.powi(2)).sum::<Float>() + L2_HYS_EPS.powi(2)).sqrt();
    block.iter_mut().for_each(|v| *v = (*v/norm).min(L2_HYS_CLIP));
    let norm = (block.iter().map(|v| v.powi(2)).sum::<Float>() + L2_HYS_EPS.powi(2)).sqrt();
    block.iter_mut().for_each(|v| *v /= norm);
}

pub fn hog(image: &RgbImage, spec: &HogSpec) -> DVector<Float> {
    let (magnitude, orientation) = dominant_channel_gradients(image);
    let histograms = cell_histograms(&magnitude, &orientation, spec);
    let options = &spec.options;

    let mut descriptor = Vec::<Float>::with_capacity(spec.descriptor_length());
    let mut block = Vec::<Float>::with_capacity(spec.block_descriptor_length());

    for block_r in 0..spec.blocks_high {
        for block_c in 0..spec.blocks_wide {
            block.clear();
            for cell_r in block_r*options.block_stride..block_r*options.block_stride+options.block_size {
                for cell_c in block_c*options.block_stride..block_c*options.block_stride+options.block_size {
                    let cell_idx = cell_r*spec.cells_wide + cell_c;
                    block.extend(histograms.row(cell_idx).iter());
                }
            }
            l2_hys(&mut block);
            descriptor.extend_from_slice(&block);
        }
    }

    DVector::from_vec(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::Rgb;
    use approx::assert_relative_eq;

    #[test]
    fn default_tiling_of_canonical_size() {
        let spec = HogSpec::from_options(128, 128, &HogRuntimeParams::default()).unwrap();

        assert_eq!((spec.cells_wide, spec.blocks_wide), (8, 7));
        assert_eq!(spec.descriptor_length(), 1764);
    }

    #[test]
    fn too_small_image_is_rejected() {
        assert!(HogSpec::from_options(20, 128, &HogRuntimeParams::default()).is_err());
        let zero_bins = HogRuntimeParams{orientations: 0, ..HogRuntimeParams::default()};
        assert!(HogSpec::from_options(128, 128, &zero_bins).is_err());
    }

    #[test]
    fn vertical_edge_votes_horizontal_gradient_bin() {
        let image = RgbImage::from_fn(64, 64, |x, _| if x < 32 {Rgb([0,0,0])} else {Rgb([0,200,0])});
        let spec = HogSpec::from_options(64, 64, &HogRuntimeParams::default()).unwrap();
        let (magnitude, orientation) = dominant_channel_gradients(&image);
        let histograms = cell_histograms(&magnitude, &orientation, &spec);

        assert_relative_eq!(magnitude[(10,31)], 200.0);
        assert_relative_eq!(orientation[(10,31)], 0.0);
        // cell (0,1) holds column 31, all of its mass lands in bin 0
        let cell = histograms.row(1);
        assert!(cell[0] > 0.0);
        assert!(cell.iter().skip(1).all(|&v| v == 0.0));
    }

    #[test]
    fn blocks_are_clipped_and_unit_norm() {
        let image = RgbImage::from_fn(64, 64, |x, y| Rgb([(x*4) as u8, (y*3) as u8, ((x*y) % 251) as u8]));
        let spec = HogSpec::from_options(64, 64, &HogRuntimeParams::default()).unwrap();
        let descriptor = hog(&image, &spec);

        assert_eq!(descriptor.len(), spec.descriptor_length());
        for block in descriptor.as_slice().chunks(spec.block_descriptor_length()) {
            let norm = block.iter().map(|v| v*v).sum::<Float>().sqrt();
            assert_relative_eq!(norm, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn flat_image_is_all_zero() {
        let image = RgbImage::from_pixel(32, 32, Rgb([10,20,30]));
        let spec = HogSpec::from_options(32, 32, &HogRuntimeParams::default()).unwrap();

        assert!(hog(&image, &spec).iter().all(|&v| v == 0.0));
    }
}
