extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::RgbImage;
use na::DVector;

use crate::Float;
use crate::numerics::normalize_l2;

/// Joint histogram over all three channels with `bins` bins per channel over [0,256),
/// flattened with the first channel most significant and scaled to unit L2 norm.
pub fn color_histogram(image: &RgbImage, bins: usize) -> DVector<Float> {
    assert!(bins > 0 && bins <= 256);

    let mut histogram = DVector::<Float>::zeros(bins.pow(3));
    let bin_of = |v: u8| (v as usize*bins)/256;

    for pixel in image.pixels() {
        let [c_0, c_1, c_2] = pixel.0;
        let idx = (bin_of(c_0)*bins + bin_of(c_1))*bins + bin_of(c_2);
        histogram[idx] += 1.0;
    }

    normalize_l2(&histogram)
}

pub fn color_histogram_length(bins: usize) -> usize {
    bins.pow(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::Rgb;
    use approx::assert_relative_eq;

    #[test]
    fn single_colour_fills_one_bin() {
        let image = RgbImage::from_pixel(16, 16, Rgb([255, 0, 40]));
        let histogram = color_histogram(&image, 8);

        assert_eq!(histogram.len(), 512);
        // 255 -> 7, 0 -> 0, 40 -> 1
        assert_relative_eq!(histogram[7*64 + 1], 1.0);
        assert_relative_eq!(histogram.sum(), 1.0);
    }

    #[test]
    fn two_halves_share_the_norm() {
        let image = RgbImage::from_fn(8, 8, |x, _| if x < 4 {Rgb([0,0,0])} else {Rgb([128,128,128])});
        let histogram = color_histogram(&image, 8);

        assert_relative_eq!(histogram.norm(), 1.0);
        assert_relative_eq!(histogram[0], histogram[(4*8+4)*8+4]);
    }
}
