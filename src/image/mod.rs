extern crate image as image_rs;
extern crate nalgebra as na;

use std::path::Path;
use image_rs::{GrayImage, RgbImage, Pixel, imageops::{self, FilterType}};
use image_rs::flat::NormalForm;
use na::DMatrix;

use crate::Float;
use crate::error::{ClassifyError, Result};
use self::image_encoding::ImageEncoding;

pub mod image_encoding;

/// Single channel float raster. Rows of `buffer` are image rows.
#[derive(Debug,Clone)]
pub struct Image {
    pub buffer: DMatrix<Float>,
    pub original_encoding: ImageEncoding
}

impl Image {

    pub fn width(&self) -> usize {
        self.buffer.ncols()
    }

    pub fn height(&self) -> usize {
        self.buffer.nrows()
    }

    pub fn empty(width: usize, height: usize, image_encoding: ImageEncoding) -> Image {
        let buffer = DMatrix::<Float>::zeros(height,width);
        Image{ buffer, original_encoding: image_encoding}
    }

    pub fn from_matrix(matrix: &DMatrix<Float>, original_encoding: ImageEncoding) -> Image {
        Image{ buffer: matrix.clone(), original_encoding}
    }

    /// With `normalize` the 8-bit intensities are mapped to [0,1].
    pub fn from_gray_image(image: &GrayImage, normalize: bool) -> Image {
        let mut buffer = Image::image8_to_matrix(image);
        let encoding = ImageEncoding::U8;

        if normalize {
            buffer.apply(|v| *v = encoding.normalize_to_unit(*v));
        }

        Image{ buffer, original_encoding: encoding}
    }

    pub fn downsample_half(image: &Image) -> Image {
        let width = image.width();
        let height = image.height();

        let new_width = width/2;
        let new_height = height/2;

        let new_buffer = DMatrix::<Float>::from_fn(new_height,new_width, |r,c| image.buffer[(2*r,2*c)]);

        Image{
            buffer: new_buffer,
            original_encoding: image.original_encoding
        }
    }

    /// Bilinear doubling. Samples beyond the last row/column are clamped to the border.
    pub fn upsample_double(image: &Image) -> Image {
        let width = image.width();
        let height = image.height();
        let old_buffer = &image.buffer;

        let new_buffer = DMatrix::<Float>::from_fn(2*height,2*width, |y,x| {
            let x_prime = x as Float / 2.0;
            let y_prime = y as Float / 2.0;
            let x_0 = x_prime.trunc() as usize;
            let y_0 = y_prime.trunc() as usize;
            let x_1 = (x_0+1).min(width-1);
            let y_1 = (y_0+1).min(height-1);
            let dx = x_prime - x_0 as Float;
            let dy = y_prime - y_0 as Float;

            dx*dy*old_buffer[(y_1,x_1)] +
            (1.0-dx)*dy*old_buffer[(y_1,x_0)] +
            dx*(1.0-dy)*old_buffer[(y_0,x_1)] +
            (1.0-dx)*(1.0-dy)*old_buffer[(y_0,x_0)]
        });

        Image{
            buffer: new_buffer,
            original_encoding: image.original_encoding
        }
    }

    fn image8_to_matrix(gray_image: &GrayImage) -> DMatrix<Float> {
        debug_assert!(gray_image.sample_layout().is_normal(NormalForm::RowMajorPacked));

        let (width, height) = gray_image.dimensions();
        DMatrix::<Float>::from_fn(height as usize, width as usize, |r,c| {
            gray_image.get_pixel(c as u32, r as u32).channels()[0] as Float
        })
    }
}

/// Decodes `file_path` and resizes it to the canonical `(width,height)` with bilinear filtering.
pub fn load_resized_rgb(file_path: &Path, (width,height): (u32,u32)) -> Result<RgbImage> {
    let decoded = image_rs::open(file_path).map_err(|source| ClassifyError::Decode{path: file_path.to_path_buf(), source})?;
    Ok(resize_rgb(&decoded.to_rgb8(), (width,height)))
}

pub fn resize_rgb(image: &RgbImage, (width,height): (u32,u32)) -> RgbImage {
    match image.dimensions() {
        (w,h) if w == width && h == height => image.clone(),
        _ => imageops::resize(image, width, height, FilterType::Triangle)
    }
}

/// ITU-R 601 luma, same weights the decoder uses for `to_luma8`.
pub fn to_gray(image: &RgbImage) -> GrayImage {
    imageops::grayscale(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::Luma;

    #[test]
    fn gray_conversion_maps_to_unit_range() {
        let gray = GrayImage::from_fn(4, 3, |x, _| Luma([if x == 0 {255} else {0}]));
        let image = Image::from_gray_image(&gray, true);

        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 3);
        assert_eq!(image.buffer[(1,0)], 1.0);
        assert_eq!(image.buffer[(1,1)], 0.0);
    }

    #[test]
    fn resampling_round_trip_keeps_size() {
        let image = Image::from_matrix(&DMatrix::<Float>::from_fn(6,8,|r,c| (r*8+c) as Float), ImageEncoding::F64);
        let up = Image::upsample_double(&image);
        let down = Image::downsample_half(&up);

        assert_eq!((up.height(),up.width()), (12,16));
        assert_eq!(down.buffer, image.buffer);
    }
}
