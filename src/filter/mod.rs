use crate::image::Image;
use crate::GradientDirection;
use self::{kernel::Kernel,gauss_kernel::GaussKernel1D};

pub mod gauss_kernel;
pub mod prewitt_kernel;
pub mod kernel;

/// Convolves `source_images[sigma_level]` along one axis. Samples outside the image are
/// clamped to the nearest border pixel.
pub fn filter_1d_convolution(source_images: &[&Image], sigma_level: usize, filter_direction: GradientDirection, filter_kernel: &dyn Kernel) -> Image {
    let kernel = filter_kernel.kernel();
    let step = filter_kernel.step();
    let kernel_radius_signed = filter_kernel.radius() as isize;
    let normalizing_constant = filter_kernel.normalizing_constant();

    let source = source_images[sigma_level];
    let buffer = &source.buffer;
    let width = buffer.ncols();
    let height = buffer.nrows();
    let mut target = Image::empty(width, height, source.original_encoding);

    for x in 0..width {
        for y in 0..height {
            let mut acc = 0.0;
            for kernel_idx in (-kernel_radius_signed..kernel_radius_signed+1).step_by(step) {

                let sample_value = match filter_direction {
                    GradientDirection::HORIZINTAL => {
                        let sample_idx = (x as isize + kernel_idx).clamp(0, width as isize - 1) as usize;
                        buffer[(y,sample_idx)]
                    },
                    GradientDirection::VERTICAL => {
                        let sample_idx = (y as isize + kernel_idx).clamp(0, height as isize - 1) as usize;
                        buffer[(sample_idx,x)]
                    }
                };

                let kernel_value = kernel[(0,(kernel_idx + kernel_radius_signed) as usize)];
                acc += sample_value*kernel_value;
            }

            target.buffer[(y,x)] = acc/normalizing_constant;
        }
    }

    target
}

pub fn gaussian_2_d_convolution(image: &Image, filter_kernel: &GaussKernel1D) -> Image {
    let blur_hor = filter_1d_convolution(&[image],0,GradientDirection::HORIZINTAL, filter_kernel);
    filter_1d_convolution(&[&blur_hor],0,GradientDirection::VERTICAL, filter_kernel)
}
