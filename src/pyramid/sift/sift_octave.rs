use crate::image::{Image,image_encoding::ImageEncoding};
use crate::filter::{gauss_kernel::GaussKernel1D, prewitt_kernel::PrewittKernel,gaussian_2_d_convolution,filter_1d_convolution};
use crate::{Float,GradientDirection};
use crate::pyramid::sift::sift_runtime_params::SiftRuntimeParams;

/// One doubling of scale: `s+3` gaussian images, their gradients and `s+2` difference of gaussians.
#[derive(Debug,Clone)]
pub struct SiftOctave {
    pub images: Vec<Image>,
    pub x_gradient: Vec<Image>,
    pub y_gradient: Vec<Image>,
    pub difference_of_gaussians: Vec<Image>,
    pub sigmas: Vec<Float>
}

impl SiftOctave {

    /// `base_image` is expected to already carry a blur of `sigma_initial`.
    pub fn build_octave(base_image: &Image, runtime_params: &SiftRuntimeParams) -> SiftOctave {

        let s = runtime_params.sigma_count;
        let image_count = s + 3;
        let sigma_0 = runtime_params.sigma_initial;
        let prewitt_kernel = PrewittKernel::new();

        let sigmas: Vec<Float> = (0..image_count).map(|x| sigma_0*SiftOctave::generate_k(x as Float, s as Float)).collect();

        let mut images: Vec<Image> = Vec::with_capacity(image_count);
        images.push(base_image.clone());
        for i in 1..image_count {
            // blur incrementally from the previous level
            let sigma_diff = (sigmas[i].powi(2) - sigmas[i-1].powi(2)).sqrt();
            let kernel = SiftOctave::blur_kernel(sigma_diff, runtime_params.blur_half_factor);
            let blurred = gaussian_2_d_convolution(&images[i-1], &kernel);
            images.push(blurred);
        }

        let images_borrows: Vec<&Image> = images.iter().collect();
        let x_gradient = (0..image_count).map(|x| filter_1d_convolution(&images_borrows,x, GradientDirection::HORIZINTAL, &prewitt_kernel)).collect();
        let y_gradient = (0..image_count).map(|x| filter_1d_convolution(&images_borrows,x, GradientDirection::VERTICAL, &prewitt_kernel)).collect();

        let difference_of_gaussians = images.windows(2).map(|pair| {
            let difference_buffer = &pair[1].buffer - &pair[0].buffer;
            Image::from_matrix(&difference_buffer, ImageEncoding::F64)
        }).collect();

        SiftOctave {images,x_gradient,y_gradient,difference_of_gaussians,sigmas}
    }

    pub fn blur_kernel(sigma: Float, blur_half_factor: Float) -> GaussKernel1D {
        let radius = SiftOctave::generate_blur_radius(blur_half_factor, sigma).max(1.0);
        GaussKernel1D::new(0.0, sigma, 1, radius)
    }

    fn generate_k(n: Float, s: Float) -> Float {
        assert!(n >= 0.0);
        let exp = n/s;
        exp.exp2()
    }

    pub fn generate_blur_radius(blur_half_factor: Float, sigma: Float) -> Float {
        (blur_half_factor*sigma).ceil()
    }

    pub fn s(&self) -> usize {
        self.sigmas.len() - 3
    }

    pub fn width(&self) -> usize {
        self.images[0].width()
    }

    pub fn height(&self) -> usize {
        self.images[0].height()
    }
}
