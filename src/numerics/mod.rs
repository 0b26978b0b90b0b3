extern crate nalgebra as na;

use na::DVector;
use crate::image::Image;
use crate::{Float,float};

/// Magnitude and orientation in [0,2pi) of the precomputed gradient images at (x,y).
pub fn gradient_and_orientation(x_gradient: &Image, y_gradient: &Image, x: usize, y: usize) -> (Float,Float) {

    let x_diff = x_gradient.buffer[(y,x)];
    let y_diff = y_gradient.buffer[(y,x)];

    let gradient = (x_diff.powi(2) + y_diff.powi(2)).sqrt();
    let orientation = match y_diff.atan2(x_diff) {
        angle if angle < 0.0 => 2.0*float::consts::PI + angle,
        angle => angle
    };

    (gradient,orientation)
}

/// Unnormalized isotropic gaussian weight of an offset.
pub fn gauss_weight(dx: Float, dy: Float, sigma: Float) -> Float {
    (-(dx.powi(2) + dy.powi(2))/(2.0*sigma.powi(2))).exp()
}

// http://fourier.eng.hmc.edu/e176/lectures/NM/node25.html
/// Vertex offset in (-0.5,0.5) of the parabola through three equally spaced samples around a peak.
pub fn parabola_peak_offset(f_l: Float, f_c: Float, f_r: Float) -> Float {
    let denominator = f_l - 2.0*f_c + f_r;
    match denominator {
        d if d == 0.0 => 0.0,
        d => 0.5*(f_l - f_r)/d
    }
}

/// Scales `vector` to unit L2 norm. A zero vector is returned unchanged.
pub fn normalize_l2(vector: &DVector<Float>) -> DVector<Float> {
    match vector.norm() {
        n if n > 0.0 => vector / n,
        _ => vector.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parabola_peak_is_symmetric() {
        assert_relative_eq!(parabola_peak_offset(1.0, 2.0, 1.0), 0.0);
        assert!(parabola_peak_offset(1.5, 2.0, 1.0) < 0.0);
        assert!(parabola_peak_offset(1.0, 2.0, 1.5) > 0.0);
    }

    #[test]
    fn zero_vector_is_not_normalized() {
        let zero = DVector::<Float>::zeros(4);
        assert_eq!(normalize_l2(&zero), zero);
        assert_relative_eq!(normalize_l2(&DVector::from_vec(vec![3.0,4.0])).norm(), 1.0);
    }
}
