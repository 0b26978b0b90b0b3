extern crate nalgebra as na;

use na::{Matrix3,Vector3};
use crate::Float;
use crate::pyramid::sift::{sift_octave::SiftOctave,sift_runtime_params::SiftRuntimeParams};
use crate::features::sift_feature::SiftFeature;

/// First and second order finite differences of the DoG stack at an integer sample.
pub fn dog_derivatives(source_octave: &SiftOctave, x: usize, y: usize, layer: usize) -> (Vector3<Float>,Matrix3<Float>) {
    let curr = &source_octave.difference_of_gaussians[layer].buffer;
    let prev = &source_octave.difference_of_gaussians[layer-1].buffer;
    let next = &source_octave.difference_of_gaussians[layer+1].buffer;

    let v = curr[(y,x)];

    let dx = 0.5*(curr[(y,x+1)] - curr[(y,x-1)]);
    let dy = 0.5*(curr[(y+1,x)] - curr[(y-1,x)]);
    let ds = 0.5*(next[(y,x)] - prev[(y,x)]);

    let dxx = curr[(y,x+1)] + curr[(y,x-1)] - 2.0*v;
    let dyy = curr[(y+1,x)] + curr[(y-1,x)] - 2.0*v;
    let dss = next[(y,x)] + prev[(y,x)] - 2.0*v;
    let dxy = 0.25*(curr[(y+1,x+1)] - curr[(y+1,x-1)] - curr[(y-1,x+1)] + curr[(y-1,x-1)]);
    let dxs = 0.25*(next[(y,x+1)] - next[(y,x-1)] - prev[(y,x+1)] + prev[(y,x-1)]);
    let dys = 0.25*(next[(y+1,x)] - next[(y-1,x)] - prev[(y+1,x)] + prev[(y-1,x)]);

    let gradient = Vector3::new(dx,dy,ds);
    let hessian = Matrix3::new(dxx,dxy,dxs,
                               dxy,dyy,dys,
                               dxs,dys,dss);

    (gradient,hessian)
}

/// Edges have one large and one small principal curvature. Accepts when the ratio stays below `r`.
pub fn accept_edge(dxx: Float, dyy: Float, dxy: Float, r: Float) -> bool {
    let trace = dxx + dyy;
    let determinant = dxx*dyy - dxy.powi(2);
    determinant > 0.0 && trace.powi(2)*r < (r+1.0).powi(2)*determinant
}

/// Quadratic sub-pixel/sub-level refinement followed by contrast and edge rejection.
/// Returns `None` for rejected or diverging extrema.
pub fn refine_sift_feature(source_octave: &SiftOctave, input_params: &SiftFeature, runtime_params: &SiftRuntimeParams) -> Option<SiftFeature> {

    let s = source_octave.s() as isize;
    let border = runtime_params.border.max(1) as isize;
    let width = source_octave.width() as isize;
    let height = source_octave.height() as isize;

    let mut x = input_params.x.round() as isize;
    let mut y = input_params.y.round() as isize;
    let mut layer = input_params.layer as isize;

    let mut converged = None;

    for _ in 0..runtime_params.max_interpolation_steps {
        let (gradient, hessian) = dog_derivatives(source_octave, x as usize, y as usize, layer as usize);
        let perturb = hessian.lu().solve(&(-gradient))?;

        if perturb.iter().all(|v| v.abs() < 0.5) {
            converged = Some((perturb,gradient,hessian));
            break;
        }

        if perturb.iter().any(|v| !v.is_finite() || v.abs() > (height+width) as Float) {
            return None;
        }

        x += perturb[0].round() as isize;
        y += perturb[1].round() as isize;
        layer += perturb[2].round() as isize;

        if layer < 1 || layer > s || x < border || x >= width-border || y < border || y >= height-border {
            return None;
        }
    }

    let (perturb,gradient,hessian) = converged?;

    let dog_sample = source_octave.difference_of_gaussians[layer as usize].buffer[(y as usize,x as usize)];
    let contrast = dog_sample + 0.5*gradient.dot(&perturb);
    if contrast.abs()*(s as Float) < runtime_params.contrast_threshold {
        return None;
    }

    if !accept_edge(hessian[(0,0)], hessian[(1,1)], hessian[(0,1)], runtime_params.edge_r) {
        return None;
    }

    Some(SiftFeature {
        x: x as Float + perturb[0],
        y: y as Float + perturb[1],
        sigma_level: layer as Float + perturb[2],
        layer: layer as usize,
        octave_level: input_params.octave_level
    })
}
