use crate::{float,Float};
use crate::numerics::gradient_and_orientation;
use crate::pyramid::sift::{sift_octave::SiftOctave,sift_runtime_params::SiftRuntimeParams};
use crate::descriptor::{DESCRIPTOR_WIDTH,DESCRIPTOR_BINS,ORIENTATION_BINS,orientation_histogram::OrientationHistogram,keypoint::KeyPoint};

/// 4x4 grid of 8 bin orientation histograms sampled in the keypoint's rotated frame.
#[derive(Debug,Clone)]
pub struct LocalImageDescriptor {
    pub descriptor_vector: Vec<OrientationHistogram>
}

impl LocalImageDescriptor {
    pub fn new(octave: &SiftOctave, keypoint: &KeyPoint, runtime_params: &SiftRuntimeParams) -> LocalImageDescriptor {
        let d = DESCRIPTOR_WIDTH as isize;
        let n = ORIENTATION_BINS as isize;
        let d_f = DESCRIPTOR_WIDTH as Float;
        let n_f = ORIENTATION_BINS as Float;

        let x_gradient = &octave.x_gradient[keypoint.layer];
        let y_gradient = &octave.y_gradient[keypoint.layer];
        let width = octave.width() as isize;
        let height = octave.height() as isize;

        let histogram_width = runtime_params.descriptor_scale_factor*keypoint.scale;
        let max_radius = ((width*width + height*height) as Float).sqrt();
        let radius = (histogram_width*float::consts::SQRT_2*(d_f+1.0)*0.5).round().min(max_radius) as isize;

        let cos_t = keypoint.orientation.cos()/histogram_width;
        let sin_t = keypoint.orientation.sin()/histogram_width;
        let bins_per_rad = n_f/(2.0*float::consts::PI);
        let exp_scale = -1.0/(d_f*d_f*0.5);

        let x_center = keypoint.x.round() as isize;
        let y_center = keypoint.y.round() as isize;

        // one extra row/column/bin on each side absorbs the interpolation spill over
        let row_stride = (d+2)*(n+2);
        let mut histogram = vec![0.0 as Float; ((d+2)*(d+2)*(n+2)) as usize];

        for y_off in -radius..radius+1 {
            for x_off in -radius..radius+1 {
                // sample position projected onto the keypoint axes, in histogram cell units
                let c_rot = x_off as Float*cos_t + y_off as Float*sin_t;
                let r_rot = -(x_off as Float)*sin_t + y_off as Float*cos_t;
                let r_bin = r_rot + d_f/2.0 - 0.5;
                let c_bin = c_rot + d_f/2.0 - 0.5;
                let y = y_center + y_off;
                let x = x_center + x_off;

                let inside_grid = r_bin > -1.0 && r_bin < d_f && c_bin > -1.0 && c_bin < d_f;
                let inside_image = y > 0 && y < height-1 && x > 0 && x < width-1;
                if !(inside_grid && inside_image) {
                    continue;
                }

                let (gradient, orientation) = gradient_and_orientation(x_gradient, y_gradient, x as usize, y as usize);
                let weight = (exp_scale*(c_rot.powi(2) + r_rot.powi(2))).exp();
                let magnitude = gradient*weight;
                let o_bin = (orientation - keypoint.orientation)*bins_per_rad;

                let r_0 = r_bin.floor();
                let c_0 = c_bin.floor();
                let o_0 = o_bin.floor();
                let r_frac = r_bin - r_0;
                let c_frac = c_bin - c_0;
                let o_frac = o_bin - o_0;
                let o_0 = (o_0 as isize).rem_euclid(n);

                let v_r1 = magnitude*r_frac;
                let v_r0 = magnitude - v_r1;
                let v_rc11 = v_r1*c_frac;
                let v_rc10 = v_r1 - v_rc11;
                let v_rc01 = v_r0*c_frac;
                let v_rc00 = v_r0 - v_rc01;
                let v_rco111 = v_rc11*o_frac;
                let v_rco110 = v_rc11 - v_rco111;
                let v_rco101 = v_rc10*o_frac;
                let v_rco100 = v_rc10 - v_rco101;
                let v_rco011 = v_rc01*o_frac;
                let v_rco010 = v_rc01 - v_rco011;
                let v_rco001 = v_rc00*o_frac;
                let v_rco000 = v_rc00 - v_rco001;

                let idx = ((r_0 as isize + 1)*(d+2) + c_0 as isize + 1)*(n+2) + o_0;
                let idx = idx as usize;
                let n_2 = (n+2) as usize;
                let row = row_stride as usize;

                histogram[idx] += v_rco000;
                histogram[idx+1] += v_rco001;
                histogram[idx+n_2] += v_rco010;
                histogram[idx+n_2+1] += v_rco011;
                histogram[idx+row] += v_rco100;
                histogram[idx+row+1] += v_rco101;
                histogram[idx+row+n_2] += v_rco110;
                histogram[idx+row+n_2+1] += v_rco111;
            }
        }

        let mut descriptor = vec![OrientationHistogram::new(ORIENTATION_BINS);DESCRIPTOR_BINS];

        for i in 0..DESCRIPTOR_WIDTH {
            for j in 0..DESCRIPTOR_WIDTH {
                let idx = ((i+1)*(DESCRIPTOR_WIDTH+2) + (j+1))*(ORIENTATION_BINS+2);
                // fold the wrapped orientation bins back
                histogram[idx] += histogram[idx+ORIENTATION_BINS];
                histogram[idx+1] += histogram[idx+ORIENTATION_BINS+1];
                descriptor[i*DESCRIPTOR_WIDTH+j].bins.copy_from_slice(&histogram[idx..idx+ORIENTATION_BINS]);
            }
        }

        LocalImageDescriptor{descriptor_vector: descriptor}
    }
}
