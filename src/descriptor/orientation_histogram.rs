use crate::{float,Float};
use crate::pyramid::sift::{sift_octave::SiftOctave,sift_runtime_params::SiftRuntimeParams};
use crate::numerics::{gradient_and_orientation,gauss_weight,parabola_peak_offset};
use crate::descriptor::keypoint::KeyPoint;
use crate::features::{Feature,sift_feature::SiftFeature};


#[derive(Debug,Clone)]
pub struct OrientationHistogram {
    pub max_bin: usize,
    pub bin_range: Float,
    pub bins: Vec<Float>
}

impl OrientationHistogram {

    pub fn new(bin_len: usize) -> OrientationHistogram {
        OrientationHistogram{
            max_bin: 0,
            bin_range: 2.0*float::consts::PI/(bin_len as Float),
            bins: vec![0.0;bin_len]
        }
    }

    pub fn add_measurement(&mut self, grad_orientation: (Float,Float), weight: Float) -> () {
        let (grad,orientation) = grad_orientation;
        let index = radian_to_index(self,orientation);
        self.bins[index] += grad*weight;
        if self.bins[index] > self.bins[self.max_bin] {
            self.max_bin = index;
        }
    }

    pub fn get_value_circular(&self, i: isize) -> Float {
        let len = self.bins.len() as isize;
        self.bins[i.rem_euclid(len) as usize]
    }

    /// [1 4 6 4 1]/16 smoothing with wrap around.
    pub fn smooth(&mut self) -> () {
        let smoothed = (0..self.bins.len() as isize).map(|idx|
            (self.get_value_circular(idx-2) + self.get_value_circular(idx+2))/16.0 +
            (self.get_value_circular(idx-1) + self.get_value_circular(idx+1))*4.0/16.0 +
            self.get_value_circular(idx)*6.0/16.0
        ).collect::<Vec<Float>>();

        self.bins = smoothed;
        self.max_bin = self.bins.iter().enumerate().fold(0, |max_idx, (idx,v)| if *v > self.bins[max_idx] {idx} else {max_idx});
    }

    /// Interpolated bin positions of all local maxima reaching `peak_ratio` of the global maximum.
    pub fn peaks(&self, peak_ratio: Float) -> Vec<Float> {
        let threshold = self.bins[self.max_bin]*peak_ratio;
        let len = self.bins.len() as Float;

        (0..self.bins.len()).filter(|&c| filter_adjacent(self, c as isize) && self.bins[c] >= threshold).map(|c| {
            let (l,_,r) = get_adjacent_circular_by_index(self, c as isize);
            let bin = c as Float + parabola_peak_offset(self.bins[l], self.bins[c], self.bins[r]);
            // rem_euclid of a tiny negative offset rounds up to len
            match bin.rem_euclid(len) {
                b if b >= len => 0.0,
                b => b
            }
        }).collect()
    }
}

pub fn index_to_radian(histogram: &OrientationHistogram, index: Float) -> Float {
    assert!(index >=0.0 && index < histogram.bins.len() as Float);
    index*histogram.bin_range
}

pub fn radian_to_index(histogram: &OrientationHistogram, orientation: Float) -> usize {
    let len = histogram.bins.len() as isize;
    ((orientation/histogram.bin_range).round() as isize).rem_euclid(len) as usize
}

/// Assigns one keypoint per dominant gradient orientation around the refined extremum.
pub fn generate_keypoints_from_extrema(octave: &SiftOctave, extrema: &SiftFeature, runtime_params: &SiftRuntimeParams) -> Vec<KeyPoint> {

    let s = octave.s() as Float;
    let scale = runtime_params.sigma_initial*(extrema.sigma_level/s).exp2();
    let sigma = runtime_params.orientation_sigma_factor*scale;
    let radius = (runtime_params.orientation_radius_factor*sigma).round() as isize;

    let layer = extrema.get_closest_sigma_level();
    let x_grad = &octave.x_gradient[layer];
    let y_grad = &octave.y_gradient[layer];
    let width = octave.width() as isize;
    let height = octave.height() as isize;
    let x_center = extrema.get_x_image() as isize;
    let y_center = extrema.get_y_image() as isize;

    let mut histogram = OrientationHistogram::new(runtime_params.orientation_bins);

    for y_off in -radius..radius+1 {
        let y = y_center + y_off;
        if y <= 0 || y >= height-1 {
            continue;
        }
        for x_off in -radius..radius+1 {
            let x = x_center + x_off;
            if x <= 0 || x >= width-1 {
                continue;
            }
            let weight = gauss_weight(x_off as Float, y_off as Float, sigma);
            let grad_orientation = gradient_and_orientation(x_grad, y_grad, x as usize, y as usize);
            histogram.add_measurement(grad_orientation, weight);
        }
    }

    histogram.smooth();

    histogram.peaks(runtime_params.orientation_peak_ratio).into_iter().map(|peak_idx| KeyPoint {
        x: extrema.x,
        y: extrema.y,
        layer,
        octave_level: extrema.octave_level,
        scale,
        orientation: index_to_radian(&histogram,peak_idx)
    }).collect()
}

pub fn filter_adjacent(histogram: &OrientationHistogram, bin_idx: isize) -> bool {
    let (l,c,r) = get_adjacent_circular_by_index(histogram, bin_idx);
    let c_val = histogram.bins[c];
    c_val > histogram.bins[l] && c_val > histogram.bins[r]
}

fn get_adjacent_circular_by_index(histogram: &OrientationHistogram, bin_idx: isize) -> (usize,usize,usize) {
    let bin_len = histogram.bins.len() as isize;
    assert!(bin_len >=3);

    let l = (bin_idx - 1).rem_euclid(bin_len);
    let r = (bin_idx + 1).rem_euclid(bin_len);

    (l as usize, bin_idx as usize, r as usize)
}
