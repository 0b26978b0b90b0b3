extern crate nalgebra as na;

use na::SVector;
use crate::Float;
use crate::descriptor::{DESCRIPTOR_SIZE,local_image_descriptor::LocalImageDescriptor};

const DESCRIPTOR_SCALE: Float = 512.0;

/// Flattened SIFT descriptor with values in the 8 bit range.
#[derive(Debug,Clone,PartialEq)]
pub struct FeatureVector {
    pub data: SVector<Float,DESCRIPTOR_SIZE>
}

impl FeatureVector {
    /// Normalize, saturate at `magnitude_threshold`, renormalize and quantize to [0,255].
    pub fn new(descriptor: &LocalImageDescriptor, magnitude_threshold: Float) -> FeatureVector {
        let raw = SVector::<Float,DESCRIPTOR_SIZE>::from_iterator(descriptor.descriptor_vector.iter().flat_map(|h| h.bins.iter().cloned()));

        let threshold = raw.norm()*magnitude_threshold;
        let saturated = raw.map(|v| v.min(threshold));
        let scale = DESCRIPTOR_SCALE/saturated.norm().max(Float::EPSILON);
        let data = saturated.map(|v| (v*scale).round().clamp(0.0,255.0));

        FeatureVector{data}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{DESCRIPTOR_BINS,ORIENTATION_BINS,orientation_histogram::OrientationHistogram};

    #[test]
    fn dominant_bin_is_saturated() {
        let mut histograms = vec![OrientationHistogram::new(ORIENTATION_BINS);DESCRIPTOR_BINS];
        histograms[0].bins[0] = 100.0;
        histograms[3].bins[2] = 1.0;
        let descriptor = LocalImageDescriptor{descriptor_vector: histograms};

        let vector = FeatureVector::new(&descriptor, 0.2);

        // clamped to 0.2 of the norm, then renormalized so the two survivors share 512
        assert!(vector.data[0] <= 255.0);
        assert!(vector.data[3*ORIENTATION_BINS+2] > 0.0);
        assert!(vector.data[0] > vector.data[3*ORIENTATION_BINS+2]);
    }

    #[test]
    fn empty_descriptor_stays_zero() {
        let histograms = vec![OrientationHistogram::new(ORIENTATION_BINS);DESCRIPTOR_BINS];
        let descriptor = LocalImageDescriptor{descriptor_vector: histograms};

        assert!(FeatureVector::new(&descriptor, 0.2).data.iter().all(|&v| v == 0.0));
    }
}
