#![allow(dead_code)]

use std::fs;
use std::path::Path;
use image::{Rgb, RgbImage};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tempfile::TempDir;

use scene_svm::{PipelineParameters, Split};
use scene_svm::dataset::category_map::DEFAULT_CATEGORIES;

/// Fresh directory under the system temp dir, removed when dropped.
pub fn scratch_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Lighter extraction settings so whole-dataset tests stay quick.
pub fn small_params(root: &Path) -> PipelineParameters {
    let mut params = PipelineParameters::default();
    params.dataset_root = root.to_path_buf();
    params.resize_dim = (64, 64);
    params.sift.upsample = false;
    params
}

/// Category tinted noise with a few bright squares, fully determined by `seed`.
pub fn synthetic_image(category: usize, seed: u64, width: u32, height: u32) -> RgbImage {
    let mut rng = SmallRng::seed_from_u64(seed);
    let tint = [[180u8, 60, 40], [90, 90, 100], [40, 160, 60], [200, 170, 140]][category % 4];
    let mut image = RgbImage::from_fn(width, height, |_, _| {
        let noise: i16 = rng.gen_range(-25..25);
        Rgb(tint.map(|c| (c as i16 + noise).clamp(0, 255) as u8))
    });

    for _ in 0..3 {
        let side = rng.gen_range(4..width.min(height)/3);
        let x0 = rng.gen_range(0..width-side);
        let y0 = rng.gen_range(0..height-side);
        for y in y0..y0+side {
            for x in x0..x0+side {
                image.put_pixel(x, y, Rgb([250, 250, 250]));
            }
        }
    }
    image
}

/// Creates every `<split>/<category>` directory and fills it with `counts[split][category]` images.
pub fn write_dataset(root: &Path, counts: [[usize; 4]; 2]) {
    for (s, split) in Split::ALL.iter().enumerate() {
        for (c, category) in DEFAULT_CATEGORIES.iter().enumerate() {
            let dir = root.join(split.dir_name()).join(category);
            fs::create_dir_all(&dir).unwrap();
            for i in 0..counts[s][c] {
                let seed = (s*1000 + c*100 + i) as u64;
                synthetic_image(c, seed, 80, 72).save(dir.join(format!("{:02}.png", i))).unwrap();
            }
        }
    }
}
