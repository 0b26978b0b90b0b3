//! Turns a `<root>/<split>/<category>/<file>` tree into aligned feature rows and labels.

extern crate nalgebra as na;
#[cfg(all(test, feature = "parallel"))]
extern crate image as image_rs;

use std::fmt;
use std::path::{Path, PathBuf};
use na::DMatrix;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::Float;
use crate::error::{ClassifyError, Result};
use crate::fusion::{FeatureExtractor, FusedFeature};
use self::category_map::CategoryMap;

pub mod category_map;

#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash)]
pub enum Split {
    Train,
    Test
}

impl Split {
    /// Load order of the splits.
    pub const ALL: [Split; 2] = [Split::Train, Split::Test];

    pub fn dir_name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test"
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// Labelled examples in load order. Row `i` of `features` belongs to `labels[i]`,
/// `splits[i]` and `sources[i]`.
#[derive(Debug,Clone)]
pub struct Dataset {
    pub root: PathBuf,
    pub features: DMatrix<Float>,
    pub labels: Vec<usize>,
    pub splits: Vec<Split>,
    pub sources: Vec<PathBuf>
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.features.ncols()
    }

    pub fn count_of(&self, label: usize) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }
}

/// A file scheduled for extraction.
#[derive(Debug,Clone,PartialEq)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub label: usize,
    pub split: Split
}

/// Regular files directly inside `dir`, sorted by file name.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ClassifyError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::<PathBuf>::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| ClassifyError::Walk{path: dir.to_path_buf(), source})?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Every file of every split and category in load order.
pub fn list_images(root: &Path, categories: &CategoryMap) -> Result<Vec<ImageEntry>> {
    let mut entries = Vec::<ImageEntry>::new();
    for split in Split::ALL {
        for (label, name) in categories.iter() {
            let dir = root.join(split.dir_name()).join(name);
            let files = list_files(&dir)?;
            info!("Processing {}/{}: {} files", split, name, files.len());
            entries.extend(files.into_iter().map(|path| ImageEntry{path, label, split}));
        }
    }
    Ok(entries)
}

#[cfg(feature = "parallel")]
fn extract_all(entries: &[ImageEntry], extractor: &FeatureExtractor) -> Vec<Result<FusedFeature>> {
    use rayon::prelude::*;
    entries.par_iter().map(|entry| extractor.extract_from_path(&entry.path)).collect()
}

#[cfg(not(feature = "parallel"))]
fn extract_all(entries: &[ImageEntry], extractor: &FeatureExtractor) -> Vec<Result<FusedFeature>> {
    entries.iter().map(|entry| extractor.extract_from_path(&entry.path)).collect()
}

/// Loads and fuses the whole tree. Undecodable files are logged and left out of every
/// output array, anything else is fatal. Both splits must keep at least one example.
pub fn load_dataset(root: &Path, categories: &CategoryMap, extractor: &FeatureExtractor) -> Result<Dataset> {
    let entries = list_images(root, categories)?;
    let results = extract_all(&entries, extractor);

    let mut rows = Vec::<FusedFeature>::with_capacity(entries.len());
    let mut labels = Vec::<usize>::with_capacity(entries.len());
    let mut splits = Vec::<Split>::with_capacity(entries.len());
    let mut sources = Vec::<PathBuf>::with_capacity(entries.len());
    let mut skipped = 0;

    for (entry, result) in entries.into_iter().zip(results) {
        match result {
            Ok(feature) => {
                rows.push(feature);
                labels.push(entry.label);
                splits.push(entry.split);
                sources.push(entry.path);
            },
            Err(ClassifyError::Decode{path, source}) => {
                warn!("Error loading image {}: {}", path.display(), source);
                skipped += 1;
            },
            Err(e) => return Err(e)
        }
    }

    if rows.is_empty() {
        return Err(ClassifyError::EmptyDataset(root.to_path_buf()));
    }
    if let Some(&split) = Split::ALL.iter().find(|split| !splits.contains(split)) {
        return Err(ClassifyError::EmptySplit(split));
    }

    let dimension = extractor.expected_dimension();
    let features = DMatrix::<Float>::from_fn(rows.len(), dimension, |r,c| rows[r][c]);

    info!("Total images processed: {}", labels.len());
    info!("Number of features per image: {}", dimension);
    if skipped > 0 {
        warn!("Skipped {} unreadable images", skipped);
    }

    Ok(Dataset{root: root.to_path_buf(), features, labels, splits, sources})
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn listing_is_sorted_and_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        for name in ["b.png", "a.png", "c.jpg"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let files = list_files(dir.path()).unwrap();
        let names = files.iter().map(|p| p.file_name().unwrap().to_str().unwrap().to_string()).collect::<Vec<_>>();
        assert_eq!(names, vec!["a.png","b.png","c.jpg"]);
    }

    #[test]
    fn missing_category_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("train").join("animals")).unwrap();
        let categories = CategoryMap::new(&["animals".to_string()]);

        let result = list_images(dir.path(), &categories);
        assert!(matches!(result, Err(ClassifyError::MissingDirectory(p)) if p.ends_with("test/animals")));
    }

    #[test]
    fn entries_follow_split_then_category_order() {
        let dir = TempDir::new().unwrap();
        let categories = CategoryMap::new(&["x".to_string(), "y".to_string()]);
        for split in Split::ALL {
            for (_, name) in categories.iter() {
                let category_dir = dir.path().join(split.dir_name()).join(name);
                fs::create_dir_all(&category_dir).unwrap();
                fs::write(category_dir.join("0.png"), b"x").unwrap();
            }
        }

        let entries = list_images(dir.path(), &categories).unwrap();
        let order = entries.iter().map(|e| (e.split, e.label)).collect::<Vec<_>>();
        assert_eq!(order, vec![(Split::Train,0),(Split::Train,1),(Split::Test,0),(Split::Test,1)]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_extraction_keeps_list_order() {
        use image_rs::{Rgb, RgbImage};
        use crate::runtime_parameters::PipelineParameters;

        let dir = TempDir::new().unwrap();
        let categories = CategoryMap::new(&["x".to_string()]);
        for split in Split::ALL {
            let category_dir = dir.path().join(split.dir_name()).join("x");
            fs::create_dir_all(&category_dir).unwrap();
            for i in 0..6u32 {
                let image = RgbImage::from_fn(64, 64, |x, y| Rgb([(x*4) as u8, (y*4) as u8, (i*40) as u8]));
                image.save(category_dir.join(format!("{}.png", i))).unwrap();
            }
            fs::write(category_dir.join("broken.png"), b"x").unwrap();
        }

        let mut params = PipelineParameters::default();
        params.resize_dim = (64, 64);
        params.sift.upsample = false;
        let extractor = FeatureExtractor::new(&params).unwrap();
        let entries = list_images(dir.path(), &categories).unwrap();

        let parallel = extract_all(&entries, &extractor);
        let sequential = entries.iter().map(|entry| extractor.extract_from_path(&entry.path)).collect::<Vec<_>>();

        assert_eq!(parallel.len(), sequential.len());
        for (p, s) in parallel.iter().zip(sequential.iter()) {
            assert_eq!(p.as_ref().ok(), s.as_ref().ok());
        }
        assert_eq!(parallel.iter().filter(|r| r.is_err()).count(), 2);
    }
}
