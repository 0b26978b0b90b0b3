mod common;

use std::fs;
use scene_svm::{CategoryMap, ClassifyError, FeatureExtractor, Split};
use scene_svm::dataset::load_dataset;
use scene_svm::pipeline::{evaluate, run};
use scene_svm::preprocessing::{partition, SplitStrategy, standard_scaler::StandardScaler};

#[test]
fn corrupt_file_is_skipped_without_breaking_alignment() {
    let dir = common::scratch_dir();
    let root = dir.path();
    common::write_dataset(root, [[10, 2, 0, 0], [0, 0, 0, 1]]);
    fs::write(root.join("train").join("animals").join("03.png"), b"definitely not a png").unwrap();

    let params = common::small_params(root);
    let categories = CategoryMap::default();
    let extractor = FeatureExtractor::new(&params).unwrap();
    let dataset = load_dataset(root, &categories, &extractor).unwrap();

    assert_eq!(dataset.len(), 12);
    assert_eq!(dataset.features.nrows(), dataset.labels.len());
    assert_eq!(dataset.count_of(0), 9);
    assert_eq!(&dataset.labels[9..], &[1, 1, 3]);
    assert!(dataset.sources.iter().all(|p| !p.ends_with("animals/03.png")));
    assert_eq!(dataset.splits[11], Split::Test);
}

#[test]
fn five_examples_split_four_to_one() {
    let dir = common::scratch_dir();
    let root = dir.path();
    common::write_dataset(root, [[2, 0, 2, 0], [0, 0, 0, 1]]);

    let evaluation = run(&common::small_params(root)).unwrap();

    assert_eq!(evaluation.train_size, 4);
    assert_eq!(evaluation.eval_size, 1);
    assert_eq!(evaluation.y_eval, vec![3]);
    assert_eq!(evaluation.report.per_class[3].support, 1);
}

#[test]
fn repeated_runs_are_identical() {
    let dir = common::scratch_dir();
    let root = dir.path();
    common::write_dataset(root, [[10; 4], [10; 4]]);

    let params = common::small_params(root);
    let categories = CategoryMap::default();
    let extractor = FeatureExtractor::new(&params).unwrap();

    let first = load_dataset(root, &categories, &extractor).unwrap();
    let second = load_dataset(root, &categories, &extractor).unwrap();
    assert_eq!(first.features, second.features);
    assert_eq!(first.labels, second.labels);
    assert_eq!(first.dimension(), extractor.expected_dimension());

    let a = evaluate(&first, &categories, &params).unwrap();
    let b = evaluate(&second, &categories, &params).unwrap();
    assert_eq!((a.train_size, a.eval_size), (64, 16));
    assert_eq!(a.predictions, b.predictions);
    assert_eq!(a.report, b.report);
    assert_eq!(a.report.to_string(), b.report.to_string());

    // the positional tail is all of test/people and the end of test/nature
    assert_eq!(&a.y_eval[..6], &[2, 2, 2, 2, 2, 2]);
    assert!(a.y_eval[6..].iter().all(|&l| l == 3));
}

#[test]
fn training_partition_is_standardized() {
    let dir = common::scratch_dir();
    let root = dir.path();
    common::write_dataset(root, [[4; 4], [1; 4]]);

    let params = common::small_params(root);
    let extractor = FeatureExtractor::new(&params).unwrap();
    let dataset = load_dataset(root, &CategoryMap::default(), &extractor).unwrap();
    let split = partition(&dataset, &params.split).unwrap();
    let (_, x_train) = StandardScaler::fit_transform(&split.x_train).unwrap();

    let n = x_train.nrows() as f64;
    let mut checked = 0;
    for (raw, scaled) in split.x_train.column_iter().zip(x_train.column_iter()) {
        if raw.iter().all(|&v| v == raw[0]) {
            assert!(scaled.iter().all(|&v| v.abs() < 1e-12));
            continue;
        }
        let mean = scaled.mean();
        let std = (scaled.iter().map(|v| (v - mean).powi(2)).sum::<f64>()/n).sqrt();
        assert!(mean.abs() < 1e-9);
        assert!((std - 1.0).abs() < 1e-9);
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn directory_strategy_evaluates_on_test_split() {
    let dir = common::scratch_dir();
    let root = dir.path();
    common::write_dataset(root, [[3; 4], [2; 4]]);

    let mut params = common::small_params(root);
    params.split.strategy = SplitStrategy::Directory;
    let evaluation = run(&params).unwrap();

    assert_eq!((evaluation.train_size, evaluation.eval_size), (12, 8));
    assert_eq!(evaluation.y_eval, vec![0, 0, 1, 1, 2, 2, 3, 3]);
}

#[test]
fn missing_split_directory_is_fatal() {
    let dir = common::scratch_dir();
    let root = dir.path();
    fs::create_dir_all(root.join("train")).unwrap();

    let result = run(&common::small_params(root));
    assert!(matches!(result, Err(ClassifyError::MissingDirectory(_))));
}

#[test]
fn only_corrupt_files_is_an_empty_dataset() {
    let dir = common::scratch_dir();
    let root = dir.path();
    common::write_dataset(root, [[0; 4], [0; 4]]);
    fs::write(root.join("test").join("nature").join("broken.jpg"), b"garbage").unwrap();

    let result = run(&common::small_params(root));
    assert!(matches!(result, Err(ClassifyError::EmptyDataset(_))));
}

#[test]
fn empty_test_split_is_fatal() {
    let dir = common::scratch_dir();
    let root = dir.path();
    common::write_dataset(root, [[3, 2, 2, 3], [0, 0, 0, 0]]);

    let result = run(&common::small_params(root));
    assert!(matches!(result, Err(ClassifyError::EmptySplit(Split::Test))));
}

#[test]
fn all_corrupt_train_split_is_fatal() {
    let dir = common::scratch_dir();
    let root = dir.path();
    common::write_dataset(root, [[0, 0, 0, 0], [1, 1, 1, 1]]);
    fs::write(root.join("train").join("people").join("broken.png"), b"garbage").unwrap();

    let result = run(&common::small_params(root));
    assert!(matches!(result, Err(ClassifyError::EmptySplit(Split::Train))));
}
