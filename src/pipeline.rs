//! Load, split, scale, train, predict and report.

use tracing::info;

use crate::error::Result;
use crate::dataset::{Dataset, load_dataset, category_map::CategoryMap};
use crate::fusion::FeatureExtractor;
use crate::preprocessing::{partition, standard_scaler::StandardScaler};
use crate::classifier::{Classifier, TrainedModel, linear_svm::LinearSvm};
use crate::report::ClassificationReport;
use crate::runtime_parameters::PipelineParameters;

#[derive(Debug,Clone)]
pub struct Evaluation {
    pub train_size: usize,
    pub eval_size: usize,
    pub y_eval: Vec<usize>,
    pub predictions: Vec<usize>,
    pub report: ClassificationReport
}

/// Partitions an already loaded dataset, fits the scaler and classifier on the training
/// rows and reports on the evaluation rows.
pub fn evaluate(dataset: &Dataset, categories: &CategoryMap, params: &PipelineParameters) -> Result<Evaluation> {
    let partition = partition(dataset, &params.split)?;
    info!("Training samples: {}, evaluation samples: {}", partition.y_train.len(), partition.y_eval.len());

    let (scaler, x_train) = StandardScaler::fit_transform(&partition.x_train)?;
    let x_eval = scaler.transform(&partition.x_eval)?;

    let model = LinearSvm::new(&params.svm).train(&x_train, &partition.y_train)?;
    let predictions = model.predict(&x_eval);
    let report = ClassificationReport::new(&partition.y_eval, &predictions, categories)?;
    info!("Accuracy: {:.4}", report.accuracy);

    Ok(Evaluation {
        train_size: partition.y_train.len(),
        eval_size: partition.y_eval.len(),
        y_eval: partition.y_eval,
        predictions,
        report
    })
}

pub fn run(params: &PipelineParameters) -> Result<Evaluation> {
    params.validate()?;
    let categories = CategoryMap::new(&params.categories);
    let extractor = FeatureExtractor::new(params)?;

    info!("Loading dataset from {}", params.dataset_root.display());
    let dataset = load_dataset(&params.dataset_root, &categories, &extractor)?;

    evaluate(&dataset, &categories, params)
}
