//! Per-category precision, recall, F1 and support with accuracy and averages.

use std::fmt;

use crate::Float;
use crate::error::{ClassifyError, Result};
use crate::dataset::category_map::CategoryMap;

const DIGITS: usize = 2;
const COLUMN_WIDTH: usize = 9;

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct ClassMetrics {
    pub precision: Float,
    pub recall: Float,
    pub f1: Float,
    pub support: usize
}

/// Ratio that is 0 when undefined.
fn safe_ratio(numerator: usize, denominator: usize) -> Float {
    match denominator {
        0 => 0.0,
        d => numerator as Float / d as Float
    }
}

impl ClassMetrics {
    fn from_counts(true_positive: usize, predicted: usize, support: usize) -> ClassMetrics {
        let precision = safe_ratio(true_positive, predicted);
        let recall = safe_ratio(true_positive, support);
        let f1 = match precision + recall {
            s if s > 0.0 => 2.0*precision*recall/s,
            _ => 0.0
        };
        ClassMetrics{precision, recall, f1, support}
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct ClassificationReport {
    pub names: Vec<String>,
    pub per_class: Vec<ClassMetrics>,
    pub accuracy: Float,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics
}

impl ClassificationReport {
    pub fn new(y_true: &[usize], y_pred: &[usize], categories: &CategoryMap) -> Result<ClassificationReport> {
        if y_true.len() != y_pred.len() {
            return Err(ClassifyError::DimensionMismatch{expected: y_true.len(), actual: y_pred.len()});
        }
        if y_true.is_empty() {
            return Err(ClassifyError::EmptyPartition("evaluation"));
        }

        let per_class = categories.iter().map(|(label, _)| {
            let support = y_true.iter().filter(|&&t| t == label).count();
            let predicted = y_pred.iter().filter(|&&p| p == label).count();
            let true_positive = y_true.iter().zip(y_pred.iter()).filter(|&(&t, &p)| t == label && p == label).count();
            ClassMetrics::from_counts(true_positive, predicted, support)
        }).collect::<Vec<ClassMetrics>>();

        let correct = y_true.iter().zip(y_pred.iter()).filter(|(t, p)| t == p).count();
        let accuracy = safe_ratio(correct, y_true.len());

        let classes = per_class.len() as Float;
        let total_support = per_class.iter().map(|m| m.support).sum::<usize>();
        let average = |weight: &dyn Fn(&ClassMetrics) -> Float, norm: Float| {
            let avg = |value: fn(&ClassMetrics) -> Float| match norm {
                n if n > 0.0 => per_class.iter().map(|m| weight(m)*value(m)).sum::<Float>()/n,
                _ => 0.0
            };
            ClassMetrics {
                precision: avg(|m| m.precision),
                recall: avg(|m| m.recall),
                f1: avg(|m| m.f1),
                support: total_support
            }
        };

        let macro_avg = average(&|_| 1.0, classes);
        let weighted_avg = average(&|m| m.support as Float, total_support as Float);

        Ok(ClassificationReport {
            names: categories.iter().map(|(_, name)| name.to_string()).collect(),
            per_class,
            accuracy,
            macro_avg,
            weighted_avg
        })
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self.names.iter().map(|n| n.len()).chain(std::iter::once("weighted avg".len())).max().unwrap_or(0);
        let w = COLUMN_WIDTH;
        let d = DIGITS;

        writeln!(f, "{:>width$}  {:>w$}{:>w$}{:>w$}{:>w$}", "", "precision", "recall", "f1-score", "support")?;
        writeln!(f)?;
        for (name, m) in self.names.iter().zip(self.per_class.iter()) {
            writeln!(f, "{:>width$}  {:>w$.d$}{:>w$.d$}{:>w$.d$}{:>w$}", name, m.precision, m.recall, m.f1, m.support)?;
        }
        writeln!(f)?;
        writeln!(f, "{:>width$}  {:>w$}{:>w$}{:>w$.d$}{:>w$}", "accuracy", "", "", self.accuracy, self.weighted_avg.support)?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(f, "{:>width$}  {:>w$.d$}{:>w$.d$}{:>w$.d$}{:>w$}", name, m.precision, m.recall, m.f1, m.support)?;
        }
        Ok(())
    }
}
