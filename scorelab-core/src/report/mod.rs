//! Estimator and comparison reports.
//!
//! A report binds a fitted classifier to its train/test data and caches the
//! predicted probabilities. Displays are built from reports through
//! `report.metrics()`.

pub mod comparison;
pub mod estimator;

pub use comparison::{ComparisonMetrics, ComparisonReport};
pub use estimator::{EstimatorMetrics, EstimatorReport};

use crate::dataset::DatasetError;
use crate::estimator::EstimatorError;
use crate::label::Label;
use crate::metrics::MetricError;
use polars::prelude::PolarsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("a comparison needs at least one report")]
    EmptyComparison,

    #[error("duplicate report name '{0}'")]
    DuplicateName(String),

    #[error("estimator is not fitted and no training data was given")]
    NotFittedWithoutTrainData,

    #[error(
        "reports '{first}' and '{other}' were evaluated on different test sets"
    )]
    DifferentTestSets { first: String, other: String },

    #[error("reports '{first}' and '{other}' have different classes: {first_classes:?} vs {other_classes:?}")]
    DifferentClasses {
        first: String,
        other: String,
        first_classes: Vec<Label>,
        other_classes: Vec<Label>,
    },

    #[error("test set contains label {0} that the estimator never saw")]
    UnknownTestLabel(Label),

    #[error("report '{0}' has no training data")]
    MissingTrainData(String),

    #[error("pos_label {label} is not one of the classes {classes:?}")]
    InvalidPosLabel { label: Label, classes: Vec<Label> },

    #[error("pos_label is only meaningful for binary classification")]
    PosLabelNotBinary,

    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("estimator error: {0}")]
    Estimator(#[from] EstimatorError),

    #[error("metric error: {0}")]
    Metric(#[from] MetricError),

    #[error("table error: {0}")]
    Polars(#[from] PolarsError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MlTask {
    BinaryClassification,
    MulticlassClassification,
}

impl MlTask {
    pub fn from_n_classes(n_classes: usize) -> Self {
        if n_classes <= 2 {
            MlTask::BinaryClassification
        } else {
            MlTask::MulticlassClassification
        }
    }

    pub fn is_binary(self) -> bool {
        self == MlTask::BinaryClassification
    }
}

/// Which split a metric is computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    #[default]
    Test,
    Train,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Test => f.write_str("test"),
            DataSource::Train => f.write_str("train"),
        }
    }
}

/// Kind of report a display was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportType {
    Estimator,
    ComparisonEstimator,
}

/// Options for `metrics().roc(...)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RocOptions {
    pub data_source: DataSource,
    /// Binary only; defaults to the second class.
    pub pos_label: Option<Label>,
}

impl RocOptions {
    pub fn on(data_source: DataSource) -> Self {
        Self {
            data_source,
            pos_label: None,
        }
    }

    pub fn with_pos_label(mut self, label: impl Into<Label>) -> Self {
        self.pos_label = Some(label.into());
        self
    }
}

/// The labels a display draws: the positive label for binary tasks, every
/// class otherwise.
pub(crate) fn resolve_labels(
    classes: &[Label],
    pos_label: Option<&Label>,
) -> Result<(Option<Label>, Vec<Label>), ReportError> {
    match MlTask::from_n_classes(classes.len()) {
        MlTask::BinaryClassification => {
            let pos = match pos_label {
                Some(label) if classes.contains(label) => label.clone(),
                Some(label) => {
                    return Err(ReportError::InvalidPosLabel {
                        label: label.clone(),
                        classes: classes.to_vec(),
                    })
                }
                None => classes
                    .last()
                    .cloned()
                    .ok_or(ReportError::Estimator(EstimatorError::TooFewClasses(0)))?,
            };
            Ok((Some(pos.clone()), vec![pos]))
        }
        MlTask::MulticlassClassification => {
            if pos_label.is_some() {
                return Err(ReportError::PosLabelNotBinary);
            }
            Ok((None, classes.to_vec()))
        }
    }
}
