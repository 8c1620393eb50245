//! Classifier trait and implementations.
//!
//! Reports only ever see a fitted classifier through [`Classifier`]: the
//! class list and per-class probabilities for a batch of rows.

pub mod logistic;

pub use logistic::LogisticRegression;

use crate::dataset::Dataset;
use crate::label::Label;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EstimatorError {
    #[error("estimator is not fitted")]
    NotFitted,

    #[error("need at least 2 classes to fit, got {0}")]
    TooFewClasses(usize),

    #[error("expected {expected} features, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("invalid hyper-parameter: {0}")]
    InvalidParam(String),
}

/// A probabilistic classifier.
pub trait Classifier: Send + Sync {
    /// Human-readable estimator name (type name, not the report name).
    fn name(&self) -> &str;

    fn fit(&mut self, data: &Dataset) -> Result<(), EstimatorError>;

    fn is_fitted(&self) -> bool;

    /// Sorted class labels seen during `fit`. Empty before fitting.
    fn classes(&self) -> &[Label];

    /// One row per sample, one column per class in `classes()` order.
    fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, EstimatorError>;
}

impl std::fmt::Debug for dyn Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("name", &self.name())
            .field("fitted", &self.is_fitted())
            .finish()
    }
}
