//! Ranking metrics for probabilistic classifiers.

pub mod roc;

pub use roc::{auc, one_vs_rest, roc_auc_score, roc_curve, RocCurve};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MetricError {
    #[error("empty input")]
    Empty,

    #[error("y_true has {y_true} entries but y_score has {y_score}")]
    LengthMismatch { y_true: usize, y_score: usize },

    #[error("non-finite score at index {0}")]
    NonFiniteScore(usize),

    #[error("only one class present in y_true; ROC is undefined")]
    SingleClass,

    #[error("need at least 2 points to compute an area, got {0}")]
    TooFewPoints(usize),

    #[error("x is neither increasing nor decreasing")]
    NonMonotonic,
}
