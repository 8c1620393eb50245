//! Metric displays: tables plus a plotted chart model.

pub mod roc;
pub mod styles;
pub mod tables;

pub use roc::{PlotOptions, RocCurveDisplay};
pub use styles::CurveStyles;

use crate::label::Label;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error(
        "You intend to plot multiple curves. We expect `roc_curve_kwargs` to be a list \
         of styles with the same length as the number of curves ({expected}), got {got}."
    )]
    MultipleCurvesKwargs { expected: usize, got: String },

    #[error("invalid `roc_curve_kwargs`: {0}")]
    InvalidCurveKwargs(String),

    #[error("no curve for estimator '{estimator}' and label {label}")]
    MissingCurve { estimator: String, label: Label },

    #[error("table error: {0}")]
    Polars(#[from] PolarsError),
}
