//! ScoreLab Core: classifier evaluation reports and their ROC displays.
//!
//! This crate contains:
//! - Datasets, synthetic data generation and stratified splitting
//! - A probabilistic classifier trait with a logistic regression model
//! - ROC curve and AUC metrics
//! - Estimator and comparison reports
//! - The ROC curve display (tables, frame and a backend-free chart model)

pub mod dataset;
pub mod display;
pub mod estimator;
pub mod label;
pub mod metrics;
pub mod plot;
pub mod report;

pub use dataset::Dataset;
pub use display::{CurveStyles, DisplayError, PlotOptions, RocCurveDisplay};
pub use estimator::{Classifier, LogisticRegression};
pub use label::Label;
pub use report::{ComparisonReport, DataSource, EstimatorReport, ReportError, RocOptions};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: reports and displays can move to worker threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Dataset>();
        require_sync::<Dataset>();
        require_send::<EstimatorReport>();
        require_sync::<EstimatorReport>();
        require_send::<ComparisonReport>();
        require_sync::<ComparisonReport>();
        require_send::<RocCurveDisplay>();
        require_sync::<RocCurveDisplay>();
        require_send::<plot::Axes>();
        require_sync::<plot::Axes>();
    }
}
