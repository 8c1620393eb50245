//! Experiment runner: wires together data loading, fitting and the ROC display.
//!
//! Two entry points:
//! - `run_experiment()`: loads the configured dataset, then runs. Used by the CLI and TUI.
//! - `run_experiment_on()`: takes an already loaded dataset and keeps its provenance.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use thiserror::Error;
use tracing::info;

use scorelab_core::dataset::{train_test_split, DatasetError};
use scorelab_core::display::tables::{f64_values, string_values, ESTIMATOR_NAME, LABEL, ROC_AUC};
use scorelab_core::{
    ComparisonReport, DisplayError, EstimatorReport, ReportError, RocCurveDisplay,
};

use crate::config::{ConfigError, ExperimentConfig};
use crate::data_loader::{load_dataset, DataOrigin, LoadError, LoadedData};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Load(#[from] LoadError),
    #[error("split error: {0}")]
    Split(#[from] DatasetError),
    #[error("estimator '{name}': {source}")]
    Estimator { name: String, source: ReportError },
    #[error("report error: {0}")]
    Report(#[from] ReportError),
    #[error("display error: {0}")]
    Display(#[from] DisplayError),
}

/// One AUC value of the comparison.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AucEntry {
    pub estimator_name: String,
    pub label: String,
    pub roc_auc: f64,
}

/// Complete result of one experiment.
#[derive(Debug)]
pub struct ExperimentResult {
    pub experiment_id: String,
    pub config: ExperimentConfig,
    /// Digest computed when the data was loaded.
    pub dataset_hash: String,
    pub origin: DataOrigin,
    pub feature_names: Vec<String>,
    pub n_train: usize,
    pub n_test: usize,
    pub report: ComparisonReport,
    /// Already plotted with the configured options.
    pub display: RocCurveDisplay,
    pub timestamp: DateTime<Utc>,
    pub duration_secs: f64,
}

impl ExperimentResult {
    /// Rows of the ROC AUC table, in table order.
    pub fn auc_summary(&self) -> Result<Vec<AucEntry>, RunError> {
        let table = self.display.roc_auc();
        let names = string_values(table, ESTIMATOR_NAME).map_err(DisplayError::from)?;
        let labels = string_values(table, LABEL).map_err(DisplayError::from)?;
        let aucs = f64_values(table, ROC_AUC).map_err(DisplayError::from)?;
        Ok(names
            .into_iter()
            .zip(labels)
            .zip(aucs)
            .map(|((estimator_name, label), roc_auc)| AucEntry {
                estimator_name,
                label,
                roc_auc,
            })
            .collect())
    }
}

/// Load the configured dataset and run the experiment on it.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentResult, RunError> {
    config.validate()?;
    let loaded = load_dataset(&config.dataset)?;
    run_experiment_on(config, &loaded)
}

/// Split the loaded dataset, fit every estimator in parallel, and build the plotted
/// comparison display.
pub fn run_experiment_on(
    config: &ExperimentConfig,
    loaded: &LoadedData,
) -> Result<ExperimentResult, RunError> {
    let start = Instant::now();
    let experiment_id = config.experiment_id()?;
    let (train, test) = train_test_split(&loaded.dataset, config.test_size, config.seed)?;
    info!(
        experiment = &experiment_id[..12],
        n_train = train.n_samples(),
        n_test = test.n_samples(),
        estimators = config.estimators.len(),
        "fitting estimators"
    );

    let reports = config
        .estimators
        .par_iter()
        .map(|estimator| {
            let name = estimator.name().to_string();
            match EstimatorReport::new(
                Box::new(estimator.build()),
                Some(train.clone()),
                test.clone(),
            ) {
                Ok(report) => Ok((name, report)),
                Err(source) => Err(RunError::Estimator { name, source }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let report = ComparisonReport::new(reports)?;
    let mut display = report.metrics().roc(config.plot.roc_options())?;

    let options = config.plot.plot_options();
    match &config.plot.roc_curve_kwargs {
        Some(kwargs) => display.plot_with_kwargs_value(kwargs, &options)?,
        None => display.plot(&options)?,
    }

    let duration_secs = start.elapsed().as_secs_f64();
    let n_curves = display.lines().len();
    info!(
        curves = n_curves,
        duration_secs, "experiment complete"
    );

    Ok(ExperimentResult {
        experiment_id,
        config: config.clone(),
        dataset_hash: loaded.dataset_hash.clone(),
        origin: loaded.origin.clone(),
        feature_names: loaded.feature_names.clone(),
        n_train: train.n_samples(),
        n_test: test.n_samples(),
        report,
        display,
        timestamp: Utc::now(),
        duration_secs,
    })
}
