//! Serializable experiment configuration.
//!
//! An experiment is one dataset, one train/test split and a list of named
//! estimators to compare:
//!
//! ```toml
//! test_size = 0.25
//! seed = 7
//!
//! [dataset]
//! type = "SYNTHETIC"
//! n_samples = 300
//! n_features = 4
//! n_classes = 2
//!
//! [[estimators]]
//! type = "LOGISTIC_REGRESSION"
//! name = "estimator_1"
//!
//! [[estimators]]
//! type = "LOGISTIC_REGRESSION"
//! name = "estimator_2"
//! c = 10.0
//!
//! [plot]
//! roc_curve_kwargs = [{ color = "red" }, { color = "blue" }]
//! ```

use scorelab_core::dataset::SyntheticSpec;
use scorelab_core::report::DataSource;
use scorelab_core::{Label, LogisticRegression, PlotOptions, RocOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unique identifier for an experiment (content-addressable hash).
pub type ExperimentId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Everything needed to reproduce one comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentConfig {
    pub dataset: DatasetConfig,

    /// Fraction of rows held out for testing.
    #[serde(default = "default_test_size")]
    pub test_size: f64,

    /// Seed of the train/test split.
    #[serde(default)]
    pub seed: u64,

    pub estimators: Vec<EstimatorConfig>,

    #[serde(default)]
    pub plot: PlotConfig,
}

fn default_test_size() -> f64 {
    0.25
}

/// Where the data comes from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatasetConfig {
    /// Seeded Gaussian blobs.
    Synthetic(SyntheticSpec),

    /// Headed CSV file: every column except `target` is a numeric feature.
    /// Relative paths resolve against the config file's directory.
    Csv { path: PathBuf, target: String },
}

/// One estimator to fit and compare.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstimatorConfig {
    LogisticRegression {
        name: String,
        #[serde(default = "default_c")]
        c: f64,
        #[serde(default = "default_max_iter")]
        max_iter: usize,
        #[serde(default = "default_learning_rate")]
        learning_rate: f64,
    },
}

fn default_c() -> f64 {
    1.0
}

fn default_max_iter() -> usize {
    500
}

fn default_learning_rate() -> f64 {
    0.5
}

impl EstimatorConfig {
    /// Report name of this estimator.
    pub fn name(&self) -> &str {
        match self {
            EstimatorConfig::LogisticRegression { name, .. } => name,
        }
    }

    /// Unfitted model with the configured hyper-parameters.
    pub fn build(&self) -> LogisticRegression {
        match self {
            EstimatorConfig::LogisticRegression {
                c,
                max_iter,
                learning_rate,
                ..
            } => LogisticRegression::new()
                .with_c(*c)
                .with_max_iter(*max_iter)
                .with_learning_rate(*learning_rate),
        }
    }
}

/// How the ROC display is computed and drawn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotConfig {
    #[serde(default)]
    pub data_source: DataSource,

    /// Binary only; defaults to the second class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_label: Option<Label>,

    /// A style table broadcast to every curve, or one table per curve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roc_curve_kwargs: Option<serde_json::Value>,

    #[serde(default = "default_true")]
    pub plot_chance_level: bool,

    #[serde(default = "default_true")]
    pub despine: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            data_source: DataSource::Test,
            pos_label: None,
            roc_curve_kwargs: None,
            plot_chance_level: true,
            despine: true,
        }
    }
}

impl PlotConfig {
    pub fn roc_options(&self) -> RocOptions {
        RocOptions {
            data_source: self.data_source,
            pos_label: self.pos_label.clone(),
        }
    }

    /// Plot options without the curve overrides, which need the curve count
    /// and are resolved by the display.
    pub fn plot_options(&self) -> PlotOptions {
        PlotOptions {
            roc_curve_kwargs: None,
            plot_chance_level: self.plot_chance_level,
            chance_level_kwargs: None,
            despine: self.despine,
        }
    }
}

impl ExperimentConfig {
    /// Read, parse and validate a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&raw)?;
        if let DatasetConfig::Csv { path: csv_path, .. } = &mut config.dataset {
            if csv_path.is_relative() {
                if let Some(dir) = path.parent() {
                    *csv_path = dir.join(&*csv_path);
                }
            }
        }
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        if self.estimators.is_empty() {
            return Err(ConfigError::Invalid("at least one estimator is required".into()));
        }

        let mut names = HashSet::new();
        for estimator in &self.estimators {
            let name = estimator.name();
            if name.is_empty() {
                return Err(ConfigError::Invalid("estimator names must not be empty".into()));
            }
            if !names.insert(name) {
                return Err(ConfigError::Invalid(format!("duplicate estimator name '{name}'")));
            }
            let EstimatorConfig::LogisticRegression {
                c,
                max_iter,
                learning_rate,
                ..
            } = estimator;
            if !(c.is_finite() && *c > 0.0) {
                return Err(ConfigError::Invalid(format!("{name}: c must be positive")));
            }
            if *max_iter == 0 {
                return Err(ConfigError::Invalid(format!("{name}: max_iter must be >= 1")));
            }
            if !(learning_rate.is_finite() && *learning_rate > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name}: learning_rate must be positive"
                )));
            }
        }

        if let DatasetConfig::Csv { target, .. } = &self.dataset {
            if target.is_empty() {
                return Err(ConfigError::Invalid("csv target column must be named".into()));
            }
        }
        Ok(())
    }

    /// Deterministic hash of the whole config.
    ///
    /// Two experiments with identical configs share an id.
    pub fn experiment_id(&self) -> Result<ExperimentId, ConfigError> {
        let json = serde_json::to_string(self)?;
        Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
    }
}
