//! Tabular datasets: feature matrix plus class targets.

pub mod split;
pub mod synthetic;

pub use split::train_test_split;
pub use synthetic::{make_classification, SyntheticSpec};

use crate::label::Label;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("dataset is empty")]
    Empty,

    #[error("row {row} has {actual} features, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{rows} feature rows but {targets} targets")]
    TargetMismatch { rows: usize, targets: usize },

    #[error("non-finite feature value at row {row}, column {column}")]
    NonFinite { row: usize, column: usize },

    #[error("invalid split: {0}")]
    InvalidSplit(String),

    #[error("invalid synthetic spec: {0}")]
    InvalidSpec(String),
}

/// Row-major feature matrix with one target label per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    targets: Vec<Label>,
}

impl Dataset {
    pub fn new(features: Vec<Vec<f64>>, targets: Vec<Label>) -> Result<Self, DatasetError> {
        if features.is_empty() {
            return Err(DatasetError::Empty);
        }
        if features.len() != targets.len() {
            return Err(DatasetError::TargetMismatch {
                rows: features.len(),
                targets: targets.len(),
            });
        }
        let width = features[0].len();
        for (row, values) in features.iter().enumerate() {
            if values.len() != width {
                return Err(DatasetError::Ragged {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
            if let Some(column) = values.iter().position(|v| !v.is_finite()) {
                return Err(DatasetError::NonFinite { row, column });
            }
        }
        Ok(Self { features, targets })
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn targets(&self) -> &[Label] {
        &self.targets
    }

    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    pub fn n_features(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    /// Sorted unique target labels.
    pub fn classes(&self) -> Vec<Label> {
        let mut classes = self.targets.clone();
        classes.sort();
        classes.dedup();
        classes
    }

    /// Subset of rows, in the given order.
    pub fn select(&self, rows: &[usize]) -> Result<Self, DatasetError> {
        let features = rows.iter().map(|&i| self.features[i].clone()).collect();
        let targets = rows.iter().map(|&i| self.targets[i].clone()).collect();
        Self::new(features, targets)
    }

    /// BLAKE3 digest over features and targets.
    ///
    /// Two reports evaluated on the same held-out rows share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.n_samples() as u64).to_le_bytes());
        hasher.update(&(self.n_features() as u64).to_le_bytes());
        for row in &self.features {
            for v in row {
                hasher.update(&v.to_le_bytes());
            }
        }
        for target in &self.targets {
            match target {
                Label::Int(v) => {
                    hasher.update(b"i");
                    hasher.update(&v.to_le_bytes());
                }
                Label::Text(s) => {
                    hasher.update(b"t");
                    hasher.update(&(s.len() as u64).to_le_bytes());
                    hasher.update(s.as_bytes());
                }
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}
