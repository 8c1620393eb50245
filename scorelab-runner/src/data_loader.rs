//! Dataset loading for the runner.
//!
//! A dataset is either generated from a [`SyntheticSpec`] or read from a
//! headed CSV file. CSV rows whose features do not parse as finite numbers
//! are dropped with a warning; a file with no usable rows is an error.
//!
//! [`SyntheticSpec`]: scorelab_core::dataset::SyntheticSpec

use crate::config::DatasetConfig;
use scorelab_core::dataset::{make_classification, DatasetError};
use scorelab_core::{Dataset, Label};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read csv '{path}': {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("target column '{column}' not found in '{path}'")]
    MissingTarget { column: String, path: PathBuf },

    #[error("'{0}' has no feature columns")]
    NoFeatures(PathBuf),

    #[error("'{0}' has no usable rows")]
    NoUsableRows(PathBuf),

    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

/// Where a loaded dataset came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataOrigin {
    Synthetic { seed: u64 },
    Csv { path: PathBuf, dropped_rows: usize },
    /// Handed over by the caller, not read from config.
    InMemory,
}

/// A loaded dataset with its provenance.
#[derive(Debug)]
pub struct LoadedData {
    pub dataset: Dataset,
    /// Feature column names, in column order.
    pub feature_names: Vec<String>,
    pub origin: DataOrigin,
    /// BLAKE3 digest of the dataset contents.
    pub dataset_hash: String,
}

impl LoadedData {
    /// Wrap a dataset built by the caller. Features are named `x0`, `x1`, ...
    pub fn in_memory(dataset: Dataset) -> Self {
        Self {
            feature_names: (0..dataset.n_features()).map(|i| format!("x{i}")).collect(),
            dataset_hash: dataset.fingerprint(),
            origin: DataOrigin::InMemory,
            dataset,
        }
    }
}

pub fn load_dataset(config: &DatasetConfig) -> Result<LoadedData, LoadError> {
    let loaded = match config {
        DatasetConfig::Synthetic(spec) => {
            let dataset = make_classification(spec)?;
            let feature_names = (0..spec.n_features).map(|i| format!("x{i}")).collect();
            LoadedData {
                dataset_hash: dataset.fingerprint(),
                dataset,
                feature_names,
                origin: DataOrigin::Synthetic { seed: spec.seed },
            }
        }
        DatasetConfig::Csv { path, target } => load_csv(path, target)?,
    };
    info!(
        rows = loaded.dataset.n_samples(),
        features = loaded.dataset.n_features(),
        classes = loaded.dataset.classes().len(),
        "loaded dataset"
    );
    Ok(loaded)
}

fn load_csv(path: &Path, target: &str) -> Result<LoadedData, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    let target_idx = headers
        .iter()
        .position(|h| h == target)
        .ok_or_else(|| LoadError::MissingTarget {
            column: target.to_string(),
            path: path.to_path_buf(),
        })?;
    let feature_names: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != target_idx)
        .map(|(_, h)| h.to_string())
        .collect();
    if feature_names.is_empty() {
        return Err(LoadError::NoFeatures(path.to_path_buf()));
    }

    let mut features = Vec::new();
    let mut targets = Vec::new();
    let mut dropped_rows = 0usize;
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        match parse_row(&record, target_idx) {
            Some((row, label)) => {
                features.push(row);
                targets.push(label);
            }
            None => {
                dropped_rows += 1;
                warn!(path = %path.display(), row = line + 1, "dropping unparseable csv row");
            }
        }
    }
    if features.is_empty() {
        return Err(LoadError::NoUsableRows(path.to_path_buf()));
    }

    let dataset = Dataset::new(features, targets)?;
    Ok(LoadedData {
        dataset_hash: dataset.fingerprint(),
        dataset,
        feature_names,
        origin: DataOrigin::Csv {
            path: path.to_path_buf(),
            dropped_rows,
        },
    })
}

/// Features and label of one record, or `None` if any field is unusable.
fn parse_row(record: &csv::StringRecord, target_idx: usize) -> Option<(Vec<f64>, Label)> {
    let raw_target = record.get(target_idx)?;
    if raw_target.is_empty() {
        return None;
    }
    let mut row = Vec::with_capacity(record.len().saturating_sub(1));
    for (i, field) in record.iter().enumerate() {
        if i == target_idx {
            continue;
        }
        let value: f64 = field.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        row.push(value);
    }
    Some((row, Label::parse(raw_target)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorelab_core::dataset::SyntheticSpec;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn synthetic_dataset_has_named_features() {
        let loaded = load_dataset(&DatasetConfig::Synthetic(SyntheticSpec::default())).unwrap();
        assert_eq!(loaded.dataset.n_samples(), 200);
        assert_eq!(loaded.feature_names, vec!["x0", "x1", "x2", "x3"]);
        assert_eq!(loaded.origin, DataOrigin::Synthetic { seed: 0 });
        assert_eq!(loaded.dataset_hash, loaded.dataset.fingerprint());
    }

    #[test]
    fn csv_target_can_be_any_column() {
        let file = write_csv(
            "sepal, species, petal\n\
             5.1, setosa, 1.4\n\
             7.0, versicolor, 4.7\n\
             6.3, virginica, 6.0\n",
        );
        let config = DatasetConfig::Csv {
            path: file.path().to_path_buf(),
            target: "species".into(),
        };
        let loaded = load_dataset(&config).unwrap();
        assert_eq!(loaded.feature_names, vec!["sepal", "petal"]);
        assert_eq!(loaded.dataset.features()[1], vec![7.0, 4.7]);
        assert_eq!(loaded.dataset.targets()[2], Label::Text("virginica".into()));
    }

    #[test]
    fn integer_targets_parse_as_integers() {
        let file = write_csv("a,b,y\n0.1,0.2,0\n0.3,0.4,1\n");
        let config = DatasetConfig::Csv {
            path: file.path().to_path_buf(),
            target: "y".into(),
        };
        let loaded = load_dataset(&config).unwrap();
        assert_eq!(loaded.dataset.classes(), vec![Label::Int(0), Label::Int(1)]);
    }

    #[test]
    fn bad_rows_are_dropped() {
        let file = write_csv("a,y\n0.1,0\nnot-a-number,1\ninf,1\n0.4,\n0.5,1\n");
        let config = DatasetConfig::Csv {
            path: file.path().to_path_buf(),
            target: "y".into(),
        };
        let loaded = load_dataset(&config).unwrap();
        assert_eq!(loaded.dataset.n_samples(), 2);
        assert!(matches!(
            loaded.origin,
            DataOrigin::Csv { dropped_rows: 3, .. }
        ));
    }

    #[test]
    fn in_memory_data_is_fingerprinted_once() {
        let dataset = make_classification(&SyntheticSpec::default()).unwrap();
        let hash = dataset.fingerprint();
        let loaded = LoadedData::in_memory(dataset);
        assert_eq!(loaded.dataset_hash, hash);
        assert_eq!(loaded.origin, DataOrigin::InMemory);
        assert_eq!(loaded.feature_names.len(), 4);
    }

    #[test]
    fn origin_is_tagged_in_json() {
        let origin = DataOrigin::Csv {
            path: PathBuf::from("iris.csv"),
            dropped_rows: 2,
        };
        let json = serde_json::to_value(&origin).unwrap();
        assert_eq!(json["type"], "CSV");
        assert_eq!(json["dropped_rows"], 2);
        let back: DataOrigin = serde_json::from_value(json).unwrap();
        assert_eq!(back, origin);
    }

    #[test]
    fn missing_target_column() {
        let file = write_csv("a,b\n1,2\n");
        let config = DatasetConfig::Csv {
            path: file.path().to_path_buf(),
            target: "y".into(),
        };
        assert!(matches!(
            load_dataset(&config),
            Err(LoadError::MissingTarget { .. })
        ));
    }

    #[test]
    fn only_target_column_has_no_features() {
        let file = write_csv("y\n1\n0\n");
        let config = DatasetConfig::Csv {
            path: file.path().to_path_buf(),
            target: "y".into(),
        };
        assert!(matches!(load_dataset(&config), Err(LoadError::NoFeatures(_))));
    }
}
