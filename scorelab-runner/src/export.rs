//! Artifact export: CSV tables, a Parquet frame, the chart model and a JSON manifest.
//!
//! `export_artifacts` writes into `output_dir`:
//! - `roc_curve.csv`: the ROC curve table
//! - `roc_auc.csv`: the ROC AUC table
//! - `frame.parquet`: `display.frame(true)`
//! - `chart.json`: the plotted axes (lines, legend, limits)
//! - `manifest.json`: experiment id, data provenance and the AUC summary

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use polars::prelude::{DataFrame, DataType, ParquetWriter};
use serde::{Deserialize, Serialize};
use tracing::info;

use scorelab_core::report::{DataSource, MlTask};
use scorelab_core::Label;

use crate::data_loader::DataOrigin;
use crate::runner::{AucEntry, ExperimentResult};

/// Current schema version for persisted manifests.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub schema_version: u32,
    pub experiment_id: String,
    pub timestamp: DateTime<Utc>,
    pub duration_secs: f64,
    pub dataset_hash: String,
    pub data_origin: DataOrigin,
    pub feature_names: Vec<String>,
    pub n_train: usize,
    pub n_test: usize,
    pub ml_task: MlTask,
    pub data_source: DataSource,
    pub pos_label: Option<Label>,
    pub estimators: Vec<String>,
    pub roc_auc: Vec<AucEntry>,
}

/// Paths of everything `export_artifacts` wrote.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub roc_curve_csv: PathBuf,
    pub roc_auc_csv: PathBuf,
    pub frame_parquet: PathBuf,
    pub chart_json: PathBuf,
    pub manifest: PathBuf,
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Render a table as CSV with a header row. Nulls become empty fields.
pub fn frame_to_csv(df: &DataFrame) -> Result<String> {
    let columns = df
        .get_columns()
        .iter()
        .map(|col| {
            let as_text = col
                .cast(&DataType::String)
                .with_context(|| format!("failed to format column '{}'", col.name()))?;
            let values: Vec<String> = as_text
                .str()?
                .into_iter()
                .map(|v| v.unwrap_or_default().to_string())
                .collect();
            Ok(values)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(df.get_column_names().iter().map(|n| n.as_str()))?;
    for row in 0..df.height() {
        wtr.write_record(columns.iter().map(|col| col[row].as_str()))?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

fn write_csv(path: &Path, df: &DataFrame) -> Result<()> {
    let csv = frame_to_csv(df)?;
    std::fs::write(path, csv).with_context(|| format!("failed to write {}", path.display()))
}

fn write_parquet(path: &Path, df: &DataFrame) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    ParquetWriter::new(&mut file)
        .finish(&mut df.clone())
        .with_context(|| format!("failed to write parquet {}", path.display()))?;
    Ok(())
}

// ─── Manifest ───────────────────────────────────────────────────────

pub fn build_manifest(result: &ExperimentResult) -> Result<RunManifest> {
    let display = &result.display;
    Ok(RunManifest {
        schema_version: SCHEMA_VERSION,
        experiment_id: result.experiment_id.clone(),
        timestamp: result.timestamp,
        duration_secs: result.duration_secs,
        dataset_hash: result.dataset_hash.clone(),
        data_origin: result.origin.clone(),
        feature_names: result.feature_names.clone(),
        n_train: result.n_train,
        n_test: result.n_test,
        ml_task: display.ml_task(),
        data_source: display.data_source(),
        pos_label: display.pos_label().cloned(),
        estimators: display.report_names().to_vec(),
        roc_auc: result.auc_summary()?,
    })
}

/// Parse a manifest, rejecting unknown schema versions.
pub fn read_manifest(json: &str) -> Result<RunManifest> {
    let manifest: RunManifest =
        serde_json::from_str(json).context("failed to deserialize run manifest")?;
    if manifest.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            manifest.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(manifest)
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set of an experiment into `output_dir`, creating
/// it if needed. Existing files are overwritten.
pub fn export_artifacts(output_dir: &Path, result: &ExperimentResult) -> Result<ArtifactPaths> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let paths = ArtifactPaths {
        roc_curve_csv: output_dir.join("roc_curve.csv"),
        roc_auc_csv: output_dir.join("roc_auc.csv"),
        frame_parquet: output_dir.join("frame.parquet"),
        chart_json: output_dir.join("chart.json"),
        manifest: output_dir.join("manifest.json"),
    };

    let display = &result.display;
    write_csv(&paths.roc_curve_csv, display.roc_curve())?;
    write_csv(&paths.roc_auc_csv, display.roc_auc())?;
    let frame = display.frame(true).context("failed to build frame")?;
    write_parquet(&paths.frame_parquet, &frame)?;

    let ax = display
        .ax()
        .context("display has not been plotted")?;
    let chart = serde_json::to_string_pretty(ax).context("failed to serialize chart")?;
    std::fs::write(&paths.chart_json, chart)
        .with_context(|| format!("failed to write {}", paths.chart_json.display()))?;

    let manifest = build_manifest(result)?;
    let json =
        serde_json::to_string_pretty(&manifest).context("failed to serialize run manifest")?;
    std::fs::write(&paths.manifest, json)
        .with_context(|| format!("failed to write manifest to {}", paths.manifest.display()))?;

    info!(dir = %output_dir.display(), "artifacts written");
    Ok(paths)
}
