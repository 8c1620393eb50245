//! ScoreLab Runner: experiment orchestration on top of `scorelab-core`.
//!
//! This crate provides:
//! - TOML experiment configs with content-addressed ids
//! - Dataset loading from CSV or synthetic generation
//! - Parallel fitting of the configured estimators into a comparison report
//! - Artifact export (CSV, Parquet, chart model, JSON manifest)

pub mod config;
pub mod data_loader;
pub mod export;
pub mod runner;

pub use config::{ConfigError, DatasetConfig, EstimatorConfig, ExperimentConfig, PlotConfig};
pub use data_loader::{load_dataset, DataOrigin, LoadError, LoadedData};
pub use export::{
    build_manifest, export_artifacts, frame_to_csv, read_manifest, ArtifactPaths, RunManifest,
};
pub use runner::{run_experiment, run_experiment_on, AucEntry, ExperimentResult, RunError};
