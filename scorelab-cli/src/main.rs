//! ScoreLab CLI - run ROC comparison experiments from TOML configs.
//!
//! Commands:
//! - `run` - fit every configured estimator, print the AUC summary and save artifacts
//! - `frame` - print the display frame as CSV
//! - `auc` - print the ROC AUC table as CSV
//!
//! Logs go to stderr; set `RUST_LOG` to change the level (default `warn`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use scorelab_runner::{
    export_artifacts, frame_to_csv, run_experiment, ExperimentConfig, ExperimentResult,
};

#[derive(Parser)]
#[command(
    name = "scorelab",
    about = "ScoreLab CLI - ROC curve comparison of binary and multiclass classifiers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an experiment and save its artifacts.
    Run {
        /// Path to a TOML experiment config.
        #[arg(long)]
        config: PathBuf,

        /// Output directory; artifacts land in a per-experiment subdirectory.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Print the display frame (estimator, label, threshold, fpr, tpr) as CSV.
    Frame {
        /// Path to a TOML experiment config.
        #[arg(long)]
        config: PathBuf,

        /// Add the roc_auc column.
        #[arg(long, default_value_t = false)]
        with_roc_auc: bool,
    },
    /// Print the ROC AUC table as CSV.
    Auc {
        /// Path to a TOML experiment config.
        #[arg(long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { config, output_dir } => run_cmd(&config, &output_dir),
        Commands::Frame {
            config,
            with_roc_auc,
        } => frame_cmd(&config, with_roc_auc),
        Commands::Auc { config } => auc_cmd(&config),
    }
}

fn load_and_run(config_path: &Path) -> Result<ExperimentResult> {
    let config = ExperimentConfig::from_file(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    debug!(estimators = config.estimators.len(), "config loaded");
    run_experiment(&config).context("experiment failed")
}

fn run_cmd(config_path: &Path, output_dir: &Path) -> Result<()> {
    let result = load_and_run(config_path)?;
    print_summary(&result)?;

    let run_dir = output_dir.join(short_id(&result.experiment_id));
    let paths = export_artifacts(&run_dir, &result)?;
    println!("Artifacts saved to: {}", run_dir.display());
    debug!(manifest = %paths.manifest.display(), "export complete");
    Ok(())
}

fn frame_cmd(config_path: &Path, with_roc_auc: bool) -> Result<()> {
    let result = load_and_run(config_path)?;
    let frame = result
        .display
        .frame(with_roc_auc)
        .context("failed to build frame")?;
    print!("{}", frame_to_csv(&frame)?);
    Ok(())
}

fn auc_cmd(config_path: &Path) -> Result<()> {
    let result = load_and_run(config_path)?;
    print!("{}", frame_to_csv(result.display.roc_auc())?);
    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..12).unwrap_or(id)
}

fn print_summary(result: &ExperimentResult) -> Result<()> {
    let display = &result.display;
    println!("=== ROC comparison {} ===", short_id(&result.experiment_id));
    println!(
        "Data: {} split, {} train / {} test rows",
        display.data_source(),
        result.n_train,
        result.n_test
    );
    if let Some(pos_label) = display.pos_label() {
        println!("Positive label: {pos_label}");
    }
    println!();
    println!("{:<24} {:<16} {:>8}", "Estimator", "Label", "ROC AUC");
    for entry in result.auc_summary()? {
        println!(
            "{:<24} {:<16} {:>8.4}",
            entry.estimator_name, entry.label, entry.roc_auc
        );
    }
    println!();
    println!("Duration: {:.2}s", result.duration_secs);
    Ok(())
}
