//! Property tests for config identity and CSV export.
//!
//! Uses proptest to verify:
//! 1. Experiment ids are deterministic and sensitive to the seed
//! 2. `frame_to_csv` emits one record per row plus the header

use polars::prelude::*;
use proptest::prelude::*;
use scorelab_runner::{frame_to_csv, ExperimentConfig};

fn config(seed: u64, test_size: f64) -> ExperimentConfig {
    ExperimentConfig::from_toml_str(&format!(
        r#"
        seed = {seed}
        test_size = {test_size}

        [dataset]
        type = "SYNTHETIC"
        n_samples = 100
        n_features = 2
        n_classes = 2

        [[estimators]]
        type = "LOGISTIC_REGRESSION"
        name = "lr"
        "#
    ))
    .unwrap()
}

// ── Properties ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn experiment_id_is_deterministic(seed in 0u64..10_000, pct in 10u32..50) {
        let test_size = f64::from(pct) / 100.0;
        let a = config(seed, test_size).experiment_id().unwrap();
        let b = config(seed, test_size).experiment_id().unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), 64);

        let other = config(seed + 1, test_size).experiment_id().unwrap();
        prop_assert_ne!(a, other);
    }

    #[test]
    fn csv_has_one_record_per_row(
        values in prop::collection::vec(-1e6f64..1e6, 0..40),
    ) {
        let names: Vec<String> = (0..values.len()).map(|i| format!("m{}", i % 3)).collect();
        let df = df!(
            "estimator_name" => names,
            "roc_auc" => values.clone(),
        )
        .unwrap();
        let csv = frame_to_csv(&df).unwrap();
        let mut lines = csv.lines();
        prop_assert_eq!(lines.next(), Some("estimator_name,roc_auc"));
        prop_assert_eq!(lines.count(), values.len());
    }
}
