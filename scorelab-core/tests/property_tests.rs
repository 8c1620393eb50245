//! Property tests for ROC metric and chart invariants.
//!
//! Uses proptest to verify:
//! 1. Curve shape: starts at (0, 0), ends at (1, 1), both rates non-decreasing
//! 2. Thresholds: first is +inf, the rest strictly decreasing
//! 3. AUC bounds and label flipping: AUC(flip) == 1 - AUC
//! 4. Dropping intermediate points keeps the AUC
//! 5. Legend placement: binary charts stay inside, multiclass charts switch on entry count

use proptest::prelude::*;
use scorelab_core::metrics::{auc, roc_auc_score, roc_curve};
use scorelab_core::plot::{LegendPlacement, LegendPosition, MAX_INSIDE_LEGEND_ENTRIES};
use scorelab_core::report::MlTask;

// ── Strategies (proptest) ────────────────────────────────────────────

/// Labels with at least one positive and one negative, plus scores on a
/// coarse grid so ties are common.
fn arb_labelled_scores() -> impl Strategy<Value = (Vec<bool>, Vec<f64>)> {
    (2usize..60)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(any::<bool>(), n),
                prop::collection::vec((0u32..20).prop_map(|v| f64::from(v) / 20.0), n),
            )
        })
        .prop_filter("needs both classes", |(y, _)| {
            y.iter().any(|v| *v) && y.iter().any(|v| !*v)
        })
}

// ── 1. Curve shape ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn curve_runs_from_origin_to_corner((y, s) in arb_labelled_scores(), drop in any::<bool>()) {
        let roc = roc_curve(&y, &s, drop).unwrap();
        prop_assert_eq!(roc.fpr[0], 0.0);
        prop_assert_eq!(roc.tpr[0], 0.0);
        prop_assert_eq!(*roc.fpr.last().unwrap(), 1.0);
        prop_assert_eq!(*roc.tpr.last().unwrap(), 1.0);
        for w in roc.fpr.windows(2) {
            prop_assert!(w[0] <= w[1]);
        }
        for w in roc.tpr.windows(2) {
            prop_assert!(w[0] <= w[1]);
        }
    }
}

// ── 2. Thresholds ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn thresholds_start_at_infinity_and_decrease((y, s) in arb_labelled_scores()) {
        let roc = roc_curve(&y, &s, false).unwrap();
        prop_assert_eq!(roc.thresholds[0], f64::INFINITY);
        for w in roc.thresholds[1..].windows(2) {
            prop_assert!(w[0] > w[1]);
        }
        prop_assert_eq!(roc.thresholds.len(), roc.fpr.len());
    }
}

// ── 3. AUC bounds and flipping ───────────────────────────────────────

proptest! {
    #[test]
    fn auc_is_bounded_and_flips((y, s) in arb_labelled_scores()) {
        let score = roc_auc_score(&y, &s).unwrap();
        prop_assert!((0.0..=1.0).contains(&score));

        let flipped: Vec<bool> = y.iter().map(|v| !v).collect();
        let flipped_score = roc_auc_score(&flipped, &s).unwrap();
        prop_assert!((score + flipped_score - 1.0).abs() < 1e-9);
    }
}

// ── 4. drop_intermediate keeps the area ──────────────────────────────

proptest! {
    #[test]
    fn dropping_points_keeps_area((y, s) in arb_labelled_scores()) {
        let full = roc_curve(&y, &s, false).unwrap();
        let thin = roc_curve(&y, &s, true).unwrap();
        prop_assert!(thin.len() <= full.len());
        let a = auc(&full.fpr, &full.tpr).unwrap();
        let b = auc(&thin.fpr, &thin.tpr).unwrap();
        prop_assert!((a - b).abs() < 1e-9);
    }
}

// ── 5. Legend placement ──────────────────────────────────────────────

proptest! {
    #[test]
    fn legend_goes_outside_only_when_long(n in 0usize..40) {
        let placement = LegendPlacement::for_entries(n);
        if n <= MAX_INSIDE_LEGEND_ENTRIES {
            prop_assert_eq!(placement.position, LegendPosition::Inside);
            prop_assert!(placement.bbox_to_anchor.is_none());
        } else {
            prop_assert_eq!(placement.position, LegendPosition::Outside);
            prop_assert_eq!(placement.bbox_to_anchor, Some((1.02, 1.0)));
        }
    }

    #[test]
    fn binary_legend_never_goes_outside(n in 0usize..40) {
        let binary = LegendPlacement::for_task(MlTask::BinaryClassification, n);
        prop_assert_eq!(binary.position, LegendPosition::Inside);
        let multiclass = LegendPlacement::for_task(MlTask::MulticlassClassification, n);
        prop_assert_eq!(multiclass, LegendPlacement::for_entries(n));
    }
}
