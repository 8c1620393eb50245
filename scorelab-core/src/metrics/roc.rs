//! Receiver operating characteristic.
//!
//! `roc_curve` sweeps the decision threshold over every distinct score,
//! highest first. The curve starts at `(0, 0)` with threshold `+inf` and
//! ends at `(1, 1)`.

use super::MetricError;
use crate::label::Label;
use std::cmp::Ordering;

/// Points of an ROC curve, in threshold-descending order.
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    pub fn len(&self) -> usize {
        self.fpr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fpr.is_empty()
    }

    /// Area under this curve.
    pub fn auc(&self) -> Result<f64, MetricError> {
        auc(&self.fpr, &self.tpr)
    }
}

/// Compute the ROC curve of `y_score` against boolean ground truth.
///
/// With `drop_intermediate`, points that lie on a straight segment between
/// their neighbours are removed; the area is unchanged.
pub fn roc_curve(
    y_true: &[bool],
    y_score: &[f64],
    drop_intermediate: bool,
) -> Result<RocCurve, MetricError> {
    if y_true.is_empty() {
        return Err(MetricError::Empty);
    }
    if y_true.len() != y_score.len() {
        return Err(MetricError::LengthMismatch {
            y_true: y_true.len(),
            y_score: y_score.len(),
        });
    }
    if let Some(i) = y_score.iter().position(|s| !s.is_finite()) {
        return Err(MetricError::NonFiniteScore(i));
    }

    let mut order: Vec<usize> = (0..y_score.len()).collect();
    order.sort_by(|&a, &b| {
        y_score[b]
            .partial_cmp(&y_score[a])
            .unwrap_or(Ordering::Equal)
    });

    // Cumulative true/false positives at the last index of each distinct score.
    let mut tps = Vec::new();
    let mut fps = Vec::new();
    let mut thresholds = Vec::new();
    let (mut tp, mut fp) = (0usize, 0usize);
    for (pos, &idx) in order.iter().enumerate() {
        if y_true[idx] {
            tp += 1;
        } else {
            fp += 1;
        }
        let is_last_of_group = order
            .get(pos + 1)
            .map_or(true, |&next| y_score[next] != y_score[idx]);
        if is_last_of_group {
            tps.push(tp as f64);
            fps.push(fp as f64);
            thresholds.push(y_score[idx]);
        }
    }

    if tp == 0 || fp == 0 {
        return Err(MetricError::SingleClass);
    }

    if drop_intermediate && fps.len() > 2 {
        let keep: Vec<bool> = (0..fps.len())
            .map(|i| {
                if i == 0 || i == fps.len() - 1 {
                    return true;
                }
                let second_diff = |v: &[f64]| v[i + 1] - 2.0 * v[i] + v[i - 1];
                second_diff(&fps) != 0.0 || second_diff(&tps) != 0.0
            })
            .collect();
        let filter = |v: Vec<f64>| -> Vec<f64> {
            v.into_iter()
                .zip(&keep)
                .filter_map(|(x, &k)| k.then_some(x))
                .collect()
        };
        tps = filter(tps);
        fps = filter(fps);
        thresholds = filter(thresholds);
    }

    let total_pos = tp as f64;
    let total_neg = fp as f64;
    let mut fpr = Vec::with_capacity(fps.len() + 1);
    let mut tpr = Vec::with_capacity(tps.len() + 1);
    let mut thr = Vec::with_capacity(thresholds.len() + 1);
    fpr.push(0.0);
    tpr.push(0.0);
    thr.push(f64::INFINITY);
    fpr.extend(fps.iter().map(|f| f / total_neg));
    tpr.extend(tps.iter().map(|t| t / total_pos));
    thr.extend(thresholds);

    Ok(RocCurve {
        fpr,
        tpr,
        thresholds: thr,
    })
}

/// Trapezoidal area under `(x, y)`. `x` must be monotonic; a decreasing `x`
/// yields the same positive area as its reversal.
pub fn auc(x: &[f64], y: &[f64]) -> Result<f64, MetricError> {
    if x.len() != y.len() {
        return Err(MetricError::LengthMismatch {
            y_true: x.len(),
            y_score: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(MetricError::TooFewPoints(x.len()));
    }

    let increasing = x.windows(2).all(|w| w[1] >= w[0]);
    let decreasing = x.windows(2).all(|w| w[1] <= w[0]);
    let direction = match (increasing, decreasing) {
        (true, _) => 1.0,
        (false, true) => -1.0,
        (false, false) => return Err(MetricError::NonMonotonic),
    };

    let area: f64 = x
        .windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum();
    Ok(direction * area)
}

/// Area under the ROC curve of `y_score` against `y_true`.
pub fn roc_auc_score(y_true: &[bool], y_score: &[f64]) -> Result<f64, MetricError> {
    roc_curve(y_true, y_score, false)?.auc()
}

/// One-vs-rest ground truth and scores for `class`.
///
/// `proba` holds one row per sample and one column per entry of `classes`.
pub fn one_vs_rest(
    targets: &[Label],
    proba: &[Vec<f64>],
    classes: &[Label],
    class: &Label,
) -> Option<(Vec<bool>, Vec<f64>)> {
    let column = classes.iter().position(|c| c == class)?;
    let y_true = targets.iter().map(|t| t == class).collect();
    let y_score = proba.iter().map(|row| row[column]).collect();
    Some((y_true, y_score))
}
