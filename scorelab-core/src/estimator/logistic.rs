//! Multinomial logistic regression trained by batch gradient descent.

use super::{Classifier, EstimatorError};
use crate::dataset::Dataset;
use crate::label::Label;

/// L2-regularized softmax regression.
///
/// `c` is the inverse regularization strength: the penalty added to the mean
/// cross-entropy is `||W||² / (2 · c · n)`. Features are standardized
/// internally with the training mean and standard deviation.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    c: f64,
    max_iter: usize,
    learning_rate: f64,
    tol: f64,
    state: Option<FittedState>,
}

#[derive(Debug, Clone)]
struct FittedState {
    classes: Vec<Label>,
    /// `classes.len()` rows of `n_features` weights.
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
    mean: Vec<f64>,
    scale: Vec<f64>,
    n_iter: usize,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 500,
            learning_rate: 0.5,
            tol: 1e-6,
            state: None,
        }
    }
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inverse regularization strength. Drops any fitted state.
    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self.state = None;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self.state = None;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self.state = None;
        self
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    /// Gradient steps taken by the last `fit`.
    pub fn n_iter(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.n_iter)
    }

    fn validate_params(&self) -> Result<(), EstimatorError> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(EstimatorError::InvalidParam(format!(
                "c must be positive, got {}",
                self.c
            )));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(EstimatorError::InvalidParam(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.max_iter == 0 {
            return Err(EstimatorError::InvalidParam("max_iter must be >= 1".into()));
        }
        Ok(())
    }
}

impl Classifier for LogisticRegression {
    fn name(&self) -> &str {
        "LogisticRegression"
    }

    fn fit(&mut self, data: &Dataset) -> Result<(), EstimatorError> {
        self.validate_params()?;
        let classes = data.classes();
        if classes.len() < 2 {
            return Err(EstimatorError::TooFewClasses(classes.len()));
        }

        let n = data.n_samples();
        let d = data.n_features();
        let k = classes.len();
        let (mean, scale) = standardization(data.features(), d);
        let x: Vec<Vec<f64>> = data
            .features()
            .iter()
            .map(|row| standardize(row, &mean, &scale))
            .collect();
        let y: Vec<usize> = data
            .targets()
            .iter()
            .map(|t| classes.binary_search(t).unwrap_or(0))
            .collect();

        let mut weights = vec![vec![0.0; d]; k];
        let mut bias = vec![0.0; k];
        let penalty = 1.0 / (self.c * n as f64);
        let mut n_iter = 0;

        for _ in 0..self.max_iter {
            n_iter += 1;
            let mut grad_w = vec![vec![0.0; d]; k];
            let mut grad_b = vec![0.0; k];

            for (row, &target) in x.iter().zip(&y) {
                let probs = softmax_row(row, &weights, &bias);
                for (class, p) in probs.iter().enumerate() {
                    let g = p - if class == target { 1.0 } else { 0.0 };
                    grad_b[class] += g;
                    for (gw, xv) in grad_w[class].iter_mut().zip(row) {
                        *gw += g * xv;
                    }
                }
            }

            let mut max_grad: f64 = 0.0;
            for class in 0..k {
                grad_b[class] /= n as f64;
                max_grad = max_grad.max(grad_b[class].abs());
                bias[class] -= self.learning_rate * grad_b[class];
                for j in 0..d {
                    let g = grad_w[class][j] / n as f64 + penalty * weights[class][j];
                    max_grad = max_grad.max(g.abs());
                    weights[class][j] -= self.learning_rate * g;
                }
            }

            if max_grad < self.tol {
                break;
            }
        }

        tracing::debug!(
            estimator = self.name(),
            c = self.c,
            n_iter,
            n_samples = n,
            n_classes = k,
            "fitted classifier"
        );

        self.state = Some(FittedState {
            classes,
            weights,
            bias,
            mean,
            scale,
            n_iter,
        });
        Ok(())
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    fn classes(&self) -> &[Label] {
        match &self.state {
            Some(state) => &state.classes,
            None => &[],
        }
    }

    fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, EstimatorError> {
        let state = self.state.as_ref().ok_or(EstimatorError::NotFitted)?;
        let expected = state.mean.len();
        rows.iter()
            .map(|row| {
                if row.len() != expected {
                    return Err(EstimatorError::FeatureMismatch {
                        expected,
                        actual: row.len(),
                    });
                }
                let z = standardize(row, &state.mean, &state.scale);
                Ok(softmax_row(&z, &state.weights, &state.bias))
            })
            .collect()
    }
}

fn standardization(rows: &[Vec<f64>], d: usize) -> (Vec<f64>, Vec<f64>) {
    let n = rows.len().max(1) as f64;
    let mut mean = vec![0.0; d];
    for row in rows {
        for (m, v) in mean.iter_mut().zip(row) {
            *m += v / n;
        }
    }
    let mut var = vec![0.0; d];
    for row in rows {
        for ((s, v), m) in var.iter_mut().zip(row).zip(&mean) {
            *s += (v - m).powi(2) / n;
        }
    }
    let scale = var
        .into_iter()
        .map(|v| if v.sqrt() < 1e-12 { 1.0 } else { v.sqrt() })
        .collect();
    (mean, scale)
}

fn standardize(row: &[f64], mean: &[f64], scale: &[f64]) -> Vec<f64> {
    row.iter()
        .zip(mean)
        .zip(scale)
        .map(|((v, m), s)| (v - m) / s)
        .collect()
}

/// Numerically stable softmax of `W·x + b`.
fn softmax_row(x: &[f64], weights: &[Vec<f64>], bias: &[f64]) -> Vec<f64> {
    let logits: Vec<f64> = weights
        .iter()
        .zip(bias)
        .map(|(w, b)| w.iter().zip(x).map(|(wi, xi)| wi * xi).sum::<f64>() + b)
        .collect();
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|z| (z - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
