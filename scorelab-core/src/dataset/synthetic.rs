//! Seeded synthetic classification data (Gaussian blobs).

use super::{Dataset, DatasetError};
use crate::label::Label;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Parameters for [`make_classification`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSpec {
    pub n_samples: usize,
    pub n_features: usize,
    pub n_classes: usize,
    /// Half-width of the box class centers are drawn from. Larger is easier.
    #[serde(default = "default_class_sep")]
    pub class_sep: f64,
    #[serde(default)]
    pub seed: u64,
}

fn default_class_sep() -> f64 {
    1.5
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            n_samples: 200,
            n_features: 4,
            n_classes: 2,
            class_sep: default_class_sep(),
            seed: 0,
        }
    }
}

/// Generate a balanced dataset with classes labelled `0..n_classes`.
///
/// Each class gets a center drawn uniformly from `[-class_sep, class_sep]^d`;
/// samples are the center plus unit Gaussian noise. Row `i` belongs to
/// class `i % n_classes`, so every class has `n_samples / n_classes` rows
/// (±1).
pub fn make_classification(spec: &SyntheticSpec) -> Result<Dataset, DatasetError> {
    if spec.n_classes < 2 {
        return Err(DatasetError::InvalidSpec("n_classes must be >= 2".into()));
    }
    if spec.n_features == 0 {
        return Err(DatasetError::InvalidSpec("n_features must be >= 1".into()));
    }
    if spec.n_samples < 2 * spec.n_classes {
        return Err(DatasetError::InvalidSpec(format!(
            "n_samples must be at least 2 per class ({} < {})",
            spec.n_samples,
            2 * spec.n_classes
        )));
    }
    if !(spec.class_sep.is_finite() && spec.class_sep > 0.0) {
        return Err(DatasetError::InvalidSpec("class_sep must be positive".into()));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let centers: Vec<Vec<f64>> = (0..spec.n_classes)
        .map(|_| {
            (0..spec.n_features)
                .map(|_| rng.gen_range(-spec.class_sep..=spec.class_sep))
                .collect()
        })
        .collect();

    let mut features = Vec::with_capacity(spec.n_samples);
    let mut targets = Vec::with_capacity(spec.n_samples);
    for i in 0..spec.n_samples {
        let class = i % spec.n_classes;
        let row = centers[class]
            .iter()
            .map(|c| c + standard_normal(&mut rng))
            .collect();
        features.push(row);
        targets.push(Label::Int(class as i64));
    }

    Dataset::new(features, targets)
}

/// Box-Muller transform over two uniform draws.
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_data() {
        let spec = SyntheticSpec {
            seed: 7,
            ..SyntheticSpec::default()
        };
        let a = make_classification(&spec).unwrap();
        let b = make_classification(&spec).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn classes_are_balanced() {
        let spec = SyntheticSpec {
            n_samples: 90,
            n_classes: 3,
            ..SyntheticSpec::default()
        };
        let data = make_classification(&spec).unwrap();
        assert_eq!(data.n_samples(), 90);
        assert_eq!(data.n_features(), 4);
        assert_eq!(data.classes(), vec![Label::Int(0), Label::Int(1), Label::Int(2)]);
        for class in data.classes() {
            let count = data.targets().iter().filter(|t| **t == class).count();
            assert_eq!(count, 30);
        }
    }

    #[test]
    fn rejects_degenerate_specs() {
        let one_class = SyntheticSpec {
            n_classes: 1,
            ..SyntheticSpec::default()
        };
        assert!(make_classification(&one_class).is_err());

        let too_few = SyntheticSpec {
            n_samples: 3,
            n_classes: 2,
            ..SyntheticSpec::default()
        };
        assert!(make_classification(&too_few).is_err());
    }
}
