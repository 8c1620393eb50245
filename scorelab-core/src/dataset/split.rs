//! Stratified train/test split.

use super::{Dataset, DatasetError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Split `data` into `(train, test)`, stratified by class.
///
/// Each class contributes `round(count * test_size)` rows to the test side,
/// clamped to `[1, count - 1]`, so both sides see every class. Rows keep
/// their original relative order within each side.
pub fn train_test_split(
    data: &Dataset,
    test_size: f64,
    seed: u64,
) -> Result<(Dataset, Dataset), DatasetError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(DatasetError::InvalidSplit(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train_rows = Vec::new();
    let mut test_rows = Vec::new();

    for class in data.classes() {
        let mut rows: Vec<usize> = data
            .targets()
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == class)
            .map(|(i, _)| i)
            .collect();
        if rows.len() < 2 {
            return Err(DatasetError::InvalidSplit(format!(
                "class {class} has {} sample(s); need at least 2",
                rows.len()
            )));
        }
        rows.shuffle(&mut rng);
        let n_test = ((rows.len() as f64 * test_size).round() as usize).clamp(1, rows.len() - 1);
        test_rows.extend_from_slice(&rows[..n_test]);
        train_rows.extend_from_slice(&rows[n_test..]);
    }

    train_rows.sort_unstable();
    test_rows.sort_unstable();
    Ok((data.select(&train_rows)?, data.select(&test_rows)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{make_classification, SyntheticSpec};

    #[test]
    fn both_sides_see_every_class() {
        let data = make_classification(&SyntheticSpec {
            n_samples: 60,
            n_classes: 3,
            ..SyntheticSpec::default()
        })
        .unwrap();
        let (train, test) = train_test_split(&data, 0.25, 1).unwrap();
        assert_eq!(train.n_samples() + test.n_samples(), 60);
        assert_eq!(test.n_samples(), 15);
        assert_eq!(train.classes(), data.classes());
        assert_eq!(test.classes(), data.classes());
    }

    #[test]
    fn split_is_deterministic() {
        let data = make_classification(&SyntheticSpec::default()).unwrap();
        let (_, a) = train_test_split(&data, 0.3, 42).unwrap();
        let (_, b) = train_test_split(&data, 0.3, 42).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn rejects_out_of_range_test_size() {
        let data = make_classification(&SyntheticSpec::default()).unwrap();
        assert!(train_test_split(&data, 0.0, 0).is_err());
        assert!(train_test_split(&data, 1.0, 0).is_err());
    }
}
