//! Side-by-side comparison of estimator reports sharing one test set.

use super::{resolve_labels, EstimatorReport, MlTask, ReportError, ReportType, RocOptions};
use crate::display::tables::{build_tables, CurveSource};
use crate::display::RocCurveDisplay;
use crate::label::Label;
use std::collections::HashSet;

/// Named estimator reports evaluated on the same test data.
///
/// Report order is preserved everywhere: table rows, curve order and colors
/// all follow the order given to [`ComparisonReport::new`].
#[derive(Debug)]
pub struct ComparisonReport {
    names: Vec<String>,
    reports: Vec<EstimatorReport>,
}

impl ComparisonReport {
    pub fn new(reports: Vec<(String, EstimatorReport)>) -> Result<Self, ReportError> {
        let (first_name, first) = reports.first().ok_or(ReportError::EmptyComparison)?;

        let mut seen = HashSet::new();
        let fingerprint = first.test_data().fingerprint();
        for (name, report) in &reports {
            if !seen.insert(name.as_str()) {
                return Err(ReportError::DuplicateName(name.clone()));
            }
            if report.test_data().fingerprint() != fingerprint {
                return Err(ReportError::DifferentTestSets {
                    first: first_name.clone(),
                    other: name.clone(),
                });
            }
            if report.classes() != first.classes() {
                return Err(ReportError::DifferentClasses {
                    first: first_name.clone(),
                    other: name.clone(),
                    first_classes: first.classes().to_vec(),
                    other_classes: report.classes().to_vec(),
                });
            }
        }

        tracing::info!(reports = reports.len(), "built comparison report");
        let (names, reports) = reports.into_iter().unzip();
        Ok(Self { names, reports })
    }

    /// Report names, in comparison order.
    pub fn report_names(&self) -> &[String] {
        &self.names
    }

    pub fn reports(&self) -> &[EstimatorReport] {
        &self.reports
    }

    pub fn get(&self, name: &str) -> Option<&EstimatorReport> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.reports[i])
    }

    pub fn classes(&self) -> &[Label] {
        self.reports[0].classes()
    }

    pub fn ml_task(&self) -> MlTask {
        MlTask::from_n_classes(self.classes().len())
    }

    pub fn metrics(&self) -> ComparisonMetrics<'_> {
        ComparisonMetrics { comparison: self }
    }
}

/// Metric accessor for a [`ComparisonReport`].
pub struct ComparisonMetrics<'a> {
    comparison: &'a ComparisonReport,
}

impl ComparisonMetrics<'_> {
    /// ROC curves of every report, estimator-major.
    pub fn roc(&self, options: RocOptions) -> Result<RocCurveDisplay, ReportError> {
        let comparison = self.comparison;
        let classes = comparison.classes();
        let (pos_label, labels) = resolve_labels(classes, options.pos_label.as_ref())?;

        let sources = comparison
            .names
            .iter()
            .zip(&comparison.reports)
            .map(|(name, report)| {
                let (targets, proba) = report.predictions(options.data_source, name)?;
                Ok(CurveSource {
                    name,
                    targets,
                    proba,
                    classes,
                })
            })
            .collect::<Result<Vec<_>, ReportError>>()?;
        let (roc_curve, roc_auc) = build_tables(&sources, &labels)?;

        Ok(RocCurveDisplay::from_tables(
            roc_curve,
            roc_auc,
            pos_label,
            comparison.ml_task(),
            options.data_source,
            ReportType::ComparisonEstimator,
            comparison.names.clone(),
            labels,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{make_classification, train_test_split, Dataset, SyntheticSpec};
    use crate::estimator::LogisticRegression;
    use crate::report::DataSource;

    fn split(seed: u64) -> (Dataset, Dataset) {
        let data = make_classification(&SyntheticSpec {
            seed,
            ..SyntheticSpec::default()
        })
        .unwrap();
        train_test_split(&data, 0.25, 0).unwrap()
    }

    fn report(train: &Dataset, test: &Dataset, c: f64) -> EstimatorReport {
        EstimatorReport::new(
            Box::new(LogisticRegression::new().with_c(c)),
            Some(train.clone()),
            test.clone(),
        )
        .unwrap()
    }

    #[test]
    fn empty_comparison_is_rejected() {
        assert!(matches!(
            ComparisonReport::new(Vec::new()),
            Err(ReportError::EmptyComparison)
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let (train, test) = split(0);
        let err = ComparisonReport::new(vec![
            ("lr".into(), report(&train, &test, 1.0)),
            ("lr".into(), report(&train, &test, 10.0)),
        ])
        .unwrap_err();
        assert!(matches!(err, ReportError::DuplicateName(name) if name == "lr"));
    }

    #[test]
    fn test_sets_must_match() {
        let (train_a, test_a) = split(0);
        let (train_b, test_b) = split(1);
        let err = ComparisonReport::new(vec![
            ("a".into(), report(&train_a, &test_a, 1.0)),
            ("b".into(), report(&train_b, &test_b, 1.0)),
        ])
        .unwrap_err();
        assert!(matches!(err, ReportError::DifferentTestSets { .. }));
    }

    #[test]
    fn label_spaces_must_match() {
        let (train, test) = split(0);
        let mut features = train.features().to_vec();
        let mut targets = train.targets().to_vec();
        for row in 0..2 {
            features.push(features[row].clone());
            targets.push(Label::Int(7));
        }
        let widened = Dataset::new(features, targets).unwrap();

        let err = ComparisonReport::new(vec![
            ("a".into(), report(&train, &test, 1.0)),
            ("b".into(), report(&widened, &test, 1.0)),
        ])
        .unwrap_err();
        match err {
            ReportError::DifferentClasses {
                first,
                other,
                first_classes,
                other_classes,
            } => {
                assert_eq!((first.as_str(), other.as_str()), ("a", "b"));
                assert_eq!(first_classes, vec![Label::Int(0), Label::Int(1)]);
                assert_eq!(
                    other_classes,
                    vec![Label::Int(0), Label::Int(1), Label::Int(7)]
                );
            }
            other => panic!("expected DifferentClasses, got {other:?}"),
        }
    }

    #[test]
    fn display_keeps_report_order() {
        let (train, test) = split(0);
        let comparison = ComparisonReport::new(vec![
            ("second".into(), report(&train, &test, 1.0)),
            ("first".into(), report(&train, &test, 10.0)),
        ])
        .unwrap();
        assert!(comparison.get("first").is_some());
        assert!(comparison.get("third").is_none());

        let display = comparison.metrics().roc(RocOptions::default()).unwrap();
        assert_eq!(display.report_names(), ["second", "first"]);
        assert_eq!(display.report_type(), ReportType::ComparisonEstimator);
        assert_eq!(display.roc_auc().height(), 2);
    }

    #[test]
    fn train_source_uses_train_predictions() {
        let (train, test) = split(0);
        let comparison = ComparisonReport::new(vec![
            ("a".into(), report(&train, &test, 1.0)),
            ("b".into(), report(&train, &test, 10.0)),
        ])
        .unwrap();
        let test_display = comparison.metrics().roc(RocOptions::default()).unwrap();
        let train_display = comparison
            .metrics()
            .roc(RocOptions::on(DataSource::Train))
            .unwrap();
        assert_eq!(train_display.data_source(), DataSource::Train);
        let aucs = |d: &RocCurveDisplay| {
            crate::display::tables::f64_values(d.roc_auc(), crate::display::tables::ROC_AUC)
                .unwrap()
        };
        assert_ne!(aucs(&test_display), aucs(&train_display));
        assert_eq!(train_display.roc_auc().height(), 2);
    }
}
