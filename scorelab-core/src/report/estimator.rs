//! Report over a single fitted classifier.

use super::{resolve_labels, DataSource, MlTask, ReportError, ReportType, RocOptions};
use crate::dataset::Dataset;
use crate::display::tables::{build_tables, f64_values, CurveSource, ROC_AUC};
use crate::display::RocCurveDisplay;
use crate::estimator::Classifier;
use crate::label::Label;

/// A fitted classifier with its evaluation data and cached predictions.
#[derive(Debug)]
pub struct EstimatorReport {
    estimator: Box<dyn Classifier>,
    train_data: Option<Dataset>,
    test_data: Dataset,
    test_proba: Vec<Vec<f64>>,
    train_proba: Option<Vec<Vec<f64>>>,
}

impl EstimatorReport {
    /// Build a report, fitting the estimator on `train_data` when it is not
    /// already fitted.
    pub fn new(
        mut estimator: Box<dyn Classifier>,
        train_data: Option<Dataset>,
        test_data: Dataset,
    ) -> Result<Self, ReportError> {
        if !estimator.is_fitted() {
            let train = train_data
                .as_ref()
                .ok_or(ReportError::NotFittedWithoutTrainData)?;
            estimator.fit(train)?;
        }

        let classes = estimator.classes();
        if let Some(unknown) = test_data.targets().iter().find(|t| !classes.contains(t)) {
            return Err(ReportError::UnknownTestLabel(unknown.clone()));
        }

        let test_proba = estimator.predict_proba(test_data.features())?;
        let train_proba = match &train_data {
            Some(train) => Some(estimator.predict_proba(train.features())?),
            None => None,
        };

        tracing::debug!(
            estimator = estimator.name(),
            n_test = test_data.n_samples(),
            n_classes = classes.len(),
            "built estimator report"
        );

        Ok(Self {
            estimator,
            train_data,
            test_data,
            test_proba,
            train_proba,
        })
    }

    pub fn estimator(&self) -> &dyn Classifier {
        self.estimator.as_ref()
    }

    pub fn estimator_name(&self) -> &str {
        self.estimator.name()
    }

    pub fn classes(&self) -> &[Label] {
        self.estimator.classes()
    }

    pub fn ml_task(&self) -> MlTask {
        MlTask::from_n_classes(self.classes().len())
    }

    /// Default positive label: the second class of a binary problem.
    pub fn pos_label(&self) -> Option<&Label> {
        match self.classes() {
            [_, positive] => Some(positive),
            _ => None,
        }
    }

    pub fn test_data(&self) -> &Dataset {
        &self.test_data
    }

    pub fn train_data(&self) -> Option<&Dataset> {
        self.train_data.as_ref()
    }

    pub fn metrics(&self) -> EstimatorMetrics<'_> {
        EstimatorMetrics { report: self }
    }

    /// Targets and predicted probabilities on one split.
    pub(crate) fn predictions(
        &self,
        data_source: DataSource,
        report_name: &str,
    ) -> Result<(&[Label], &[Vec<f64>]), ReportError> {
        match data_source {
            DataSource::Test => Ok((self.test_data.targets(), &self.test_proba)),
            DataSource::Train => match (&self.train_data, &self.train_proba) {
                (Some(data), Some(proba)) => Ok((data.targets(), proba)),
                _ => Err(ReportError::MissingTrainData(report_name.to_string())),
            },
        }
    }
}

/// Metric accessor for an [`EstimatorReport`].
pub struct EstimatorMetrics<'a> {
    report: &'a EstimatorReport,
}

impl EstimatorMetrics<'_> {
    /// ROC curves of this estimator: one curve for binary tasks, one per
    /// class (one-vs-rest) otherwise.
    pub fn roc(&self, options: RocOptions) -> Result<RocCurveDisplay, ReportError> {
        let report = self.report;
        let name = report.estimator_name();
        let classes = report.classes();
        let (pos_label, labels) = resolve_labels(classes, options.pos_label.as_ref())?;
        let (targets, proba) = report.predictions(options.data_source, name)?;

        let source = CurveSource {
            name,
            targets,
            proba,
            classes,
        };
        let (roc_curve, roc_auc) = build_tables(&[source], &labels)?;

        Ok(RocCurveDisplay::from_tables(
            roc_curve,
            roc_auc,
            pos_label,
            report.ml_task(),
            options.data_source,
            ReportType::Estimator,
            vec![name.to_string()],
            labels,
        ))
    }

    /// ROC AUC per label, in the order of `display.labels()`.
    pub fn roc_auc(&self, options: RocOptions) -> Result<Vec<(Label, f64)>, ReportError> {
        let display = self.roc(options)?;
        let aucs = f64_values(display.roc_auc(), ROC_AUC)?;
        Ok(display.labels().iter().cloned().zip(aucs).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{make_classification, train_test_split, SyntheticSpec};
    use crate::estimator::LogisticRegression;
    use crate::display::PlotOptions;
    use crate::plot::LegendPosition;

    fn split(n_classes: usize) -> (Dataset, Dataset) {
        let data = make_classification(&SyntheticSpec {
            n_classes,
            ..SyntheticSpec::default()
        })
        .unwrap();
        train_test_split(&data, 0.3, 42).unwrap()
    }

    #[test]
    fn unfitted_estimator_needs_train_data() {
        let (_, test) = split(2);
        let err = EstimatorReport::new(Box::new(LogisticRegression::new()), None, test).unwrap_err();
        assert!(matches!(err, ReportError::NotFittedWithoutTrainData));
    }

    #[test]
    fn binary_roc_has_one_curve() {
        let (train, test) = split(2);
        let report =
            EstimatorReport::new(Box::new(LogisticRegression::new()), Some(train), test).unwrap();
        assert_eq!(report.ml_task(), MlTask::BinaryClassification);
        assert_eq!(report.pos_label(), Some(&Label::Int(1)));

        let mut display = report.metrics().roc(RocOptions::default()).unwrap();
        assert_eq!(display.pos_label(), Some(&Label::Int(1)));
        assert_eq!(display.report_type(), ReportType::Estimator);
        display.plot(&PlotOptions::default()).unwrap();
        assert!(display.lines()[0].label().starts_with("AUC = "));
        let legend = display.ax().unwrap().get_legend().unwrap();
        assert_eq!(legend.title, "LogisticRegression on test set");
    }

    #[test]
    fn multiclass_colors_follow_classes() {
        let (train, test) = split(3);
        let report =
            EstimatorReport::new(Box::new(LogisticRegression::new()), Some(train), test).unwrap();
        let mut display = report
            .metrics()
            .roc(RocOptions::on(DataSource::Train))
            .unwrap();
        display.plot(&PlotOptions::default()).unwrap();
        let lines = display.lines();
        assert_eq!(lines.len(), 3);
        assert_ne!(lines[0].color(), lines[1].color());
        assert!(lines[2].label().starts_with("2 (AUC = "));
        let legend = display.ax().unwrap().get_legend().unwrap();
        assert_eq!(legend.placement.position, LegendPosition::Inside);
        assert_eq!(legend.title, "LogisticRegression on train set");
    }

    #[test]
    fn train_source_without_train_data_fails() {
        let (train, test) = split(2);
        let mut model = LogisticRegression::new();
        model.fit(&train).unwrap();
        let report = EstimatorReport::new(Box::new(model), None, test).unwrap();
        assert!(matches!(
            report.metrics().roc(RocOptions::on(DataSource::Train)),
            Err(ReportError::MissingTrainData(_))
        ));
    }

    #[test]
    fn roc_auc_is_high_on_separable_data() {
        let (train, test) = split(2);
        let report =
            EstimatorReport::new(Box::new(LogisticRegression::new()), Some(train), test).unwrap();
        let aucs = report.metrics().roc_auc(RocOptions::default()).unwrap();
        assert_eq!(aucs.len(), 1);
        assert!(aucs[0].1 > 0.6);
    }
}
