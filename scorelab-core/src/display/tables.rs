//! ROC curve and ROC AUC tables.
//!
//! Both tables are long-format polars frames keyed by
//! `(estimator_name, split_index, label)`. `split_index` stays null until
//! cross-validated reports exist.

use crate::label::Label;
use crate::metrics::{one_vs_rest, roc_curve};
use crate::report::ReportError;
use polars::prelude::*;

pub const ESTIMATOR_NAME: &str = "estimator_name";
pub const SPLIT_INDEX: &str = "split_index";
pub const LABEL: &str = "label";
pub const THRESHOLD: &str = "threshold";
pub const FPR: &str = "fpr";
pub const TPR: &str = "tpr";
pub const ROC_AUC: &str = "roc_auc";

/// Predictions of one named estimator on one split.
pub(crate) struct CurveSource<'a> {
    pub name: &'a str,
    pub targets: &'a [Label],
    pub proba: &'a [Vec<f64>],
    pub classes: &'a [Label],
}

/// Compute `(roc_curve, roc_auc)` for every source and label, source-major.
pub(crate) fn build_tables(
    sources: &[CurveSource<'_>],
    labels: &[Label],
) -> Result<(DataFrame, DataFrame), ReportError> {
    let mut curve_names = Vec::new();
    let mut curve_labels = Vec::new();
    let mut thresholds = Vec::new();
    let mut fprs = Vec::new();
    let mut tprs = Vec::new();

    let mut auc_names = Vec::new();
    let mut auc_labels = Vec::new();
    let mut aucs = Vec::new();

    for source in sources {
        for label in labels {
            let (y_true, y_score) = one_vs_rest(source.targets, source.proba, source.classes, label)
                .ok_or_else(|| ReportError::InvalidPosLabel {
                    label: label.clone(),
                    classes: source.classes.to_vec(),
                })?;
            let roc = roc_curve(&y_true, &y_score, true)?;
            let auc = roc.auc()?;

            tracing::debug!(
                estimator = source.name,
                label = %label,
                points = roc.len(),
                auc,
                "computed roc curve"
            );

            let key = label.to_string();
            curve_names.extend(std::iter::repeat(source.name.to_string()).take(roc.len()));
            curve_labels.extend(std::iter::repeat(key.clone()).take(roc.len()));
            thresholds.extend(roc.thresholds);
            fprs.extend(roc.fpr);
            tprs.extend(roc.tpr);

            auc_names.push(source.name.to_string());
            auc_labels.push(key);
            aucs.push(auc);
        }
    }

    let n_curve_rows = fprs.len();
    let roc_curve = DataFrame::new(vec![
        Column::new(ESTIMATOR_NAME.into(), curve_names),
        Column::new(SPLIT_INDEX.into(), vec![None::<i64>; n_curve_rows]),
        Column::new(LABEL.into(), curve_labels),
        Column::new(THRESHOLD.into(), thresholds),
        Column::new(FPR.into(), fprs),
        Column::new(TPR.into(), tprs),
    ])?;

    let n_auc_rows = aucs.len();
    let roc_auc = DataFrame::new(vec![
        Column::new(ESTIMATOR_NAME.into(), auc_names),
        Column::new(SPLIT_INDEX.into(), vec![None::<i64>; n_auc_rows]),
        Column::new(LABEL.into(), auc_labels),
        Column::new(ROC_AUC.into(), aucs),
    ])?;

    Ok((roc_curve, roc_auc))
}

/// Values of a string column, nulls as empty strings.
pub fn string_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    Ok(df
        .column(name)?
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

/// Values of a float column, nulls as NaN.
pub fn f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    Ok(df
        .column(name)?
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source<'a>(
        name: &'a str,
        targets: &'a [Label],
        proba: &'a [Vec<f64>],
        classes: &'a [Label],
    ) -> CurveSource<'a> {
        CurveSource {
            name,
            targets,
            proba,
            classes,
        }
    }

    #[test]
    fn tables_have_one_auc_per_source_and_label() {
        let classes = vec![Label::Int(0), Label::Int(1)];
        let targets = vec![Label::Int(0), Label::Int(0), Label::Int(1), Label::Int(1)];
        let proba: Vec<Vec<f64>> = [0.1, 0.4, 0.35, 0.8]
            .iter()
            .map(|p| vec![1.0 - p, *p])
            .collect();
        let sources = [
            source("a", &targets, &proba, &classes),
            source("b", &targets, &proba, &classes),
        ];
        let (curve, auc) = build_tables(&sources, &[Label::Int(1)]).unwrap();

        assert_eq!(auc.height(), 2);
        assert_eq!(curve.height(), 10);
        assert_eq!(curve.column(SPLIT_INDEX).unwrap().null_count(), 10);
        assert_eq!(string_values(&auc, ESTIMATOR_NAME).unwrap(), vec!["a", "b"]);
        assert_eq!(string_values(&auc, LABEL).unwrap(), vec!["1", "1"]);
        for v in f64_values(&auc, ROC_AUC).unwrap() {
            assert!((v - 0.75).abs() < 1e-12);
        }
    }

    #[test]
    fn unknown_label_is_an_error() {
        let classes = vec![Label::Int(0), Label::Int(1)];
        let targets = vec![Label::Int(0), Label::Int(1)];
        let proba = vec![vec![0.9, 0.1], vec![0.2, 0.8]];
        let sources = [source("a", &targets, &proba, &classes)];
        assert!(matches!(
            build_tables(&sources, &[Label::Int(7)]),
            Err(ReportError::InvalidPosLabel { .. })
        ));
    }
}
