//! ROC curve display for one estimator or a comparison of estimators.

use super::styles::CurveStyles;
use super::tables::{
    f64_values, ESTIMATOR_NAME, FPR, LABEL, ROC_AUC, THRESHOLD, TPR,
};
use super::DisplayError;
use crate::label::Label;
use crate::plot::{
    sample_colormap, Adjustable, Aspect, Axes, Color, Colormap, DrawStyle, LegendPlacement,
    Line2D, LineHandle, LineKind, LineStyle,
};
use crate::report::{DataSource, MlTask, ReportType};
use polars::prelude::*;

pub const CHANCE_LEVEL_LABEL: &str = "Chance level (AUC = 0.5)";
const VIEW_LIMITS: (f64, f64) = (-0.01, 1.01);
const PALETTE_SIZE: usize = 10;

/// Options for [`RocCurveDisplay::plot`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub roc_curve_kwargs: Option<CurveStyles>,
    pub plot_chance_level: bool,
    pub chance_level_kwargs: Option<LineStyle>,
    /// Hide the top and right spines.
    pub despine: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            roc_curve_kwargs: None,
            plot_chance_level: true,
            chance_level_kwargs: None,
            despine: true,
        }
    }
}

impl PlotOptions {
    pub fn with_roc_curve_kwargs(mut self, styles: CurveStyles) -> Self {
        self.roc_curve_kwargs = Some(styles);
        self
    }

    pub fn with_chance_level_kwargs(mut self, style: LineStyle) -> Self {
        self.chance_level_kwargs = Some(style);
        self
    }

    pub fn without_chance_level(mut self) -> Self {
        self.plot_chance_level = false;
        self
    }
}

/// ROC curves and AUC scores, with a chart built on demand by [`plot`].
///
/// The two tables are computed once when the display is created. Each
/// `plot` call builds fresh axes and replaces the line handles.
///
/// [`plot`]: RocCurveDisplay::plot
#[derive(Debug, Clone)]
pub struct RocCurveDisplay {
    roc_curve: DataFrame,
    roc_auc: DataFrame,
    pos_label: Option<Label>,
    ml_task: MlTask,
    data_source: DataSource,
    report_type: ReportType,
    report_names: Vec<String>,
    labels: Vec<Label>,
    ax: Option<Axes>,
    lines: Vec<LineHandle>,
    chance_level: Option<LineHandle>,
}

impl RocCurveDisplay {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_tables(
        roc_curve: DataFrame,
        roc_auc: DataFrame,
        pos_label: Option<Label>,
        ml_task: MlTask,
        data_source: DataSource,
        report_type: ReportType,
        report_names: Vec<String>,
        labels: Vec<Label>,
    ) -> Self {
        Self {
            roc_curve,
            roc_auc,
            pos_label,
            ml_task,
            data_source,
            report_type,
            report_names,
            labels,
            ax: None,
            lines: Vec::new(),
            chance_level: None,
        }
    }

    pub fn roc_curve(&self) -> &DataFrame {
        &self.roc_curve
    }

    pub fn roc_auc(&self) -> &DataFrame {
        &self.roc_auc
    }

    /// Positive label; `None` for multiclass tasks.
    pub fn pos_label(&self) -> Option<&Label> {
        self.pos_label.as_ref()
    }

    pub fn ml_task(&self) -> MlTask {
        self.ml_task
    }

    pub fn data_source(&self) -> DataSource {
        self.data_source
    }

    pub fn report_type(&self) -> ReportType {
        self.report_type
    }

    /// Estimator names in canonical (report) order.
    pub fn report_names(&self) -> &[String] {
        &self.report_names
    }

    /// Labels drawn per estimator: the positive label, or every class.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Number of curves `plot` draws, excluding the chance level.
    pub fn n_curves(&self) -> usize {
        self.report_names.len() * self.labels.len()
    }

    pub fn ax(&self) -> Option<&Axes> {
        self.ax.as_ref()
    }

    /// Curve lines from the last `plot`, estimator-major, label-minor.
    pub fn lines(&self) -> Vec<&Line2D> {
        match &self.ax {
            Some(ax) => self.lines.iter().filter_map(|h| ax.line(*h)).collect(),
            None => Vec::new(),
        }
    }

    pub fn chance_level(&self) -> Option<&Line2D> {
        let ax = self.ax.as_ref()?;
        ax.line(self.chance_level?)
    }

    /// AUC of one (estimator, label) pair.
    pub fn auc(&self, estimator: &str, label: &Label) -> Result<f64, DisplayError> {
        let rows = self
            .roc_auc
            .clone()
            .lazy()
            .filter(pair_filter(estimator, label))
            .select([col(ROC_AUC)])
            .collect()?;
        f64_values(&rows, ROC_AUC)?
            .first()
            .copied()
            .ok_or_else(|| DisplayError::MissingCurve {
                estimator: estimator.to_string(),
                label: label.clone(),
            })
    }

    /// `(fpr, tpr)` of one (estimator, label) pair.
    pub fn curve(&self, estimator: &str, label: &Label) -> Result<(Vec<f64>, Vec<f64>), DisplayError> {
        let rows = self
            .roc_curve
            .clone()
            .lazy()
            .filter(pair_filter(estimator, label))
            .select([col(FPR), col(TPR)])
            .collect()?;
        if rows.height() == 0 {
            return Err(DisplayError::MissingCurve {
                estimator: estimator.to_string(),
                label: label.clone(),
            });
        }
        Ok((f64_values(&rows, FPR)?, f64_values(&rows, TPR)?))
    }

    /// Draw every curve and the chance level into fresh axes.
    pub fn plot(&mut self, options: &PlotOptions) -> Result<(), DisplayError> {
        let overrides = CurveStyles::resolve(options.roc_curve_kwargs.as_ref(), self.n_curves())?;
        let colors = sample_colormap(Colormap::Tab10, PALETTE_SIZE);

        let mut ax = Axes::new();
        let mut lines = Vec::with_capacity(self.n_curves());

        for (est_idx, name) in self.report_names.iter().enumerate() {
            for (label_idx, label) in self.labels.iter().enumerate() {
                let (fpr, tpr) = self.curve(name, label)?;
                let auc = self.auc(name, label)?;

                // Within a comparison, color identifies the estimator.
                let color_idx = match self.report_type {
                    ReportType::ComparisonEstimator => est_idx,
                    ReportType::Estimator => label_idx,
                };
                let default = LineStyle::new()
                    .color(Color::from(colors[color_idx % colors.len()]))
                    .label(self.curve_label(name, label, auc));
                let style = default.merged(&overrides[est_idx * self.labels.len() + label_idx]);
                lines.push(ax.plot(Line2D::new(fpr, tpr, &style, DrawStyle::StepsPost)));
            }
        }

        let chance_level = if options.plot_chance_level {
            let default = LineStyle::new()
                .color(Color::named("k"))
                .linestyle(LineKind::Dashed)
                .label(CHANCE_LEVEL_LABEL);
            let style = match &options.chance_level_kwargs {
                Some(over) => default.merged(over),
                None => default,
            };
            Some(ax.plot(Line2D::new(
                vec![0.0, 1.0],
                vec![0.0, 1.0],
                &style,
                DrawStyle::Default,
            )))
        } else {
            None
        };

        let (xlabel, ylabel) = match &self.pos_label {
            Some(pos) if self.ml_task.is_binary() => (
                format!("False Positive Rate\n(Positive label: {pos})"),
                format!("True Positive Rate\n(Positive label: {pos})"),
            ),
            _ => (
                "False Positive Rate".to_string(),
                "True Positive Rate".to_string(),
            ),
        };
        ax.set_xlabel(xlabel);
        ax.set_ylabel(ylabel);
        ax.set_aspect(Aspect::Equal, Adjustable::Box);
        ax.set_xlim(VIEW_LIMITS.0, VIEW_LIMITS.1);
        ax.set_ylim(VIEW_LIMITS.0, VIEW_LIMITS.1);
        ax.set_title("ROC Curve");
        if options.despine {
            ax.despine();
        }
        let ml_task = self.ml_task;
        let legend = ax.legend_with(self.legend_title(), |n| {
            LegendPlacement::for_task(ml_task, n)
        });

        tracing::debug!(
            curves = lines.len(),
            legend_entries = legend.entries.len(),
            placement = ?legend.placement.position,
            "plotted roc curves"
        );

        self.ax = Some(ax);
        self.lines = lines;
        self.chance_level = chance_level;
        Ok(())
    }

    /// Plot with overrides given as untyped JSON (an object, an array of
    /// objects, or `null`).
    pub fn plot_with_kwargs_value(
        &mut self,
        roc_curve_kwargs: &serde_json::Value,
        options: &PlotOptions,
    ) -> Result<(), DisplayError> {
        let styles = CurveStyles::from_value(roc_curve_kwargs, self.n_curves())?;
        let options = PlotOptions {
            roc_curve_kwargs: styles,
            ..options.clone()
        };
        self.plot(&options)
    }

    /// Curve points merged with their AUC.
    ///
    /// Binary tasks are keyed by `estimator_name`, multiclass tasks by
    /// `(estimator_name, label)`. Rows keep the order of the curve table.
    pub fn frame(&self, with_roc_auc: bool) -> Result<DataFrame, DisplayError> {
        let mut columns = vec![ESTIMATOR_NAME];
        if !self.ml_task.is_binary() {
            columns.push(LABEL);
        }
        columns.extend([THRESHOLD, FPR, TPR]);

        let mut merged = self.roc_curve.clone();
        if with_roc_auc {
            let names = super::tables::string_values(&self.roc_auc, ESTIMATOR_NAME)?;
            let labels = super::tables::string_values(&self.roc_auc, LABEL)?;
            let aucs = f64_values(&self.roc_auc, ROC_AUC)?;
            let lookup: std::collections::HashMap<(String, String), f64> = names
                .into_iter()
                .zip(labels)
                .zip(aucs)
                .collect();

            let row_names = super::tables::string_values(&self.roc_curve, ESTIMATOR_NAME)?;
            let row_labels = super::tables::string_values(&self.roc_curve, LABEL)?;
            let per_row: Vec<Option<f64>> = row_names
                .into_iter()
                .zip(row_labels)
                .map(|key| lookup.get(&key).copied())
                .collect();
            merged.with_column(Column::new(ROC_AUC.into(), per_row))?;
            columns.push(ROC_AUC);
        }

        Ok(merged.select(columns)?)
    }

    fn curve_label(&self, name: &str, label: &Label, auc: f64) -> String {
        match (self.report_type, self.ml_task.is_binary()) {
            (ReportType::ComparisonEstimator, true) => format!("{name} (AUC = {auc:.2})"),
            (ReportType::ComparisonEstimator, false) => {
                format!("{name} - {} (AUC = {auc:.2})", label.title_case())
            }
            (ReportType::Estimator, true) => format!("AUC = {auc:.2}"),
            (ReportType::Estimator, false) => format!("{} (AUC = {auc:.2})", label.title_case()),
        }
    }

    fn legend_title(&self) -> String {
        match self.report_type {
            ReportType::ComparisonEstimator => match self.data_source {
                DataSource::Test => "Test set".to_string(),
                DataSource::Train => "Train set".to_string(),
            },
            ReportType::Estimator => {
                let name = self.report_names.first().map_or("", String::as_str);
                format!("{name} on {} set", self.data_source)
            }
        }
    }
}

fn pair_filter(estimator: &str, label: &Label) -> Expr {
    col(ESTIMATOR_NAME)
        .eq(lit(estimator))
        .and(col(LABEL).eq(lit(label.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::tables::{build_tables, string_values, CurveSource};
    use crate::plot::{LegendPosition, Rgba, TAB10};

    fn scores(ps: &[f64]) -> Vec<Vec<f64>> {
        ps.iter().map(|p| vec![1.0 - p, *p]).collect()
    }

    fn binary_comparison() -> RocCurveDisplay {
        let classes = vec![Label::Int(0), Label::Int(1)];
        let targets = vec![Label::Int(0), Label::Int(0), Label::Int(1), Label::Int(1)];
        let good = scores(&[0.1, 0.4, 0.35, 0.8]);
        let perfect = scores(&[0.1, 0.2, 0.7, 0.9]);
        let sources = [
            CurveSource {
                name: "good",
                targets: &targets,
                proba: &good,
                classes: &classes,
            },
            CurveSource {
                name: "perfect",
                targets: &targets,
                proba: &perfect,
                classes: &classes,
            },
        ];
        let labels = vec![Label::Int(1)];
        let (curve, auc) = build_tables(&sources, &labels).unwrap();
        RocCurveDisplay::from_tables(
            curve,
            auc,
            Some(Label::Int(1)),
            MlTask::BinaryClassification,
            DataSource::Test,
            ReportType::ComparisonEstimator,
            vec!["good".into(), "perfect".into()],
            labels,
        )
    }

    #[test]
    fn plot_labels_and_colors_follow_estimators() {
        let mut display = binary_comparison();
        display.plot(&PlotOptions::default()).unwrap();

        let lines = display.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].label(), "good (AUC = 0.75)");
        assert_eq!(lines[1].label(), "perfect (AUC = 1.00)");
        let (r, g, b) = TAB10[1];
        assert_eq!(lines[1].color().to_rgba(), Some(Rgba::from_rgb8(r, g, b)));
        assert_eq!(lines[0].drawstyle, DrawStyle::StepsPost);

        let chance = display.chance_level().unwrap();
        assert_eq!(chance.label(), CHANCE_LEVEL_LABEL);
        assert_eq!(*chance.color(), "k");
        assert_eq!(chance.linestyle, LineKind::Dashed);

        let ax = display.ax().unwrap();
        assert_eq!(ax.title(), "ROC Curve");
        assert_eq!(ax.xlabel(), "False Positive Rate\n(Positive label: 1)");
        assert_eq!(ax.ylabel(), "True Positive Rate\n(Positive label: 1)");
        assert_eq!(ax.xlim(), (-0.01, 1.01));
        assert_eq!(ax.aspect(), Aspect::Equal);
        assert_eq!(ax.adjustable(), Adjustable::Box);
        assert!(!ax.spines().top);

        let legend = ax.get_legend().unwrap();
        assert_eq!(legend.title, "Test set");
        assert_eq!(legend.texts().len(), 3);
        assert_eq!(legend.placement.position, LegendPosition::Inside);
    }

    #[test]
    fn broadcast_override_wins_over_defaults() {
        let mut display = binary_comparison();
        let options = PlotOptions::default().with_roc_curve_kwargs(CurveStyles::Broadcast(
            LineStyle::new().color(Color::named("red")),
        ));
        display.plot(&options).unwrap();
        for line in display.lines() {
            assert_eq!(*line.color(), "red");
        }
        // Override did not touch the generated label.
        assert!(display.lines()[0].label().starts_with("good"));
    }

    #[test]
    fn chance_level_can_be_hidden_or_restyled() {
        let mut display = binary_comparison();
        display
            .plot(&PlotOptions::default().without_chance_level())
            .unwrap();
        assert!(display.chance_level().is_none());
        assert_eq!(display.ax().unwrap().get_legend().unwrap().texts().len(), 2);

        let options = PlotOptions::default()
            .with_chance_level_kwargs(LineStyle::new().linewidth(3.0).alpha(0.5));
        display.plot(&options).unwrap();
        let chance = display.chance_level().unwrap();
        assert_eq!(chance.linewidth, 3.0);
        assert_eq!(chance.alpha, 0.5);
        assert_eq!(*chance.color(), "k");
    }

    #[test]
    fn replotting_replaces_lines() {
        let mut display = binary_comparison();
        display.plot(&PlotOptions::default()).unwrap();
        display.plot(&PlotOptions::default()).unwrap();
        assert_eq!(display.lines().len(), 2);
        assert_eq!(display.ax().unwrap().lines().len(), 3);
    }

    #[test]
    fn kwargs_value_rejects_scalars() {
        let mut display = binary_comparison();
        let err = display
            .plot_with_kwargs_value(&serde_json::json!("unknown"), &PlotOptions::default())
            .unwrap_err();
        assert!(matches!(err, DisplayError::MultipleCurvesKwargs { expected: 2, .. }));
        assert!(display.ax().is_none());
    }

    #[test]
    fn binary_frame_is_keyed_by_estimator() {
        let display = binary_comparison();
        let frame = display.frame(true).unwrap();
        let names: Vec<&str> = frame
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();
        assert_eq!(names, vec![ESTIMATOR_NAME, THRESHOLD, FPR, TPR, ROC_AUC]);
        assert_eq!(frame.height(), display.roc_curve().height());

        let rows = string_values(&frame, ESTIMATOR_NAME).unwrap();
        let aucs = f64_values(&frame, ROC_AUC).unwrap();
        for (name, auc) in rows.iter().zip(aucs) {
            let expected = if name == "good" { 0.75 } else { 1.0 };
            assert!((auc - expected).abs() < 1e-12);
        }

        let plain = display.frame(false).unwrap();
        assert_eq!(plain.width(), 4);
    }

    #[test]
    fn missing_pair_is_reported() {
        let display = binary_comparison();
        assert!(matches!(
            display.curve("absent", &Label::Int(1)),
            Err(DisplayError::MissingCurve { .. })
        ));
    }
}
