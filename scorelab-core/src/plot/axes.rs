//! In-memory chart model: axes, lines and legend.
//!
//! Front ends (the ratatui panel, serialized artifacts) draw from this model;
//! nothing here knows about a concrete backend.

use super::color::Color;
use super::style::{DrawStyle, LineKind, LineStyle};
use crate::report::MlTask;
use serde::Serialize;

/// Legends with more entries than this go outside the axes.
pub const MAX_INSIDE_LEGEND_ENTRIES: usize = 5;

/// A drawn line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line2D {
    pub xdata: Vec<f64>,
    pub ydata: Vec<f64>,
    pub color: Color,
    pub linestyle: LineKind,
    pub linewidth: f64,
    pub alpha: f64,
    pub drawstyle: DrawStyle,
    pub label: String,
}

impl Line2D {
    /// Build a line from data and a fully-resolved style.
    ///
    /// `style.color` and `style.label` are required by callers; missing values
    /// fall back to black and an empty label.
    pub fn new(xdata: Vec<f64>, ydata: Vec<f64>, style: &LineStyle, drawstyle: DrawStyle) -> Self {
        Self {
            xdata,
            ydata,
            color: style.color.clone().unwrap_or_else(|| Color::named("k")),
            linestyle: style.linestyle.unwrap_or_default(),
            linewidth: style.linewidth.unwrap_or(1.5),
            alpha: style.alpha.unwrap_or(1.0),
            drawstyle,
            label: style.label.clone().unwrap_or_default(),
        }
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Index of a line inside its [`Axes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Aspect {
    Auto,
    Equal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Adjustable {
    Box,
    DataLim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegendLocation {
    LowerRight,
    UpperLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegendPosition {
    Inside,
    Outside,
}

/// Where a legend sits relative to the axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendPlacement {
    pub location: LegendLocation,
    pub position: LegendPosition,
    /// Anchor in axes coordinates; only set for outside placement.
    pub bbox_to_anchor: Option<(f64, f64)>,
}

impl LegendPlacement {
    /// Placement for a legend with `n_entries` entries.
    ///
    /// Up to [`MAX_INSIDE_LEGEND_ENTRIES`] entries sit in the lower-right
    /// corner. Longer legends go outside, anchored next to the upper-right
    /// corner of the axes.
    pub fn for_entries(n_entries: usize) -> Self {
        if n_entries <= MAX_INSIDE_LEGEND_ENTRIES {
            Self::lower_right()
        } else {
            Self {
                location: LegendLocation::UpperLeft,
                position: LegendPosition::Outside,
                bbox_to_anchor: Some((1.02, 1.0)),
            }
        }
    }

    /// Inside the axes, in the lower-right corner.
    pub fn lower_right() -> Self {
        Self {
            location: LegendLocation::LowerRight,
            position: LegendPosition::Inside,
            bbox_to_anchor: None,
        }
    }

    /// Placement for a ROC legend. Binary charts always keep the legend
    /// inside, lower right; multiclass charts follow [`Self::for_entries`].
    pub fn for_task(ml_task: MlTask, n_entries: usize) -> Self {
        if ml_task.is_binary() {
            Self::lower_right()
        } else {
            Self::for_entries(n_entries)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub linestyle: LineKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
    pub placement: LegendPlacement,
}

impl Legend {
    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }
}

/// Visibility of the four axes spines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spines {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for Spines {
    fn default() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }
}

/// A single plotting area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axes {
    title: String,
    xlabel: String,
    ylabel: String,
    xlim: (f64, f64),
    ylim: (f64, f64),
    aspect: Aspect,
    adjustable: Adjustable,
    spines: Spines,
    lines: Vec<Line2D>,
    legend: Option<Legend>,
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            title: String::new(),
            xlabel: String::new(),
            ylabel: String::new(),
            xlim: (0.0, 1.0),
            ylim: (0.0, 1.0),
            aspect: Aspect::Auto,
            adjustable: Adjustable::DataLim,
            spines: Spines::default(),
            lines: Vec::new(),
            legend: None,
        }
    }
}

impl Axes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plot(&mut self, line: Line2D) -> LineHandle {
        self.lines.push(line);
        LineHandle(self.lines.len() - 1)
    }

    pub fn line(&self, handle: LineHandle) -> Option<&Line2D> {
        self.lines.get(handle.0)
    }

    pub fn lines(&self) -> &[Line2D] {
        &self.lines
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = label.into();
    }

    pub fn xlabel(&self) -> &str {
        &self.xlabel
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = label.into();
    }

    pub fn ylabel(&self) -> &str {
        &self.ylabel
    }

    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        self.xlim = (lo, hi);
    }

    pub fn xlim(&self) -> (f64, f64) {
        self.xlim
    }

    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        self.ylim = (lo, hi);
    }

    pub fn ylim(&self) -> (f64, f64) {
        self.ylim
    }

    pub fn set_aspect(&mut self, aspect: Aspect, adjustable: Adjustable) {
        self.aspect = aspect;
        self.adjustable = adjustable;
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    pub fn adjustable(&self) -> Adjustable {
        self.adjustable
    }

    pub fn spines(&self) -> Spines {
        self.spines
    }

    /// Hide the top and right spines.
    pub fn despine(&mut self) {
        self.spines.top = false;
        self.spines.right = false;
    }

    /// Attach a legend listing every labelled line, in drawing order, placed
    /// by entry count.
    pub fn legend(&mut self, title: impl Into<String>) -> &Legend {
        self.legend_with(title, LegendPlacement::for_entries)
    }

    /// Like [`Axes::legend`], with `place` choosing the placement from the
    /// number of entries.
    pub fn legend_with(
        &mut self,
        title: impl Into<String>,
        place: impl FnOnce(usize) -> LegendPlacement,
    ) -> &Legend {
        let entries = self.legend_entries();
        let placement = place(entries.len());
        self.legend.insert(Legend {
            title: title.into(),
            entries,
            placement,
        })
    }

    fn legend_entries(&self) -> Vec<LegendEntry> {
        self.lines
            .iter()
            .filter(|l| !l.label.is_empty() && !l.label.starts_with('_'))
            .map(|l| LegendEntry {
                label: l.label.clone(),
                color: l.color.clone(),
                linestyle: l.linestyle,
            })
            .collect()
    }

    pub fn get_legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(label: &str) -> Line2D {
        Line2D::new(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            &LineStyle::new().label(label),
            DrawStyle::Default,
        )
    }

    #[test]
    fn placement_switches_outside_past_threshold() {
        for n in 0..=MAX_INSIDE_LEGEND_ENTRIES {
            let p = LegendPlacement::for_entries(n);
            assert_eq!(p.position, LegendPosition::Inside);
            assert_eq!(p.location, LegendLocation::LowerRight);
            assert!(p.bbox_to_anchor.is_none());
        }
        let p = LegendPlacement::for_entries(MAX_INSIDE_LEGEND_ENTRIES + 1);
        assert_eq!(p.position, LegendPosition::Outside);
        assert_eq!(p.location, LegendLocation::UpperLeft);
        assert_eq!(p.bbox_to_anchor, Some((1.02, 1.0)));
    }

    #[test]
    fn binary_placement_ignores_entry_count() {
        for n in [0, MAX_INSIDE_LEGEND_ENTRIES, MAX_INSIDE_LEGEND_ENTRIES + 1, 40] {
            assert_eq!(
                LegendPlacement::for_task(MlTask::BinaryClassification, n),
                LegendPlacement::lower_right()
            );
            assert_eq!(
                LegendPlacement::for_task(MlTask::MulticlassClassification, n),
                LegendPlacement::for_entries(n)
            );
        }
    }

    #[test]
    fn legend_with_keeps_given_placement() {
        let mut ax = Axes::new();
        for i in 0..8 {
            ax.plot(labelled(&format!("line {i}")));
        }
        let legend = ax.legend_with("Title", |_| LegendPlacement::lower_right());
        assert_eq!(legend.entries.len(), 8);
        assert_eq!(legend.placement.position, LegendPosition::Inside);
    }

    #[test]
    fn legend_skips_unlabelled_lines() {
        let mut ax = Axes::new();
        ax.plot(labelled("a"));
        ax.plot(labelled(""));
        ax.plot(labelled("_hidden"));
        ax.plot(labelled("b"));
        let legend = ax.legend("Title");
        assert_eq!(legend.texts(), vec!["a", "b"]);
        assert_eq!(legend.title, "Title");
    }

    #[test]
    fn handles_index_lines_in_order() {
        let mut ax = Axes::new();
        let a = ax.plot(labelled("a"));
        let b = ax.plot(labelled("b"));
        assert_eq!(ax.line(a).map(Line2D::label), Some("a"));
        assert_eq!(ax.line(b).map(Line2D::label), Some("b"));
        assert!(ax.line(LineHandle(2)).is_none());
    }

    #[test]
    fn despine_hides_top_and_right() {
        let mut ax = Axes::new();
        ax.despine();
        let s = ax.spines();
        assert!(!s.top && !s.right && s.bottom && s.left);
    }
}
