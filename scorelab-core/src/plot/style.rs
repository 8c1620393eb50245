//! Per-line styling overrides.

use super::color::Color;
use serde::{Deserialize, Serialize};

/// Dash pattern of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

/// How consecutive points are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawStyle {
    #[default]
    Default,
    /// Horizontal then vertical: the value holds until the next x.
    StepsPost,
}

/// A partial line style. `None` fields fall back to the caller's default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linestyle: Option<LineKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linewidth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn linestyle(mut self, kind: LineKind) -> Self {
        self.linestyle = Some(kind);
        self
    }

    pub fn linewidth(mut self, width: f64) -> Self {
        self.linewidth = Some(width);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// `self` overlaid with every field `over` sets.
    pub fn merged(&self, over: &LineStyle) -> LineStyle {
        LineStyle {
            color: over.color.clone().or_else(|| self.color.clone()),
            linestyle: over.linestyle.or(self.linestyle),
            linewidth: over.linewidth.or(self.linewidth),
            alpha: over.alpha.or(self.alpha),
            label: over.label.clone().or_else(|| self.label.clone()),
        }
    }
}
