//! Dark theme tokens for the ScoreLab TUI.
//!
//! # Color Palette
//! - **Background**: deep charcoal
//! - **Accent**: electric cyan (borders, headers)
//! - **Positive**: neon green (strong AUC)
//! - **Negative**: hot pink (worse than chance)
//! - **Neutral**: cool purple (selection)
//! - **Muted**: steel blue (axes, secondary text)

use ratatui::style::Color;
use scorelab_core::plot::Color as PlotColor;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Terminal color of a chart line.
    ///
    /// Black and near-black lines (the chance level) would vanish on the
    /// background and are drawn in the secondary text color instead.
    /// Unknown color names fall back to the primary text color.
    pub fn line_color(&self, color: &PlotColor) -> Color {
        match color.to_rgba() {
            Some(rgba) => {
                let (r, g, b) = rgba.to_rgb8();
                if u16::from(r) + u16::from(g) + u16::from(b) < 60 {
                    self.text_secondary
                } else {
                    Color::Rgb(r, g, b)
                }
            }
            None => self.text_primary,
        }
    }

    /// Color for an AUC value.
    pub fn auc_color(&self, auc: f64) -> Color {
        match auc {
            a if a >= 0.9 => self.positive,
            a if a >= 0.8 => self.accent,
            a if a >= 0.7 => self.neutral,
            a if a >= 0.5 => self.muted,
            _ => self.negative,
        }
    }
}
