//! ROC chart panel - draws a plotted [`Axes`] in the terminal
//!
//! Displays:
//! - One dataset per line (ROC curves and the chance level)
//! - Axis titles and bounds from the axes limits
//! - The legend, inside the lower-right corner or in a column to the right
//!
//! Post-step lines are expanded into horizontal and vertical segments before
//! drawing, so the terminal curve matches the exported chart.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Widget},
};
use scorelab_core::plot::{Aspect, Axes, DrawStyle, Legend, LegendPosition, Line2D, LineKind};

use crate::theme::Theme;

/// ROC chart widget
pub struct RocChartPanel<'a> {
    ax: &'a Axes,
    theme: &'a Theme,
    /// Line index to emphasize; other curves are muted.
    highlight: Option<usize>,
}

impl<'a> RocChartPanel<'a> {
    pub fn new(ax: &'a Axes, theme: &'a Theme) -> Self {
        Self {
            ax,
            theme,
            highlight: None,
        }
    }

    pub fn highlight(mut self, line: Option<usize>) -> Self {
        self.highlight = line;
        self
    }

    fn line_style(&self, idx: usize, line: &Line2D) -> Style {
        let base = Style::default().fg(self.theme.line_color(line.color()));
        match self.highlight {
            Some(h) if h == idx => base.add_modifier(Modifier::BOLD),
            Some(_) if line.linestyle == LineKind::Solid => Style::default().fg(self.theme.muted),
            _ => base,
        }
    }
}

/// Points to draw for `line`, with post-step lines expanded into segments.
pub fn line_points(line: &Line2D) -> Vec<(f64, f64)> {
    let pairs = line.xdata.iter().copied().zip(line.ydata.iter().copied());
    match line.drawstyle {
        DrawStyle::Default => pairs.collect(),
        DrawStyle::StepsPost => {
            let mut points = Vec::with_capacity(line.xdata.len() * 2);
            for (x, y) in pairs {
                if let Some(&(_, prev_y)) = points.last() {
                    points.push((x, prev_y));
                }
                points.push((x, y));
            }
            points
        }
    }
}

fn marker(kind: LineKind) -> symbols::Marker {
    match kind {
        LineKind::Solid => symbols::Marker::Braille,
        LineKind::Dashed | LineKind::Dotted | LineKind::DashDot => symbols::Marker::Dot,
    }
}

/// Two-cell legend swatch for a dash pattern.
fn swatch(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Solid => "──",
        LineKind::Dashed => "╌╌",
        LineKind::Dotted => "··",
        LineKind::DashDot => "─·",
    }
}

/// Axis titles are single-line in the terminal.
fn axis_title(label: &str) -> String {
    label.replace('\n', " ")
}

fn tick_labels(lo: f64, hi: f64) -> Vec<Span<'static>> {
    let clamp = |v: f64| v.clamp(0.0, 1.0);
    let (lo, hi) = (clamp(lo), clamp(hi));
    vec![
        Span::raw(format!("{lo:.1}")),
        Span::raw(format!("{:.1}", (lo + hi) / 2.0)),
        Span::raw(format!("{hi:.1}")),
    ]
}

/// Widest rect that keeps a unit square roughly square, given cells about
/// twice as tall as they are wide. The y-axis labels get a fixed margin.
pub fn equal_aspect_area(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(2).saturating_add(10));
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn legend_size(legend: &Legend) -> (u16, u16) {
    let widest = legend
        .entries
        .iter()
        .map(|e| e.label.chars().count())
        .chain(std::iter::once(legend.title.chars().count()))
        .max()
        .unwrap_or(0);
    let width = u16::try_from(widest + 5).unwrap_or(u16::MAX);
    let height = u16::try_from(legend.entries.len() + 2).unwrap_or(u16::MAX);
    (width, height)
}

/// Lower-right corner of `plot`, above the x-axis labels.
fn inside_legend_area(plot: Rect, size: (u16, u16)) -> Rect {
    let inner = plot.inner(Margin::new(1, 1));
    let width = size.0.min(inner.width);
    let height = size.1.min(inner.height.saturating_sub(2));
    Rect {
        x: inner.right().saturating_sub(width + 1),
        y: inner.bottom().saturating_sub(height + 2),
        width,
        height,
    }
}

struct LegendBox<'a> {
    legend: &'a Legend,
    theme: &'a Theme,
}

impl<'a> Widget for LegendBox<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 3 {
            return;
        }
        Clear.render(area, buf);
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.legend.title),
                Style::default().fg(self.theme.text_secondary),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted))
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);
        block.render(area, buf);

        for (row, entry) in self.legend.entries.iter().enumerate() {
            let Ok(offset) = u16::try_from(row) else { break };
            if offset >= inner.height {
                break;
            }
            let color = self.theme.line_color(&entry.color);
            let line = Line::from(vec![
                Span::styled(swatch(entry.linestyle), Style::default().fg(color)),
                Span::raw(" "),
                Span::styled(
                    entry.label.as_str(),
                    Style::default().fg(self.theme.text_primary),
                ),
            ]);
            buf.set_line(inner.x, inner.y + offset, &line, inner.width);
        }
    }
}

impl<'a> Widget for RocChartPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let legend = self.ax.get_legend();
        let outside = legend
            .map(|l| l.placement.position == LegendPosition::Outside)
            .unwrap_or(false);

        let (plot_area, side_area) = match (legend, outside) {
            (Some(l), true) => {
                let side_width = legend_size(l).0.min(area.width / 2);
                let chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Min(20), Constraint::Length(side_width)])
                    .split(area);
                (chunks[0], Some(chunks[1]))
            }
            _ => (area, None),
        };
        let plot_area = match self.ax.aspect() {
            Aspect::Equal => equal_aspect_area(plot_area),
            Aspect::Auto => plot_area,
        };

        let points: Vec<Vec<(f64, f64)>> = self.ax.lines().iter().map(line_points).collect();
        let datasets: Vec<Dataset> = self
            .ax
            .lines()
            .iter()
            .zip(&points)
            .enumerate()
            .map(|(idx, (line, data))| {
                Dataset::default()
                    .marker(marker(line.linestyle))
                    .graph_type(GraphType::Line)
                    .style(self.line_style(idx, line))
                    .data(data)
            })
            .collect();

        let (x_lo, x_hi) = self.ax.xlim();
        let (y_lo, y_hi) = self.ax.ylim();
        let axis_style = Style::default().fg(self.theme.muted);
        let title_style = Style::default().fg(self.theme.text_secondary);

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(format!(" {} ", self.ax.title()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent))
                    .style(Style::default().bg(self.theme.background)),
            )
            .legend_position(None)
            .x_axis(
                Axis::default()
                    .title(Span::styled(axis_title(self.ax.xlabel()), title_style))
                    .style(axis_style)
                    .bounds([x_lo, x_hi])
                    .labels(tick_labels(x_lo, x_hi)),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(axis_title(self.ax.ylabel()), title_style))
                    .style(axis_style)
                    .bounds([y_lo, y_hi])
                    .labels(tick_labels(y_lo, y_hi)),
            );
        chart.render(plot_area, buf);

        if let Some(legend) = legend {
            let legend_area = match side_area {
                Some(side) => Rect {
                    height: legend_size(legend).1.min(side.height),
                    ..side
                },
                None => inside_legend_area(plot_area, legend_size(legend)),
            };
            LegendBox {
                legend,
                theme: self.theme,
            }
            .render(legend_area, buf);
        }
    }
}
