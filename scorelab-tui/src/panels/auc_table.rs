//! AUC table panel - one row per (estimator, label) curve
//!
//! Rows follow the ROC AUC table order, which is also the order of the
//! plotted curves, so a row index doubles as a line index.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};
use scorelab_runner::AucEntry;

use crate::theme::Theme;

const BAR_WIDTH: usize = 10;

/// AUC table widget
pub struct AucTablePanel<'a> {
    entries: &'a [AucEntry],
    selected_index: usize,
    theme: &'a Theme,
}

impl<'a> AucTablePanel<'a> {
    pub fn new(entries: &'a [AucEntry], selected_index: usize, theme: &'a Theme) -> Self {
        Self {
            entries,
            selected_index,
            theme,
        }
    }

    /// Rank (1-based) of each row by descending AUC. Ties share the best rank.
    fn ranks(&self) -> Vec<usize> {
        self.entries
            .iter()
            .map(|e| 1 + self.entries.iter().filter(|o| o.roc_auc > e.roc_auc).count())
            .collect()
    }
}

/// Horizontal bar of `BAR_WIDTH` cells filled in proportion to `auc`.
fn auc_bar(auc: f64) -> String {
    let filled = (auc.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

impl<'a> Widget for AucTablePanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" ROC AUC [{} curves] ", self.entries.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        let header_cells = ["Rank", "Estimator", "Label", "ROC AUC", ""].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1);

        let ranks = self.ranks();
        let rows = self.entries.iter().zip(ranks).enumerate().map(|(i, (entry, rank))| {
            let style = if i == self.selected_index {
                Style::default()
                    .bg(self.theme.neutral)
                    .fg(self.theme.text_primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.text_primary)
            };
            let auc_style = Style::default().fg(self.theme.auc_color(entry.roc_auc));
            let cells = vec![
                Cell::from(format!("{rank}")),
                Cell::from(entry.estimator_name.clone()),
                Cell::from(entry.label.clone()),
                Cell::from(format!("{:.4}", entry.roc_auc)).style(auc_style),
                Cell::from(auc_bar(entry.roc_auc)).style(auc_style),
            ];
            Row::new(cells).style(style).height(1)
        });

        let widths = [
            Constraint::Length(5),
            Constraint::Min(12),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(BAR_WIDTH as u16),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .render(area, buf);

        let help_area = Rect {
            x: area.x + 2,
            y: area.y + area.height.saturating_sub(2),
            width: area.width.saturating_sub(4),
            height: 1,
        };
        let help_text = Line::from(vec![
            Span::styled("↑/↓: ", Style::default().fg(self.theme.muted)),
            Span::styled("Select", Style::default().fg(self.theme.text_secondary)),
            Span::styled(" │ ", Style::default().fg(self.theme.muted)),
            Span::styled("t: ", Style::default().fg(self.theme.muted)),
            Span::styled("Table", Style::default().fg(self.theme.text_secondary)),
            Span::styled(" │ ", Style::default().fg(self.theme.muted)),
            Span::styled("q: ", Style::default().fg(self.theme.muted)),
            Span::styled("Quit", Style::default().fg(self.theme.text_secondary)),
        ]);
        buf.set_line(help_area.x, help_area.y, &help_text, help_area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, label: &str, auc: f64) -> AucEntry {
        AucEntry {
            estimator_name: name.into(),
            label: label.into(),
            roc_auc: auc,
        }
    }

    #[test]
    fn test_auc_bar() {
        assert_eq!(auc_bar(1.0), "██████████");
        assert_eq!(auc_bar(0.0), "░░░░░░░░░░");
        assert_eq!(auc_bar(0.74), "███████░░░");
        assert_eq!(auc_bar(1.7).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn test_ranks_share_ties() {
        let theme = Theme::default();
        let entries = vec![
            entry("a", "1", 0.80),
            entry("b", "1", 0.95),
            entry("c", "1", 0.80),
        ];
        let panel = AucTablePanel::new(&entries, 0, &theme);
        assert_eq!(panel.ranks(), vec![2, 1, 2]);
    }

    #[test]
    fn test_render_lists_rows() {
        let theme = Theme::default();
        let entries = vec![entry("estimator_1", "setosa", 0.9876), entry("estimator_2", "setosa", 0.5)];
        let area = Rect::new(0, 0, 80, 10);
        let mut buf = Buffer::empty(area);
        AucTablePanel::new(&entries, 1, &theme).render(area, &mut buf);

        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            text.push('\n');
        }
        assert!(text.contains("ROC AUC [2 curves]"));
        assert!(text.contains("estimator_1"));
        assert!(text.contains("0.9876"));
        assert!(text.contains("0.5000"));
        assert!(text.contains("Quit"));
    }
}
