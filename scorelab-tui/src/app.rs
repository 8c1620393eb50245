//! Application state, key handling and frame layout.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use scorelab_runner::{AucEntry, ExperimentResult, RunError};

use crate::panels::{AucTablePanel, RocChartPanel};
use crate::theme::Theme;

pub struct App {
    pub result: ExperimentResult,
    pub entries: Vec<AucEntry>,
    pub selected: usize,
    /// When false the chart takes the whole body and nothing is highlighted.
    pub show_table: bool,
    pub running: bool,
    pub theme: Theme,
}

impl App {
    pub fn new(result: ExperimentResult) -> Result<Self, RunError> {
        let entries = result.auc_summary()?;
        Ok(Self {
            result,
            entries,
            selected: 0,
            show_table: true,
            running: true,
            theme: Theme::default(),
        })
    }

    fn select_next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1) % self.entries.len();
        }
    }

    fn select_prev(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + self.entries.len() - 1) % self.entries.len();
        }
    }

    /// Curve to highlight on the chart, if any.
    pub fn highlighted_line(&self) -> Option<usize> {
        (self.show_table && !self.entries.is_empty()).then_some(self.selected)
    }
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('t') | KeyCode::Tab => app.show_table = !app.show_table,
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Home => app.selected = 0,
        KeyCode::End => app.selected = app.entries.len().saturating_sub(1),
        _ => {}
    }
}

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(frame.area());

    draw_status(frame, chunks[0], app);

    let (chart_area, table_area) = if app.show_table {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);
        (body[0], Some(body[1]))
    } else {
        (chunks[1], None)
    };

    match app.result.display.ax() {
        Some(ax) => frame.render_widget(
            RocChartPanel::new(ax, &app.theme).highlight(app.highlighted_line()),
            chart_area,
        ),
        None => frame.render_widget(
            Paragraph::new("display has not been plotted").block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.warning)),
            ),
            chart_area,
        ),
    }

    if let Some(area) = table_area {
        frame.render_widget(
            AucTablePanel::new(&app.entries, app.selected, &app.theme),
            area,
        );
    }
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let display = &app.result.display;
    let key = Style::default().fg(app.theme.muted);
    let value = Style::default().fg(app.theme.text_primary);
    let id: String = app.result.experiment_id.chars().take(12).collect();
    let line = Line::from(vec![
        Span::styled(" experiment ", key),
        Span::styled(id, Style::default().fg(app.theme.accent)),
        Span::styled(" │ task ", key),
        Span::styled(
            if display.ml_task().is_binary() {
                "binary"
            } else {
                "multiclass"
            },
            value,
        ),
        Span::styled(" │ data ", key),
        Span::styled(display.data_source().to_string(), value),
        Span::styled(" │ train/test ", key),
        Span::styled(format!("{}/{}", app.result.n_train, app.result.n_test), value),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(app.theme.background)),
        area,
    );
}
