//! ScoreLab TUI - run an experiment config and browse its ROC comparison.
//!
//! Usage: `scorelab-tui <experiment.toml>`

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use scorelab_runner::{run_experiment, ExperimentConfig};
use scorelab_tui::{draw, handle_key_event, App};

fn main() -> Result<()> {
    let Some(config_path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: scorelab-tui <experiment.toml>");
    };

    // The experiment runs before the terminal switches screens so errors
    // print normally.
    let config = ExperimentConfig::from_file(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let result = run_experiment(&config).context("experiment failed")?;
    let mut app = App::new(result)?;

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| draw(f, app))?;
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                handle_key_event(app, key);
            }
        }
    }
    Ok(())
}
