//! ScoreLab TUI - terminal viewer for a ROC comparison experiment
//!
//! Shows the plotted ROC chart next to the AUC table. Selecting a table
//! row highlights the matching curve.

pub mod app;
pub mod panels;
pub mod theme;

pub use app::{draw, handle_key_event, App};
pub use theme::Theme;
