//! TUI panels.

pub mod auc_table;
pub mod roc_chart;

pub use auc_table::AucTablePanel;
pub use roc_chart::RocChartPanel;
