pub mod chart;
pub mod cli;
pub mod config;
pub mod output;

#[cfg(feature = "tui")]
pub mod pane;

pub mod table;
pub mod template;

#[cfg(feature = "tui")]
pub mod tui_app;
