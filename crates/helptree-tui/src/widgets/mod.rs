//! Ratatui widgets for the helptree TUI.

pub mod command_bar;
pub mod command_tree;
pub mod docs_pane;
pub mod help;
pub mod search_bar;
