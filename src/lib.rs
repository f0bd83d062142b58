//! helptree: searchable command-help catalog browser.
//!
//! The binary either opens the TUI from `helptree-tui` or, with `--query`,
//! runs a single search headless and prints the matching node ids. The
//! headless path lives here so integration tests can call it directly.
//!
//! # Architecture
//!
//! ```text
//! bundle.json ──► HelpBundle ──► SearchCoordinator ──► TreeView
//!                                                       ├─ CommandTreeState (TUI)
//!                                                       └─ MatchCollector   (headless)
//! ```

pub mod headless;
