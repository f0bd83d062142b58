//! helptree TUI: ratatui application shell.
//!
//! Renders a [`helptree_core::HelpBundle`] as a searchable tree beside a docs
//! pane. All search and selection logic lives in `helptree-core`; this crate
//! provides the [`TreeView`](helptree_core::TreeView) implementation and the
//! terminal plumbing around it.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use helptree_core::{config::Config, HelpBundle, StartupParams};

/// Start the TUI on `bundle` and block until the user quits.
pub fn run(bundle: HelpBundle, config: Config, startup: StartupParams) -> anyhow::Result<()> {
    tracing::info!(
        root = %bundle.catalog.root().text,
        aliases = bundle.aliases.len(),
        page = ?startup.page,
        list_view = startup.list_view,
        "starting tui"
    );
    App::new(bundle, config, startup).run()
}
