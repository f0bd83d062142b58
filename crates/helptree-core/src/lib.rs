//! helptree-core: search and tree shaping for a command-help catalog.
//!
//! This crate holds everything with real logic in it; the TUI crate only
//! renders what it is told.
//!
//! # Architecture
//!
//! ```text
//!                ┌──► AliasTable::expand ──► PhraseSet ─┐
//! input ──► SearchCoordinator (debounce)                 ├──► TreeView::refresh_filter(matches)
//!                └──► toggle_view ──► flatten ───────────┘
//! ```
//!
//! The coordinator owns the session state and talks to the renderer only
//! through the [`TreeView`](coordinator::TreeView) trait.

pub mod alias;
pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod debounce;
pub mod flatten;
pub mod matcher;
pub mod types;

pub use alias::{AliasTable, PhraseSet};
pub use catalog::{ancestor_path, Catalog, CatalogError, HelpBundle};
pub use coordinator::{
    CoordinatorOptions, NodePredicate, RefreshCompletion, SearchCoordinator, SearchSession,
    StartupParams, TreeView,
};
pub use flatten::flatten;
pub use matcher::{matches, Matcher};
pub use types::{CatalogNode, ViewMode};
