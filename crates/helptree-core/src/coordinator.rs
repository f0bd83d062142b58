//! Search coordinator: owns the search session and drives a [`TreeView`].
//!
//! # Flow
//!
//! ```text
//! on_input ──► search timer ──(tick, delay elapsed)──► normalise query
//!                                                        │
//!                                     AliasTable::expand ▼
//!                                   view.refresh_filter(Matcher)
//!
//! toggle_view ──► set_data(nested | flattened) ──► refresh
//!                        Settled  ──► re-select now
//!                        Deferred ──► settle timer ──(tick)──► re-select
//! ```
//!
//! Everything runs on the caller's thread. The view borrows the session only
//! for the duration of a filter pass.

use crate::{
    alias::PhraseSet,
    catalog::HelpBundle,
    config::Config,
    debounce::Debouncer,
    matcher::Matcher,
    types::{page_id, CatalogNode, ViewMode},
};
use std::time::Duration;
use tokio::time::Instant;

// ---------------------------------------------------------------------------
// TreeView seam
// ---------------------------------------------------------------------------

/// What a view reports after [`TreeView::refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshCompletion {
    /// The refresh finished before returning; selection can be applied now.
    Settled,
    /// The refresh completes later and offers no completion signal. The
    /// coordinator waits the fixed settle delay before re-selecting.
    Deferred,
}

/// Filter predicate handed to the view: `(node, is_top_level) -> keep`.
pub type NodePredicate<'a> = dyn Fn(&CatalogNode, bool) -> bool + 'a;

/// The tree-rendering collaborator.
///
/// Implementors own expand/collapse/selection state; the coordinator only
/// issues commands by node id.
pub trait TreeView {
    /// Replace the node list. Clears any active filter.
    fn set_data(&mut self, nodes: Vec<CatalogNode>);
    /// Rebuild the view from its data.
    fn refresh(&mut self) -> RefreshCompletion;
    /// Run a filter pass, calling `predicate` once per node.
    fn refresh_filter(&mut self, predicate: &NodePredicate<'_>);
    /// Drop the active filter so every node is shown again.
    fn clear_filter(&mut self);
    fn select(&mut self, id: &str);
    fn deselect_all(&mut self);
    fn expand(&mut self, id: &str);
    fn toggle(&mut self, id: &str);
    fn scroll_into_view(&mut self, id: &str);
    fn expand_all(&mut self);
    fn collapse_all(&mut self);
}

// ---------------------------------------------------------------------------
// Session + options
// ---------------------------------------------------------------------------

/// Mutable search state, owned by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    pub current_node_id: String,
    pub mode: ViewMode,
    pub phrases: PhraseSet,
    /// The normalised query behind `phrases`.
    pub query: String,
}

/// Startup parameters, the equivalent of the page's URL query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupParams {
    /// Page name without the id suffix; `None` selects the root.
    pub page: Option<String>,
    /// Start in the flattened list view.
    pub list_view: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorOptions {
    pub debounce: Duration,
    pub settle: Duration,
    pub docs_dir: String,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self::from(&Config::defaults())
    }
}

impl From<&Config> for CoordinatorOptions {
    fn from(config: &Config) -> Self {
        Self {
            debounce: Duration::from_millis(config.search.debounce_ms),
            settle: Duration::from_millis(config.search.settle_ms),
            docs_dir: config.ui.docs_dir.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

pub struct SearchCoordinator<V: TreeView> {
    bundle: HelpBundle,
    view: V,
    session: SearchSession,
    startup: StartupParams,
    docs_dir: String,
    search_timer: Debouncer<String>,
    /// Pending re-selection; the flag says whether to expand as well.
    settle_timer: Debouncer<bool>,
    searches_run: usize,
}

impl<V: TreeView> SearchCoordinator<V> {
    pub fn new(bundle: HelpBundle, view: V, options: CoordinatorOptions, startup: StartupParams) -> Self {
        let current_node_id = match &startup.page {
            Some(page) => page_id(page),
            None => bundle.catalog.root().id.clone(),
        };
        Self {
            bundle,
            view,
            session: SearchSession {
                current_node_id,
                mode: ViewMode::Nested,
                phrases: PhraseSet::default(),
                query: String::new(),
            },
            startup,
            docs_dir: options.docs_dir,
            search_timer: Debouncer::new(options.debounce),
            settle_timer: Debouncer::new(options.settle),
            searches_run: 0,
        }
    }

    /// Hand the catalog to the view and apply the startup selection.
    pub fn attach(&mut self) {
        self.view.set_data(self.bundle.catalog.nodes().to_vec());
        self.after_refresh();
        if self.startup.list_view {
            self.toggle_view();
        }
        tracing::debug!(node = %self.session.current_node_id, mode = ?self.session.mode, "coordinator attached");
    }

    // -- input --------------------------------------------------------------

    /// Record a raw input event. The search runs once input pauses.
    pub fn on_input(&mut self, text: &str) {
        self.search_timer.schedule(text.to_string());
        tracing::debug!(query = %text, "search scheduled");
    }

    /// Fire whichever timers are due. Returns `true` if a search ran.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> bool {
        let ran = match self.search_timer.poll_at(now) {
            Some(raw) => {
                self.run_search(&raw);
                true
            }
            None => false,
        };
        if let Some(also_expand) = self.settle_timer.poll_at(now) {
            self.select_current(also_expand);
        }
        ran
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.search_timer.deadline(), self.settle_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Run a search immediately, bypassing the debounce delay. A search still
    /// waiting on the timer is dropped.
    pub fn run_search(&mut self, raw: &str) {
        self.search_timer.cancel();
        let query = normalize_query(raw, &self.bundle.catalog.root().text);
        self.session.phrases = self.bundle.aliases.expand(&query);
        self.session.query = query;
        self.searches_run += 1;

        if self.session.query.is_empty() {
            self.view.clear_filter();
        } else {
            let matcher = Matcher::new(&self.session.phrases, self.session.mode);
            self.view
                .refresh_filter(&|node: &CatalogNode, top: bool| matcher.matches(node, top));
        }
        tracing::info!(
            query = %self.session.query,
            phrases = self.session.phrases.len(),
            mode = ?self.session.mode,
            "search applied"
        );
    }

    // -- selection ----------------------------------------------------------

    /// The user selected `id` in the view.
    pub fn on_selected(&mut self, id: &str) {
        tracing::debug!(node = %id, "node selected");
        self.session.current_node_id = id.to_string();
    }

    /// Navigation message from the docs frame; the node id is everything
    /// after the final `/`. Re-selects without expanding.
    pub fn on_navigate(&mut self, message: &str) {
        let id = message.rsplit_once('/').map_or(message, |(_, tail)| tail);
        if !self.bundle.catalog.contains(id) {
            tracing::warn!(node = %id, "navigation to unknown node");
        }
        self.session.current_node_id = id.to_string();
        self.select_current(false);
    }

    fn select_current(&mut self, also_expand: bool) {
        let id = self.session.current_node_id.as_str();
        self.view.deselect_all();
        self.view.select(id);
        if also_expand {
            self.view.expand(id);
        }
        self.view.scroll_into_view(id);
    }

    fn after_refresh(&mut self) {
        match self.view.refresh() {
            RefreshCompletion::Settled => self.select_current(true),
            RefreshCompletion::Deferred => self.settle_timer.schedule(true),
        }
    }

    // -- view mode ----------------------------------------------------------

    /// Swap between the nested tree and the flattened list.
    pub fn toggle_view(&mut self) {
        self.session.mode = self.session.mode.toggled();
        let nodes = match self.session.mode {
            ViewMode::Nested => self.bundle.catalog.nodes().to_vec(),
            ViewMode::Flattened => self.bundle.catalog.flattened(),
        };
        tracing::info!(mode = ?self.session.mode, nodes = nodes.len(), "view toggled");
        self.settle_timer.cancel();
        self.view.set_data(nodes);
        self.after_refresh();
    }

    /// Label for the control that switches to the other view.
    pub fn toggle_label(&self) -> String {
        format!("Switch to {}", self.session.mode.toggled())
    }

    pub fn expand_all(&mut self) {
        self.view.expand_all();
    }

    /// Collapse everything, then re-open the root so its children stay visible.
    pub fn collapse_all(&mut self) {
        self.view.collapse_all();
        let root = self.bundle.catalog.root().id.clone();
        self.view.toggle(&root);
    }

    // -- accessors ----------------------------------------------------------

    /// Docs page for the current node.
    pub fn doc_target(&self) -> String {
        format!("{}/{}?e=1", self.docs_dir, self.session.current_node_id)
    }

    pub fn current_node_id(&self) -> &str {
        &self.session.current_node_id
    }

    pub fn current_node(&self) -> Option<&CatalogNode> {
        self.bundle.catalog.find(&self.session.current_node_id)
    }

    pub fn mode(&self) -> ViewMode {
        self.session.mode
    }

    pub fn phrases(&self) -> &PhraseSet {
        &self.session.phrases
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn searches_run(&self) -> usize {
        self.searches_run
    }

    pub fn is_search_pending(&self) -> bool {
        self.search_timer.is_pending()
    }

    pub fn header(&self) -> &str {
        &self.bundle.header
    }

    pub fn footer(&self) -> &str {
        &self.bundle.footer
    }

    pub fn bundle(&self) -> &HelpBundle {
        &self.bundle
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

/// Trim `raw` and drop a leading `"<root_text> "`, so typing the full command
/// including the program name still finds the node.
pub fn normalize_query(raw: &str, root_text: &str) -> String {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix(root_text)
        .filter(|rest| rest.starts_with(' '))
    {
        Some(rest) => rest.trim().to_string(),
        None => trimmed.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
