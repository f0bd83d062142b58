//! Headless search: run one query through the coordinator and collect the ids
//! of every node the filter pass kept.
//!
//! A blank query clears the filter, so every node counts as kept.

use helptree_core::{
    CatalogNode, CoordinatorOptions, HelpBundle, NodePredicate, RefreshCompletion,
    SearchCoordinator, StartupParams, TreeView,
};

/// A [`TreeView`] that renders nothing and records filter hits in document
/// order.
#[derive(Debug, Default)]
pub struct MatchCollector {
    data: Vec<CatalogNode>,
    matched: Vec<String>,
}

impl MatchCollector {
    pub fn matched(&self) -> &[String] {
        &self.matched
    }
}

impl TreeView for MatchCollector {
    fn set_data(&mut self, nodes: Vec<CatalogNode>) {
        self.data = nodes;
        self.matched.clear();
    }

    fn refresh(&mut self) -> RefreshCompletion {
        RefreshCompletion::Settled
    }

    fn refresh_filter(&mut self, predicate: &NodePredicate<'_>) {
        fn walk(nodes: &[CatalogNode], top: bool, p: &NodePredicate<'_>, out: &mut Vec<String>) {
            for node in nodes {
                if p(node, top) {
                    out.push(node.id.clone());
                }
                walk(&node.children, false, p, out);
            }
        }
        self.matched.clear();
        walk(&self.data, true, predicate, &mut self.matched);
    }

    fn clear_filter(&mut self) {
        fn walk(nodes: &[CatalogNode], out: &mut Vec<String>) {
            for node in nodes {
                out.push(node.id.clone());
                walk(&node.children, out);
            }
        }
        self.matched.clear();
        walk(&self.data, &mut self.matched);
    }

    fn select(&mut self, _id: &str) {}
    fn deselect_all(&mut self) {}
    fn expand(&mut self, _id: &str) {}
    fn toggle(&mut self, _id: &str) {}
    fn scroll_into_view(&mut self, _id: &str) {}
    fn expand_all(&mut self) {}
    fn collapse_all(&mut self) {}
}

/// Ids of every node matching `query`, in document order. `list_view`
/// searches the flattened leaves instead of the nested tree. A blank query
/// returns every node.
pub fn query_ids(bundle: HelpBundle, query: &str, list_view: bool) -> Vec<String> {
    let startup = StartupParams { page: None, list_view };
    let mut coordinator = SearchCoordinator::new(
        bundle,
        MatchCollector::default(),
        CoordinatorOptions::default(),
        startup,
    );
    coordinator.attach();
    coordinator.run_search(query);
    tracing::debug!(
        query = %coordinator.session().query,
        hits = coordinator.view().matched().len(),
        "headless search done"
    );
    coordinator.view().matched().to_vec()
}
