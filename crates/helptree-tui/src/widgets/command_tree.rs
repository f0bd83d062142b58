//! Command tree widget: collapsible command hierarchy in the left pane.
//!
//! [`CommandTreeState`] is the [`TreeView`] the search coordinator drives.
//! Filtering follows the usual "show only matches" rule: a matched node is
//! shown together with its ancestors (which are opened) and its whole subtree.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor up and down the visible list.
//! - `→`/`l` expands the focused node; `←`/`h` collapses it.
//! - `Enter` selects the focused node and reports its id to the caller.
//! - `Space` toggles the focused node open or closed.

use crate::event::{AppEvent, Direction};
use helptree_core::{ancestor_path, CatalogNode, NodePredicate, RefreshCompletion, TreeView};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Tree node
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNode {
    pub id: String,
    pub label: String,
    pub expanded: bool,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    fn from_catalog(node: &CatalogNode) -> Self {
        Self {
            id: node.id.clone(),
            label: node.text.clone(),
            expanded: false,
            children: node.children.iter().map(Self::from_catalog).collect(),
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Filter {
    matched: HashSet<String>,
    shown: HashSet<String>,
    /// Ancestors of a match; opened when the filter is applied.
    opened: HashSet<String>,
}

// ---------------------------------------------------------------------------
// Tree state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CommandTreeState {
    /// Catalog data as last handed over by [`TreeView::set_data`].
    data: Vec<CatalogNode>,
    pub nodes: Vec<ViewNode>,
    filter: Option<Filter>,
    selected: Option<String>,
    /// Index into the currently-visible (flattened) list.
    pub cursor: usize,
}

impl CommandTreeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten the tree into `(depth, &node)` pairs, respecting expanded
    /// state and the active filter.
    pub fn visible(&self) -> Vec<(usize, &ViewNode)> {
        let mut out = Vec::new();
        collect_visible(&self.nodes, 0, self.filter.as_ref(), &mut out);
        out
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }

    /// Whether `id` was hit by the last filter pass.
    pub fn is_match(&self, id: &str) -> bool {
        self.filter.as_ref().is_some_and(|f| f.matched.contains(id))
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        find(&self.nodes, id).is_some_and(|n| n.expanded)
    }

    fn cursor_id(&self) -> Option<String> {
        self.visible().get(self.cursor).map(|(_, n)| n.id.clone())
    }

    /// Handle an [`AppEvent`]. Returns the node id when the user picks one.
    pub fn handle(&mut self, event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::TreeNav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::trace!(cursor = self.cursor, "tree: cursor up");
            }
            AppEvent::TreeNav(Direction::Down) => {
                let max = self.visible().len().saturating_sub(1);
                if self.cursor < max {
                    self.cursor += 1;
                }
                tracing::trace!(cursor = self.cursor, "tree: cursor down");
            }
            AppEvent::TreeNav(Direction::Right) => {
                if let Some(id) = self.cursor_id() {
                    tracing::debug!(node = %id, "tree: expand");
                    set_expanded(&mut self.nodes, &id, true);
                }
            }
            AppEvent::TreeNav(Direction::Left) => {
                if let Some(id) = self.cursor_id() {
                    tracing::debug!(node = %id, "tree: collapse");
                    set_expanded(&mut self.nodes, &id, false);
                    self.clamp_cursor();
                }
            }
            AppEvent::Char(' ') => {
                if let Some(id) = self.cursor_id() {
                    toggle_expanded(&mut self.nodes, &id);
                    self.clamp_cursor();
                }
            }
            AppEvent::Enter => {
                let id = self.cursor_id()?;
                tracing::debug!(node = %id, "tree: select");
                self.selected = Some(id.clone());
                return Some(id);
            }
            _ => {}
        }
        None
    }

    fn clamp_cursor(&mut self) {
        let max = self.visible().len().saturating_sub(1);
        if self.cursor > max {
            self.cursor = max;
        }
    }
}

impl TreeView for CommandTreeState {
    fn set_data(&mut self, nodes: Vec<CatalogNode>) {
        self.data = nodes;
        self.filter = None;
        self.cursor = 0;
    }

    fn refresh(&mut self) -> RefreshCompletion {
        self.nodes = self.data.iter().map(ViewNode::from_catalog).collect();
        self.clamp_cursor();
        RefreshCompletion::Settled
    }

    fn refresh_filter(&mut self, predicate: &NodePredicate<'_>) {
        let mut filter = Filter::default();
        let mut path = Vec::new();
        apply_filter(&self.data, true, predicate, &mut path, &mut filter);

        for id in &filter.opened {
            set_expanded(&mut self.nodes, id, true);
        }
        tracing::debug!(matched = filter.matched.len(), shown = filter.shown.len(), "tree: filtered");
        self.filter = Some(filter);
        self.clamp_cursor();
    }

    fn clear_filter(&mut self) {
        self.filter = None;
        self.clamp_cursor();
    }

    /// Select `id`, opening its ancestors so it can be seen.
    fn select(&mut self, id: &str) {
        match ancestor_path(&self.data, id) {
            Some(path) => {
                for ancestor in path {
                    set_expanded(&mut self.nodes, &ancestor, true);
                }
                self.selected = Some(id.to_string());
            }
            None => tracing::debug!(node = %id, "tree: select of absent node ignored"),
        }
    }

    fn deselect_all(&mut self) {
        self.selected = None;
    }

    fn expand(&mut self, id: &str) {
        set_expanded(&mut self.nodes, id, true);
    }

    fn toggle(&mut self, id: &str) {
        toggle_expanded(&mut self.nodes, id);
        self.clamp_cursor();
    }

    fn scroll_into_view(&mut self, id: &str) {
        if let Some(pos) = self.visible().iter().position(|(_, n)| n.id == id) {
            self.cursor = pos;
        }
    }

    fn expand_all(&mut self) {
        set_all_expanded(&mut self.nodes, true);
    }

    fn collapse_all(&mut self) {
        set_all_expanded(&mut self.nodes, false);
        self.clamp_cursor();
    }
}

// ---------------------------------------------------------------------------
// Recursive tree helpers
// ---------------------------------------------------------------------------

fn collect_visible<'a>(
    nodes: &'a [ViewNode],
    depth: usize,
    filter: Option<&Filter>,
    out: &mut Vec<(usize, &'a ViewNode)>,
) {
    for node in nodes {
        if filter.is_some_and(|f| !f.shown.contains(&node.id)) {
            continue;
        }
        out.push((depth, node));
        if node.expanded {
            collect_visible(&node.children, depth + 1, filter, out);
        }
    }
}

/// Evaluate `predicate` on every node, recording hits plus the nodes that must
/// stay visible because of them.
fn apply_filter(
    nodes: &[CatalogNode],
    top_level: bool,
    predicate: &NodePredicate<'_>,
    path: &mut Vec<String>,
    filter: &mut Filter,
) {
    for node in nodes {
        if predicate(node, top_level) {
            filter.matched.insert(node.id.clone());
            filter.shown.extend(path.iter().cloned());
            filter.opened.extend(path.iter().cloned());
            mark_subtree(node, &mut filter.shown);
        }
        path.push(node.id.clone());
        apply_filter(&node.children, false, predicate, path, filter);
        path.pop();
    }
}

fn mark_subtree(node: &CatalogNode, shown: &mut HashSet<String>) {
    shown.insert(node.id.clone());
    for child in &node.children {
        mark_subtree(child, shown);
    }
}

fn find<'a>(nodes: &'a [ViewNode], id: &str) -> Option<&'a ViewNode> {
    nodes.iter().find_map(|n| if n.id == id { Some(n) } else { find(&n.children, id) })
}

/// Set the `expanded` flag on the node with `id`. Returns `true` if found.
fn set_expanded(nodes: &mut [ViewNode], id: &str, expanded: bool) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            node.expanded = expanded;
            return true;
        }
        if set_expanded(&mut node.children, id, expanded) {
            return true;
        }
    }
    false
}

fn toggle_expanded(nodes: &mut [ViewNode], id: &str) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            node.expanded = !node.expanded;
            return true;
        }
        if toggle_expanded(&mut node.children, id) {
            return true;
        }
    }
    false
}

fn set_all_expanded(nodes: &mut [ViewNode], expanded: bool) {
    for node in nodes.iter_mut() {
        if !node.is_leaf() {
            node.expanded = expanded;
        }
        set_all_expanded(&mut node.children, expanded);
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct CommandTree<'a> {
    state: &'a CommandTreeState,
    title: &'a str,
    focused: bool,
    theme: &'a crate::theme::Theme,
}

impl<'a> CommandTree<'a> {
    pub fn new(
        state: &'a CommandTreeState,
        title: &'a str,
        focused: bool,
        theme: &'a crate::theme::Theme,
    ) -> Self {
        Self {
            state,
            title,
            focused,
            theme,
        }
    }
}

impl Widget for CommandTree<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title(self.title)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .state
            .visible()
            .iter()
            .map(|(depth, node)| {
                let indent = "  ".repeat(*depth);
                let expand = if node.is_leaf() {
                    "  "
                } else if node.expanded {
                    "▼ "
                } else {
                    "▶ "
                };
                let mut style = if node.is_leaf() {
                    self.theme.tree_leaf
                } else {
                    self.theme.tree_branch
                };
                if self.state.is_match(&node.id) {
                    style = style.patch(self.theme.search_highlight);
                }
                let mut spans = vec![
                    Span::raw(format!("{indent}{expand}")),
                    Span::styled(node.label.clone(), style),
                ];
                if self.state.selected() == Some(node.id.as_str()) {
                    spans.push(Span::styled(" ●", self.theme.tree_selected));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list =
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// zowe → [zos-jobs → [list, submit], config → [set]]
    fn catalog() -> Vec<CatalogNode> {
        vec![CatalogNode::new("zowe.html", "zowe").with_children(vec![
            CatalogNode::new("zos-jobs.html", "zos-jobs").with_children(vec![
                CatalogNode::new("zos-jobs_list.html", "list"),
                CatalogNode::new("zos-jobs_submit.html", "submit"),
            ]),
            CatalogNode::new("config.html", "config")
                .with_children(vec![CatalogNode::new("config_set.html", "set")]),
        ])]
    }

    fn loaded() -> CommandTreeState {
        let mut state = CommandTreeState::new();
        state.set_data(catalog());
        assert_eq!(state.refresh(), RefreshCompletion::Settled);
        state
    }

    fn visible_ids(state: &CommandTreeState) -> Vec<&str> {
        state.visible().into_iter().map(|(_, n)| n.id.as_str()).collect()
    }

    #[test]
    fn refresh_builds_collapsed_tree() {
        let state = loaded();
        assert_eq!(visible_ids(&state), vec!["zowe.html"]);
    }

    #[test]
    fn select_opens_ancestors_and_scroll_moves_cursor() {
        let mut state = loaded();
        state.select("zos-jobs_submit.html");
        state.scroll_into_view("zos-jobs_submit.html");
        assert_eq!(state.selected(), Some("zos-jobs_submit.html"));
        assert_eq!(
            visible_ids(&state),
            vec!["zowe.html", "zos-jobs.html", "zos-jobs_list.html", "zos-jobs_submit.html", "config.html"]
        );
        assert_eq!(state.cursor, 3);
    }

    #[test]
    fn select_in_flattened_list_needs_no_reveal() {
        let mut state = CommandTreeState::new();
        state.set_data(vec![
            CatalogNode::new("zos-jobs_list.html", "zowe zos-jobs list"),
            CatalogNode::new("config_set.html", "zowe config set"),
        ]);
        state.refresh();
        state.select("config_set.html");
        state.scroll_into_view("config_set.html");
        assert_eq!(state.selected(), Some("config_set.html"));
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn select_unknown_id_keeps_previous_selection() {
        let mut state = loaded();
        state.select("zowe.html");
        state.select("nope.html");
        assert_eq!(state.selected(), Some("zowe.html"));
    }

    #[test]
    fn filter_shows_matches_with_ancestors_and_subtree() {
        let mut state = loaded();
        state.refresh_filter(&|node: &CatalogNode, _| node.text == "zos-jobs");
        assert!(state.is_match("zos-jobs.html"));
        assert!(state.is_expanded("zowe.html"));
        assert!(!state.is_expanded("config.html"));
        // zos-jobs itself is not opened by the filter.
        assert_eq!(visible_ids(&state), vec!["zowe.html", "zos-jobs.html"]);

        state.expand("zos-jobs.html");
        assert_eq!(
            visible_ids(&state),
            vec!["zowe.html", "zos-jobs.html", "zos-jobs_list.html", "zos-jobs_submit.html"]
        );
    }

    #[test]
    fn filter_opens_every_ancestor_of_a_deep_match() {
        let mut state = loaded();
        state.refresh_filter(&|node: &CatalogNode, _| node.id == "config_set.html");
        assert!(state.is_expanded("zowe.html"));
        assert!(state.is_expanded("config.html"));
        assert!(!state.is_expanded("zos-jobs.html"));
        assert_eq!(visible_ids(&state), vec!["zowe.html", "config.html", "config_set.html"]);
    }

    #[test]
    fn filter_receives_top_level_flag() {
        let mut state = loaded();
        let seen = std::cell::RefCell::new(Vec::new());
        state.refresh_filter(&|node: &CatalogNode, top| {
            seen.borrow_mut().push((node.id.clone(), top));
            false
        });
        let seen = seen.into_inner();
        assert_eq!(seen[0], ("zowe.html".to_string(), true));
        assert!(seen[1..].iter().all(|(_, top)| !top));
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn empty_filter_hides_everything_until_cleared() {
        let mut state = loaded();
        state.refresh_filter(&|_, _| false);
        assert!(state.visible().is_empty());
        state.clear_filter();
        assert_eq!(visible_ids(&state), vec!["zowe.html"]);
    }

    #[test]
    fn set_data_drops_filter() {
        let mut state = loaded();
        state.refresh_filter(&|_, _| false);
        state.set_data(catalog());
        state.refresh();
        assert!(!state.is_filtered());
    }

    #[test]
    fn expand_all_then_collapse_all() {
        let mut state = loaded();
        state.expand_all();
        assert_eq!(state.visible().len(), 6);
        state.collapse_all();
        state.toggle("zowe.html");
        assert_eq!(visible_ids(&state), vec!["zowe.html", "zos-jobs.html", "config.html"]);
    }

    #[test]
    fn keyboard_navigation_and_enter() {
        let mut state = loaded();
        state.handle(&AppEvent::TreeNav(Direction::Right));
        state.handle(&AppEvent::TreeNav(Direction::Down));
        state.handle(&AppEvent::TreeNav(Direction::Down));
        let picked = state.handle(&AppEvent::Enter);
        assert_eq!(picked.as_deref(), Some("config.html"));
        assert_eq!(state.selected(), Some("config.html"));
    }

    #[test]
    fn collapse_clamps_cursor() {
        let mut state = loaded();
        state.expand_all();
        state.cursor = 5;
        state.collapse_all();
        assert_eq!(state.cursor, 0);
        state.handle(&AppEvent::TreeNav(Direction::Down));
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn flattened_data_is_a_flat_list() {
        let mut state = CommandTreeState::new();
        state.set_data(vec![
            CatalogNode::new("zos-jobs_list.html", "zowe zos-jobs list"),
            CatalogNode::new("config_set.html", "zowe config set"),
        ]);
        state.refresh();
        assert_eq!(state.visible().iter().map(|(d, _)| *d).collect::<Vec<_>>(), vec![0, 0]);
    }
}
