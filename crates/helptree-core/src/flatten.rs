//! Flattener: collapses the nested catalog into a single list of leaves.

use crate::types::CatalogNode;

/// Collect every leaf under `nodes` in document order.
///
/// Branches are never emitted themselves. Each leaf becomes a fresh node with
/// the same id and the label `"<root_text> <command phrase>"`; the input tree
/// is left untouched.
pub fn flatten(nodes: &[CatalogNode], root_text: &str) -> Vec<CatalogNode> {
    let mut out = Vec::new();
    collect_leaves(nodes, root_text, &mut out);
    out
}

fn collect_leaves(nodes: &[CatalogNode], root_text: &str, out: &mut Vec<CatalogNode>) {
    for node in nodes {
        if node.is_leaf() {
            out.push(CatalogNode::new(
                node.id.clone(),
                format!("{} {}", root_text, node.command_phrase()),
            ));
        } else {
            collect_leaves(&node.children, root_text, out);
        }
    }
}
