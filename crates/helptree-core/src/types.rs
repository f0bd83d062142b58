//! Core types for helptree-core.
//!
//! This module defines the data structures shared across every layer: the
//! [`CatalogNode`] that makes up the help tree, and the [`ViewMode`] flag that
//! selects between the nested and flattened presentations.

use serde::{Deserialize, Deserializer, Serialize};

/// Fixed suffix every node identifier carries (`job_list.html`).
pub const ID_SUFFIX: &str = ".html";

/// Character that stands in for a space inside an identifier.
pub const ID_SEPARATOR: char = '_';

/// One topic in the help catalog.
///
/// The `id` encodes the node's full command path: `zos-jobs_list_jobs.html`
/// describes the command `zos-jobs list jobs`. Nodes are built once when the
/// bundle is loaded and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogNode {
    /// Opaque identifier, `<path-with-separator><suffix>`.
    pub id: String,
    /// Human-readable label shown in the tree.
    pub text: String,
    /// Ordered children. Empty for leaves; `null` or absent in JSON also
    /// deserialises to empty.
    #[serde(default, deserialize_with = "nullable_children")]
    pub children: Vec<CatalogNode>,
}

impl CatalogNode {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<CatalogNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The node's full command phrase, derived from its identifier.
    pub fn command_phrase(&self) -> String {
        command_phrase(&self.id)
    }
}

/// Strip the fixed suffix from `id` and turn separators into spaces.
///
/// The last `ID_SUFFIX.len()` characters are dropped whether or not they
/// actually spell the suffix; an id shorter than that yields `""`.
pub fn command_phrase(id: &str) -> String {
    let keep = id.chars().count().saturating_sub(ID_SUFFIX.len());
    id.chars()
        .take(keep)
        .map(|c| if c == ID_SEPARATOR { ' ' } else { c })
        .collect()
}

/// Append the fixed suffix to a bare page name (`job_list` → `job_list.html`).
pub fn page_id(page: &str) -> String {
    format!("{page}{ID_SUFFIX}")
}

fn nullable_children<'de, D>(deserializer: D) -> Result<Vec<CatalogNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<CatalogNode>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Which presentation of the catalog is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Hierarchical tree with a single visible root.
    #[default]
    Nested,
    /// Leaves only, each labelled with its full command path.
    Flattened,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Nested => ViewMode::Flattened,
            ViewMode::Flattened => ViewMode::Nested,
        }
    }

    pub fn is_flattened(self) -> bool {
        self == ViewMode::Flattened
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Nested => write!(f, "Tree View"),
            ViewMode::Flattened => write!(f, "List View"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
