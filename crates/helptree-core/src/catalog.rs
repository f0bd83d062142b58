//! Catalog: the immutable help tree plus the bundle file it is loaded from.
//!
//! A [`HelpBundle`] is the JSON document produced by the docs generator:
//!
//! ```json
//! {
//!   "header": "Zowe CLI 2.0 Help",
//!   "footer": "Generated 2024-01-15",
//!   "aliases": { "ls": ["list"] },
//!   "tree": [ { "id": "zowe.html", "text": "zowe", "children": [ ... ] } ]
//! }
//! ```
//!
//! [`Catalog::new`] checks the single-root invariant once; everything
//! downstream can then call [`Catalog::root`] without an `Option`.

use crate::{alias::AliasTable, flatten::flatten, types::CatalogNode};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has no root node")]
    NoRoot,
    #[error("catalog must have exactly one root node, found {0}")]
    MultipleRoots(usize),
    #[error("failed to read help bundle {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("help bundle is not valid JSON")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The nested help tree with exactly one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    nodes: Vec<CatalogNode>,
}

impl Catalog {
    pub fn new(nodes: Vec<CatalogNode>) -> Result<Self, CatalogError> {
        match nodes.len() {
            0 => Err(CatalogError::NoRoot),
            1 => Ok(Self { nodes }),
            n => Err(CatalogError::MultipleRoots(n)),
        }
    }

    pub fn root(&self) -> &CatalogNode {
        &self.nodes[0]
    }

    /// The top-level node list (always a single root).
    pub fn nodes(&self) -> &[CatalogNode] {
        &self.nodes
    }

    /// Depth-first lookup by identifier.
    pub fn find(&self, id: &str) -> Option<&CatalogNode> {
        find_in(&self.nodes, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Leaf-only presentation labelled with the root's display text.
    pub fn flattened(&self) -> Vec<CatalogNode> {
        flatten(&self.nodes, &self.root().text)
    }
}

fn find_in<'a>(nodes: &'a [CatalogNode], id: &str) -> Option<&'a CatalogNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_in(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Identifiers of every ancestor of `id` within `nodes`, root first. `None`
/// when `id` is absent; a top-level node has an empty path.
pub fn ancestor_path(nodes: &[CatalogNode], id: &str) -> Option<Vec<String>> {
    let mut path = Vec::new();
    ancestors_in(nodes, id, &mut path).then_some(path)
}

/// Push ancestor ids onto `path` while descending; returns `true` once `id`
/// has been found, leaving exactly its ancestors on `path`.
fn ancestors_in(nodes: &[CatalogNode], id: &str, path: &mut Vec<String>) -> bool {
    for node in nodes {
        if node.id == id {
            return true;
        }
        path.push(node.id.clone());
        if ancestors_in(&node.children, id, path) {
            return true;
        }
        path.pop();
    }
    false
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawBundle {
    #[serde(default)]
    header: String,
    #[serde(default)]
    footer: String,
    #[serde(default)]
    aliases: AliasTable,
    tree: Vec<CatalogNode>,
}

/// Everything the viewer needs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct HelpBundle {
    pub header: String,
    pub footer: String,
    pub aliases: AliasTable,
    pub catalog: Catalog,
}

impl HelpBundle {
    pub fn from_json_str(src: &str) -> Result<Self, CatalogError> {
        let raw: RawBundle = serde_json::from_str(src)?;
        Ok(Self {
            header: raw.header,
            footer: raw.footer,
            aliases: raw.aliases,
            catalog: Catalog::new(raw.tree)?,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let src = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bundle = Self::from_json_str(&src)?;
        tracing::debug!(
            path = %path.display(),
            root = %bundle.catalog.root().id,
            aliases = bundle.aliases.len(),
            "help bundle loaded"
        );
        Ok(bundle)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
