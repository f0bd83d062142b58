//! Test builders: ergonomic constructors for catalogs and help bundles.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use helptree_core::{AliasTable, Catalog, CatalogNode, HelpBundle};

// ---------------------------------------------------------------------------
// CatalogBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a single-root catalog.
///
/// Commands are given as space-separated paths below the root; missing
/// intermediate groups are created on the way.
///
/// # Example
///
/// ```rust
/// let bundle = CatalogBuilder::new("zowe")
///     .command("zos-jobs list")
///     .command("zos-jobs submit")
///     .alias("ls", &["list"])
///     .bundle();
/// ```
pub struct CatalogBuilder {
    root: CatalogNode,
    aliases: AliasTable,
    header: String,
    footer: String,
}

impl CatalogBuilder {
    pub fn new(root_text: &str) -> Self {
        Self {
            root: CatalogNode::new(format!("{root_text}.html"), root_text),
            aliases: AliasTable::new(),
            header: format!("{root_text} help"),
            footer: String::new(),
        }
    }

    pub fn command(mut self, path: &str) -> Self {
        let words: Vec<&str> = path.split(' ').collect();
        insert_path(&mut self.root.children, &words, 1);
        self
    }

    pub fn alias(mut self, word: &str, aliases: &[&str]) -> Self {
        self.aliases
            .insert(word, aliases.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn footer(mut self, footer: &str) -> Self {
        self.footer = footer.to_string();
        self
    }

    pub fn nodes(&self) -> Vec<CatalogNode> {
        vec![self.root.clone()]
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.nodes()).expect("builder always yields one root")
    }

    pub fn bundle(self) -> HelpBundle {
        HelpBundle {
            catalog: self.catalog(),
            header: self.header,
            footer: self.footer,
            aliases: self.aliases,
        }
    }
}

fn insert_path(children: &mut Vec<CatalogNode>, words: &[&str], depth: usize) {
    let id = format!("{}.html", words[..depth].join("_"));
    let pos = match children.iter().position(|c| c.id == id) {
        Some(pos) => pos,
        None => {
            children.push(CatalogNode::new(id, words[depth - 1]));
            children.len() - 1
        }
    };
    if depth < words.len() {
        insert_path(&mut children[pos].children, words, depth + 1);
    }
}

/// The catalog most harnesses share:
///
/// ```text
/// zowe
/// ├── zos-jobs ── list, submit, view
/// ├── zos-files ── list ── ds, uss
/// └── config ── set
/// ```
pub fn zowe_builder() -> CatalogBuilder {
    CatalogBuilder::new("zowe")
        .command("zos-jobs list")
        .command("zos-jobs submit")
        .command("zos-jobs view")
        .command("zos-files list ds")
        .command("zos-files list uss")
        .command("config set")
        .alias("ls", &["list"])
        .alias("zos-files", &["files", "zos-file"])
}
