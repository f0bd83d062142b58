//! Node matching: decides whether a catalog node survives a filter pass.
//!
//! The tree view calls the predicate once per node. A node matches when any
//! phrase from the active [`PhraseSet`] occurs in the node's full command
//! phrase and, in nested mode, the occurrence is not followed directly by a
//! space. That last rule keeps `zos-jobs` from matching `zos-jobs list`
//! (the hit would stop before another word), while `zos-jobs li` still
//! matches the `list` node because the hit ends inside a word.
//!
//! Only the byte right after the hit is checked, so a hit ending inside a
//! word also matches deeper descendants: `zos-jobs li` keeps
//! `zos-jobs list jobs` as well.

use crate::{
    alias::PhraseSet,
    types::{CatalogNode, ViewMode},
};

/// Match `node` against every phrase in `phrases`.
///
/// `is_top_level` is true for the node with no parent. In nested mode that is
/// the catalog root, which never matches; flattened lists have no root, so
/// the rule is skipped there.
pub fn matches(node: &CatalogNode, is_top_level: bool, phrases: &PhraseSet, mode: ViewMode) -> bool {
    if is_top_level && mode == ViewMode::Nested {
        return false;
    }

    let full = node.command_phrase();
    phrases.iter().any(|phrase| phrase_matches(&full, phrase, mode))
}

/// Test one phrase against a node's full command phrase. Only the first
/// occurrence of `phrase` is considered.
pub fn phrase_matches(full: &str, phrase: &str, mode: ViewMode) -> bool {
    let Some(idx) = full.find(phrase) else {
        return false;
    };
    if mode.is_flattened() {
        return true;
    }
    full.as_bytes().get(idx + phrase.len()) != Some(&b' ')
}

/// A filter predicate bound to one search: the phrase set and the mode it
/// was computed for.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    phrases: &'a PhraseSet,
    mode: ViewMode,
}

impl<'a> Matcher<'a> {
    pub fn new(phrases: &'a PhraseSet, mode: ViewMode) -> Self {
        Self { phrases, mode }
    }

    pub fn matches(&self, node: &CatalogNode, is_top_level: bool) -> bool {
        matches(node, is_top_level, self.phrases, self.mode)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
