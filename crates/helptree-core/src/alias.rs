//! Alias expansion: turns a typed query into every phrasing reachable by
//! swapping in known word aliases.
//!
//! Expansion compounds left to right. Each aliased word position is
//! substituted into every phrase accumulated so far, and the new phrases are
//! appended after the existing ones:
//!
//! ```text
//! query "a b", aliases { a: [x], b: [y, z] }
//!
//! start        [a b]
//! position 0   [a b, x b]
//! position 1   [a b, x b, a y, a z, x y, x z]
//! ```
//!
//! The output is not deduplicated and growth is not bounded; an alias table
//! with many aliased positions produces exponentially many phrases.

use serde::Deserialize;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// AliasTable
// ---------------------------------------------------------------------------

/// Word → interchangeable words. A word with no entry has no alternatives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AliasTable(HashMap<String, Vec<String>>);

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: impl Into<String>, aliases: Vec<String>) {
        self.0.insert(word.into(), aliases);
    }

    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.0.get(word).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Enumerate every phrasing of `query` reachable through this table.
    ///
    /// The query is split on the space character only, so an empty query
    /// yields the single empty phrase and doubled spaces yield empty words.
    /// The original phrasing always comes first.
    pub fn expand(&self, query: &str) -> PhraseSet {
        let words: Vec<&str> = query.split(' ').collect();
        let mut variants: Vec<Vec<&str>> = vec![words.clone()];

        for (pos, word) in words.iter().enumerate() {
            let Some(aliases) = self.0.get(*word) else {
                continue;
            };
            let mut added = Vec::with_capacity(variants.len() * aliases.len());
            for existing in &variants {
                for alias in aliases {
                    let mut next = existing.clone();
                    next[pos] = alias.as_str();
                    added.push(next);
                }
            }
            variants.extend(added);
        }

        let phrases: Vec<String> = variants.into_iter().map(|w| w.join(" ")).collect();
        tracing::trace!(query, phrases = phrases.len(), "alias expansion");
        PhraseSet(phrases)
    }
}

impl<W, A> FromIterator<(W, Vec<A>)> for AliasTable
where
    W: Into<String>,
    A: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (W, Vec<A>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(w, a)| (w.into(), a.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// PhraseSet
// ---------------------------------------------------------------------------

/// Ordered candidate phrases for one query. Rebuilt on every search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseSet(Vec<String>);

impl PhraseSet {
    /// A phrase set holding only `phrase`, no alias expansion.
    pub fn single(phrase: impl Into<String>) -> Self {
        Self(vec![phrase.into()])
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.0.iter().any(|p| p == phrase)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for PhraseSet {
    fn from(phrases: Vec<String>) -> Self {
        Self(phrases)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(entries: &[(&str, &[&str])]) -> AliasTable {
        entries
            .iter()
            .map(|(w, a)| (*w, a.to_vec()))
            .collect()
    }

    #[test]
    fn no_aliases_returns_query_only() {
        assert_eq!(AliasTable::new().expand("status").into_vec(), vec!["status"]);
    }

    #[test]
    fn single_alias_appends_after_original() {
        let t = table(&[("ls", &["list"])]);
        assert_eq!(t.expand("ls").into_vec(), vec!["ls", "list"]);
    }

    #[test]
    fn two_positions_compound_in_order() {
        let t = table(&[("a", &["x"]), ("b", &["y", "z"])]);
        assert_eq!(
            t.expand("a b").into_vec(),
            vec!["a b", "x b", "a y", "a z", "x y", "x z"]
        );
    }

    #[test]
    fn repeated_word_is_substituted_per_position() {
        let t = table(&[("ls", &["list"])]);
        assert_eq!(
            t.expand("ls ls").into_vec(),
            vec!["ls ls", "list ls", "ls list", "list list"]
        );
    }

    #[test]
    fn coinciding_chains_keep_duplicates() {
        let t = table(&[("a", &["b"]), ("b", &["b"])]);
        let phrases = t.expand("a b").into_vec();
        assert_eq!(phrases, vec!["a b", "b b", "a b", "b b"]);
    }

    #[test]
    fn empty_query_is_single_empty_phrase() {
        let t = table(&[("ls", &["list"])]);
        assert_eq!(t.expand("").into_vec(), vec![""]);
    }

    #[test]
    fn splitting_is_on_space_only() {
        let t = table(&[("ls", &["list"])]);
        // Tab is not a separator, so "ls\tx" is a single unaliased word.
        assert_eq!(t.expand("ls\tx").into_vec(), vec!["ls\tx"]);
        // Doubled spaces keep an empty word in between.
        assert_eq!(t.expand("ls  x").into_vec(), vec!["ls  x", "list  x"]);
    }

    #[test]
    fn empty_alias_list_adds_nothing() {
        let t = table(&[("ls", &[])]);
        assert_eq!(t.expand("ls").into_vec(), vec!["ls"]);
    }

    #[test]
    fn deserialises_from_json_object() {
        let t: AliasTable = serde_json::from_str(r#"{"ls":["list","l"]}"#).unwrap();
        assert_eq!(t.get("ls"), Some(&["list".to_string(), "l".to_string()][..]));
        assert_eq!(t.get("rm"), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn word() -> impl Strategy<Value = String> {
            prop_oneof![Just("ls".to_string()), Just("rm".to_string()), "[a-z]{0,3}"]
        }

        proptest! {
            #[test]
            fn phrase_count_is_product_of_choices(words in prop::collection::vec(word(), 1..5)) {
                let t = table(&[("ls", &["list", "l"]), ("rm", &["delete"])]);
                let expected: usize = words
                    .iter()
                    .map(|w| 1 + t.get(w).map_or(0, <[String]>::len))
                    .product();
                let phrases = t.expand(&words.join(" "));
                prop_assert_eq!(phrases.len(), expected);
                prop_assert_eq!(phrases.as_slice()[0].clone(), words.join(" "));
            }
        }
    }
}
