//! Search integration harness.
//!
//! # What this covers
//!
//! - **Alias expansion**: compounding substitution over the accumulated
//!   phrase list, in the exact order the matcher sees it.
//! - **Nested matching**: the root never matches, and a hit that stops right
//!   before another word is rejected.
//! - **Flattened matching**: any occurrence matches; only leaves exist.
//! - **Property: original phrase first**: for any query, expansion yields the
//!   query itself as the first phrase.
//! - **Property: root never matches** in the nested view.
//! - **Property: flattened hits are leaves** of the nested catalog.
//!
//! # Running
//!
//! ```sh
//! cargo test --test search_harness
//! ```

mod common;
use common::*;

use helptree::headless::query_ids;
use helptree_core::{matches, AliasTable, PhraseSet, ViewMode};
use proptest::prelude::*;
use rstest::rstest;

// ---------------------------------------------------------------------------
// Alias expansion
// ---------------------------------------------------------------------------

#[test]
fn expansion_compounds_left_to_right() {
    let bundle = zowe_builder().bundle();
    assert_phrases!(
        bundle.aliases.expand("zos-files ls"),
        [
            "zos-files ls",
            "files ls",
            "zos-file ls",
            "zos-files list",
            "files list",
            "zos-file list",
        ]
    );
}

#[test]
fn expansion_keeps_duplicates() {
    let table: AliasTable = [("a", vec!["b"]), ("b", vec!["a"])].into_iter().collect();
    assert_phrases!(table.expand("a b"), ["a b", "b b", "a a", "b a"]);
}

#[test]
fn unknown_words_pass_through() {
    let bundle = zowe_builder().bundle();
    assert_phrases!(bundle.aliases.expand("config set"), ["config set"]);
}

// ---------------------------------------------------------------------------
// Matching through the coordinator
// ---------------------------------------------------------------------------

#[rstest]
#[case::alias("zos-jobs ls", false, &["zos-jobs_list.html"])]
#[case::root_prefix_stripped("zowe zos-jobs", false, &["zos-jobs.html"])]
#[case::word_boundary("list", false, &["zos-jobs_list.html", "zos-files_list.html"])]
#[case::inside_word("zos-jobs li", false, &["zos-jobs_list.html"])]
#[case::alias_on_first_word("zos-files ls", false, &["zos-files_list.html"])]
#[case::root_alone_matches_nothing("zowe", false, &[])]
#[case::flattened_anywhere("zos-files ls", true, &["zos-files_list_ds.html", "zos-files_list_uss.html"])]
#[case::flattened_prefix("zos-jobs", true, &["zos-jobs_list.html", "zos-jobs_submit.html", "zos-jobs_view.html"])]
fn query_results(#[case] query: &str, #[case] list_view: bool, #[case] expected: &[&str]) {
    let ids = query_ids(zowe_builder().bundle(), query, list_view);
    pretty_assertions::assert_eq!(ids, expected.iter().map(|s| s.to_string()).collect::<Vec<_>>());
}

#[test]
fn assert_ids_macro_reads_well() {
    assert_ids!(
        query_ids(zowe_builder().bundle(), "zowe config set", false),
        ["config_set.html"]
    );
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("zos-jobs".to_string()),
        Just("zos-files".to_string()),
        Just("ls".to_string()),
        Just("list".to_string()),
        Just("config".to_string()),
        "[a-z-]{0,6}",
    ]
}

fn query() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 0..4).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn original_phrase_always_first(q in query()) {
        let bundle = zowe_builder().bundle();
        let phrases = bundle.aliases.expand(&q);
        prop_assert_eq!(phrases.as_slice().first().map(String::as_str), Some(q.as_str()));
    }

    #[test]
    fn root_never_matches_nested(q in query()) {
        let bundle = zowe_builder().bundle();
        let phrases = bundle.aliases.expand(&q);
        prop_assert!(!matches(bundle.catalog.root(), true, &phrases, ViewMode::Nested));
    }

    #[test]
    fn nested_hits_never_include_root(q in query()) {
        // A blank query clears the filter instead of matching.
        prop_assume!(!q.trim().is_empty());
        let ids = query_ids(zowe_builder().bundle(), &q, false);
        prop_assert!(!ids.iter().any(|id| id == "zowe.html"));
    }

    #[test]
    fn flattened_hits_are_leaves(q in query()) {
        let bundle = zowe_builder().bundle();
        let catalog = bundle.catalog.clone();
        for id in query_ids(bundle, &q, true) {
            let node = catalog.find(&id);
            prop_assert!(node.is_some_and(|n| n.is_leaf()), "{} is not a leaf", id);
        }
    }

    #[test]
    fn flattened_is_at_least_as_permissive(q in "[a-z-]{1,8}") {
        // Single words without aliases: every nested leaf hit is also a flat hit.
        let phrases = PhraseSet::single(q.clone());
        let bundle = zowe_builder().bundle();
        for leaf in bundle.catalog.flattened() {
            if matches(&leaf, false, &phrases, ViewMode::Nested) {
                prop_assert!(matches(&leaf, false, &phrases, ViewMode::Flattened));
            }
        }
    }
}
