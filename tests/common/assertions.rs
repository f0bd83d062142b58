//! Domain-specific assertion macros for helptree harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! query or phrase set under test.

/// Assert that the ids kept by a search are exactly `expected`, in order.
///
/// ```rust
/// assert_ids!(query_ids(bundle, "zos-jobs ls", false), ["zos-jobs_list.html"]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($actual:expr, [$($id:expr),* $(,)?]) => {{
        let actual: Vec<String> = $actual;
        let expected: Vec<String> = vec![$($id.to_string()),*];
        pretty_assertions::assert_eq!(actual, expected, "matched ids differ");
    }};
}

/// Assert that a [`helptree_core::PhraseSet`] holds exactly `expected`.
#[macro_export]
macro_rules! assert_phrases {
    ($set:expr, [$($p:expr),* $(,)?]) => {{
        let set: &helptree_core::PhraseSet = &$set;
        let expected: Vec<&str> = vec![$($p),*];
        pretty_assertions::assert_eq!(
            set.iter().collect::<Vec<_>>(),
            expected,
            "phrase set differs"
        );
    }};
}
