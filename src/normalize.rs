//! Canonical ordering of HTTP method lists.
//!
//! [`normalize`] walks a document tree depth-first and rebuilds it, sorting
//! every `methods` sequence it meets into the canonical verb order
//! `GET, HEAD, POST, PUT, DELETE, TRACE, CONNECT`. Everything else is copied
//! structurally unchanged. The function is total: a subtree without the
//! expected shape is passed through as-is.
//!
//! Verbs outside the canonical list rank after every known verb, and the
//! sort is stable, so unknown verbs keep their original relative order.
//! Canonical order is a fixed point of the sort, which makes normalization
//! idempotent.

use crate::constants::{METHOD_FIELD, METHODS_KEY};
use crate::tree::{Mapping, Tree};

/// Canonical verb order used to sort method lists.
pub const METHOD_ORDER: [&str; 7] = ["get", "head", "post", "put", "delete", "trace", "connect"];

/// Rank of a verb in [`METHOD_ORDER`], compared case-insensitively.
///
/// Unknown verbs rank after all known ones.
#[must_use]
pub fn method_rank(verb: &str) -> usize {
    METHOD_ORDER
        .iter()
        .position(|known| known.eq_ignore_ascii_case(verb))
        .unwrap_or(METHOD_ORDER.len())
}

/// Normalize a document tree.
///
/// Non-mapping input is returned unchanged.
#[must_use]
pub fn normalize(tree: Tree) -> Tree {
    match tree {
        Tree::Mapping(map) => Tree::Mapping(normalize_mapping(map)),
        other => other,
    }
}

fn normalize_mapping(map: Mapping) -> Mapping {
    map.into_iter()
        .map(|(key, value)| {
            let value = match value {
                Tree::Sequence(items) if key == METHODS_KEY => Tree::Sequence(sort_methods(items)),
                Tree::Mapping(inner) => Tree::Mapping(normalize_mapping(inner)),
                Tree::Sequence(items) if items.first().is_some_and(Tree::is_mapping) => {
                    Tree::Sequence(items.into_iter().map(normalize).collect())
                }
                other => other,
            };
            (key, value)
        })
        .collect()
}

/// Stable sort of method descriptors by the rank of their `method` field.
fn sort_methods(mut methods: Vec<Tree>) -> Vec<Tree> {
    methods.sort_by_cached_key(|entry| match entry.get(METHOD_FIELD).and_then(Tree::as_str) {
        Some(verb) => method_rank(verb),
        None => {
            tracing::warn!("Method entry without a `{}` field sorts last", METHOD_FIELD);
            METHOD_ORDER.len()
        }
    });
    methods
}
