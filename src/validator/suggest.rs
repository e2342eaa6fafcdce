//! "Did you mean" suggestions for unknown keys
//!
//! Sibling keys are tried first, and a sibling hit always wins over the
//! deep search of the whole defaults tree, however strong the deep match.

use crate::validator::paths::{PathIndex, join_path};
use std::collections::BTreeSet;

/// Largest accepted edit distance is one below this
const MAX_DISTANCE: usize = 4;

/// Propose the key path the user most likely meant for the unknown `key`
/// under `parent`
///
/// `siblings` are the known key names under the same parent; `index`, when
/// given, enables the deep search across the whole defaults tree.
#[must_use]
pub fn suggest(
    parent: &str,
    key: &str,
    siblings: &BTreeSet<&str>,
    index: Option<&PathIndex>,
) -> Option<String> {
    if let Some(sibling) = closest_sibling(key, siblings) {
        return Some(join_path(parent, sibling));
    }
    let unknown_path = join_path(parent, key);
    index.and_then(|paths| deep_suggestion(&unknown_path, key, paths))
}

/// Closest sibling name by case-insensitive edit distance, if under the threshold
#[must_use]
pub fn closest_sibling<'a>(key: &str, siblings: &BTreeSet<&'a str>) -> Option<&'a str> {
    let key = key.to_lowercase();
    let mut best = None;
    let mut best_distance = MAX_DISTANCE;
    for &candidate in siblings {
        let distance = levenshtein(&key, &candidate.to_lowercase());
        if distance < best_distance {
            best_distance = distance;
            best = Some(candidate);
        }
    }
    best
}

/// Search every indexed path: exact rename, then near match, then containment.
fn deep_suggestion(unknown_path: &str, leaf: &str, index: &PathIndex) -> Option<String> {
    let leaf = leaf.to_lowercase();
    let leaf_len = leaf.chars().count();

    let mut exact: Option<&str> = None;
    let mut near: Option<&str> = None;
    let mut near_distance = MAX_DISTANCE;
    let mut contained: Option<&str> = None;
    let mut contained_diff = usize::MAX;

    for (path, name) in index {
        if path == unknown_path {
            continue;
        }
        let name = name.to_lowercase();

        if name == leaf {
            if exact.is_none_or(|best| path.len() < best.len()) {
                exact = Some(path);
            }
            continue;
        }

        let distance = levenshtein(&leaf, &name);
        if distance < near_distance {
            near_distance = distance;
            near = Some(path);
        }

        if name.contains(&leaf) || leaf.contains(&name) {
            let name_len = name.chars().count();
            let shorter = leaf_len.min(name_len);
            let diff = leaf_len.abs_diff(name_len);
            if diff <= shorter / 2 && diff < contained_diff {
                contained_diff = diff;
                contained = Some(path);
            }
        }
    }

    exact.or(near).or(contained).map(str::to_owned)
}

/// Levenshtein edit distance over Unicode scalar values
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, a_char) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, &b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j] + cost)
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        core::mem::swap(&mut previous, &mut current);
    }
    previous[b_chars.len()]
}
