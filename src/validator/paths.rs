//! Flattened index of every key path in a defaults tree

use crate::document::Node;
use std::collections::BTreeMap;

/// Dot-path to bare key name, ordered by dot-path
pub type PathIndex = BTreeMap<String, String>;

/// Join a parent dot-path and a child key
#[must_use]
pub fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_owned()
    } else {
        format!("{parent}.{child}")
    }
}

/// Collect every mapping key path of `tree`, recursing into nested mappings
#[must_use]
pub fn flatten(tree: &Node) -> PathIndex {
    let mut index = PathIndex::new();
    collect(tree, "", &mut index);
    index
}

fn collect(node: &Node, prefix: &str, index: &mut PathIndex) {
    for entry in node.entries() {
        let full_path = join_path(prefix, &entry.key);
        if entry.value.is_mapping() {
            collect(&entry.value, &full_path, index);
        }
        index.insert(full_path, entry.key.clone());
    }
}
