//! Unknown key detection
//!
//! Walks the user tree and reports keys that neither the defaults tree nor
//! the schema declares.

use crate::document::Node;
use crate::model::Finding;
use crate::validator::SubchartDefaults;
use crate::validator::glob::is_ignored;
use crate::validator::paths::{PathIndex, join_path};
use crate::validator::schema::SchemaKeySet;
use crate::validator::suggest::suggest;
use std::collections::BTreeSet;

/// Shared inputs of one unknown-key walk
#[derive(Debug, Clone, Copy)]
pub struct KeyScope<'a> {
    /// Paths declared by the schema, accepted even without a default
    pub schema_keys: Option<&'a SchemaKeySet>,
    /// Subchart defaults, consulted for top-level keys only
    pub subcharts: Option<&'a SubchartDefaults>,
    pub ignore: &'a [String],
    /// Flattened root defaults for deep suggestions
    pub index: Option<&'a PathIndex>,
}

impl<'a> KeyScope<'a> {
    /// Scope with only ignore patterns: no schema, no subcharts, sibling suggestions only
    #[must_use]
    pub const fn bare(ignore: &'a [String]) -> Self {
        Self {
            schema_keys: None,
            subcharts: None,
            ignore,
            index: None,
        }
    }
}

/// Report user keys under `prefix` that `defaults` does not know about
///
/// Non-mapping user nodes produce no findings.
#[must_use]
pub fn detect_unknown_keys(
    user: &Node,
    defaults: &Node,
    scope: &KeyScope<'_>,
    prefix: &str,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    walk(user, defaults, scope, prefix, &mut findings);
    findings
}

fn walk(user: &Node, defaults: &Node, scope: &KeyScope<'_>, prefix: &str, findings: &mut Vec<Finding>) {
    if !user.is_mapping() {
        return;
    }

    for entry in user.entries() {
        let full_path = join_path(prefix, &entry.key);
        if is_ignored(&full_path, scope.ignore) {
            continue;
        }

        if prefix.is_empty() {
            if let Some(sub_defaults) = scope.subcharts.and_then(|subs| subs.get(&entry.key)) {
                if entry.value.is_mapping() {
                    let sub_scope = KeyScope {
                        schema_keys: None,
                        subcharts: None,
                        ..*scope
                    };
                    walk(&entry.value, sub_defaults, &sub_scope, &full_path, findings);
                }
                continue;
            }
        }

        match defaults.get(&entry.key) {
            Some(default_value) => {
                // An empty mapping default accepts any structure below it.
                if entry.value.is_mapping()
                    && default_value.is_mapping()
                    && !default_value.entries().is_empty()
                {
                    walk(&entry.value, default_value, scope, &full_path, findings);
                }
            }
            None if scope.schema_keys.is_some_and(|keys| keys.contains(&full_path)) => {
                if entry.value.is_mapping() {
                    walk(&entry.value, &Node::empty_mapping(), scope, &full_path, findings);
                }
            }
            None => {
                let siblings: BTreeSet<&str> =
                    defaults.entries().iter().map(|e| e.key.as_str()).collect();
                let suggestion = suggest(prefix, &entry.key, &siblings, scope.index);
                findings.push(
                    Finding::error(entry.line, full_path.clone(), format!("Unknown key {full_path:?}"))
                        .with_suggestion(suggestion),
                );
            }
        }
    }
}
