//! Type mismatch detection
//!
//! Compares the tag of every user value with its default, falling back to
//! the schema's declared types where the default is null or missing.

use crate::document::Node;
use crate::model::Finding;
use crate::validator::SubchartDefaults;
use crate::validator::compat::{
    compatible, compatible_with_schema, friendly_types, is_quantity_path, is_string_numeric_pair,
};
use crate::validator::glob::is_ignored;
use crate::validator::paths::join_path;
use crate::validator::schema::SchemaTypeMap;
use crate::validator::unknown::{KeyScope, detect_unknown_keys};

/// Shared inputs of one type-mismatch walk
#[derive(Debug, Clone, Copy)]
pub struct TypeScope<'a> {
    /// Declared schema types, used where the default is null or absent
    pub schema_types: Option<&'a SchemaTypeMap>,
    /// Subchart defaults, consulted for top-level keys only
    pub subcharts: Option<&'a SubchartDefaults>,
    pub ignore: &'a [String],
}

/// Report type mismatches between user values and defaults under `prefix`
#[must_use]
pub fn detect_type_mismatches(
    user: &Node,
    defaults: &Node,
    scope: &TypeScope<'_>,
    prefix: &str,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    walk(user, defaults, scope, prefix, &mut findings);
    findings
}

fn walk(user: &Node, defaults: &Node, scope: &TypeScope<'_>, prefix: &str, findings: &mut Vec<Finding>) {
    if !user.is_mapping() || !defaults.is_mapping() {
        return;
    }

    for entry in user.entries() {
        let full_path = join_path(prefix, &entry.key);
        if is_ignored(&full_path, scope.ignore) {
            continue;
        }
        let value = &entry.value;

        if prefix.is_empty() {
            if let Some(sub_defaults) = scope.subcharts.and_then(|subs| subs.get(&entry.key)) {
                let sub_scope = TypeScope {
                    subcharts: None,
                    ..*scope
                };
                walk(value, sub_defaults, &sub_scope, &full_path, findings);
                continue;
            }
        }

        let default_value = match defaults.get(&entry.key) {
            Some(default_value) if !default_value.is_null() => default_value,
            // No usable default: the schema is the only source of an expected type.
            _ => {
                check_against_schema(value, &full_path, scope, findings);
                continue;
            }
        };

        if value.is_null() {
            continue;
        }

        if default_value.is_mapping() && value.is_mapping() {
            if !default_value.entries().is_empty() {
                walk(value, default_value, scope, &full_path, findings);
            }
            continue;
        }

        if default_value.is_sequence() && value.is_sequence() {
            check_sequence(value, default_value, scope, &full_path, findings);
            continue;
        }

        if is_quantity_path(&full_path) && is_string_numeric_pair(&value.tag, &default_value.tag) {
            continue;
        }

        if !compatible(&value.tag, &default_value.tag) {
            findings.push(Finding::error(
                value.line,
                full_path.clone(),
                mismatch_message(&full_path, &default_value.tag.to_string(), value),
            ));
            continue;
        }

        if !default_value.is_scalar() && !value.is_scalar() && default_value.kind_name() != value.kind_name() {
            findings.push(Finding::error(
                value.line,
                full_path.clone(),
                format!(
                    "Type mismatch at {full_path:?}: expected {}, got {}",
                    default_value.kind_name(),
                    value.kind_name()
                ),
            ));
        }
    }
}

fn check_against_schema(value: &Node, path: &str, scope: &TypeScope<'_>, findings: &mut Vec<Finding>) {
    let Some(declared) = scope.schema_types.and_then(|types| types.get(path)) else {
        return;
    };
    if value.is_null() {
        return;
    }

    let (ok, allowed) = compatible_with_schema(&value.tag, declared);
    // Type names this checker does not model are left to the schema evaluator.
    if ok || allowed.is_empty() {
        return;
    }
    if is_quantity_path(path) && allowed.iter().any(|tag| is_string_numeric_pair(&value.tag, tag)) {
        return;
    }

    findings.push(Finding::error(
        value.line,
        path,
        mismatch_message(path, &friendly_types(&allowed), value),
    ));
}

/// Check each mapping element of a user list against the first default element.
fn check_sequence(
    user_seq: &Node,
    default_seq: &Node,
    scope: &TypeScope<'_>,
    path: &str,
    findings: &mut Vec<Finding>,
) {
    let Some(template) = default_seq.items().first() else {
        return;
    };
    if !template.is_mapping() || template.entries().is_empty() {
        return;
    }

    let key_scope = KeyScope::bare(scope.ignore);
    for (index, element) in user_seq.items().iter().enumerate() {
        if !element.is_mapping() {
            continue;
        }
        let element_path = format!("{path}[{index}]");
        findings.extend(detect_unknown_keys(element, template, &key_scope, &element_path));
        walk(element, template, scope, &element_path, findings);
    }
}

fn mismatch_message(path: &str, expected: &str, value: &Node) -> String {
    match value.literal() {
        Some(literal) => format!(
            "Type mismatch at {path:?}: expected {expected}, got {} ({literal:?})",
            value.tag
        ),
        None => format!("Type mismatch at {path:?}: expected {expected}, got {}", value.tag),
    }
}
