//! Schema constraint checks: required fields, other schema keywords and
//! deprecated keys

use crate::document::{Entry, Node, NodeKind};
use crate::error::CheckError;
use crate::model::Finding;
use crate::validator::glob::is_ignored;
use crate::validator::paths::join_path;
use crate::validator::schema::{DeprecationMap, Schema, SchemaTypeMap};
use jsonschema::error::ValidationErrorKind;
use tracing::debug;

/// Run the schema evaluator over the user document and report violations
///
/// Type violations are dropped when `schema_types` is non-empty, since the
/// type-mismatch pass already reports them per path. A schema with an
/// external `$ref` is never evaluated: it yields a single error finding.
///
/// # Errors
///
/// Returns an error if:
/// - The user document cannot be converted to JSON
/// - The schema cannot be compiled
pub fn check_schema(
    user: &Node,
    schema: Option<&Schema>,
    ignore: &[String],
    schema_types: &SchemaTypeMap,
) -> Result<Vec<Finding>, CheckError> {
    let Some(schema) = schema else {
        return Ok(Vec::new());
    };

    if let Some(reference) = schema.blocked_ref() {
        debug!(reference, "schema evaluation blocked");
        return Ok(vec![Finding::error(
            0,
            "",
            format!(
                "Schema contains external $ref {reference:?}, which is not allowed; schema validation skipped"
            ),
        )]);
    }

    let instance = user.to_json()?;
    let validator = jsonschema::validator_for(schema.document())
        .map_err(|e| CheckError::schema(format!("cannot compile values schema: {e}")))?;

    let mut findings = Vec::new();
    for error in validator.iter_errors(&instance) {
        if !schema_types.is_empty() && matches!(error.kind, ValidationErrorKind::Type { .. }) {
            continue;
        }

        let mut segments = pointer_segments(&error.instance_path.to_string());
        if let ValidationErrorKind::Required { ref property } = error.kind {
            if let Some(name) = property.as_str() {
                segments.push(name.to_owned());
            }
        }

        let (path, line) = locate(user, &segments);
        if is_ignored(&path, ignore) {
            continue;
        }
        findings.push(Finding::error(line, path, format!("Schema validation: {error}")));
    }

    findings.extend(check_deprecated(user, &schema.deprecated(), ignore));
    Ok(findings)
}

/// Warn about every deprecated path the user document sets
///
/// Warnings are ordered by line, then by path.
#[must_use]
pub fn check_deprecated(user: &Node, deprecated: &DeprecationMap, ignore: &[String]) -> Vec<Finding> {
    let mut findings: Vec<Finding> = deprecated
        .iter()
        .filter(|&(path, _)| !is_ignored(path, ignore))
        .filter_map(|(path, guidance)| {
            let entry = find_entry(user, path)?;
            let mut message = format!("Deprecated key {path:?}");
            if let Some(guidance) = guidance.as_ref() {
                message.push_str(" - ");
                message.push_str(guidance);
            }
            Some(Finding::warning(entry.line, path.clone(), message))
        })
        .collect();
    findings.sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.key_path.cmp(&b.key_path)));
    findings
}

/// Find the mapping entry for a dot-path, walking mappings only
#[must_use]
pub fn find_entry<'a>(node: &'a Node, path: &str) -> Option<&'a Entry> {
    let mut current = node;
    let mut found = None;
    for key in path.split('.') {
        let entry = current.entry(key)?;
        current = &entry.value;
        found = Some(entry);
    }
    found
}

/// Split a JSON pointer such as `/image/tag` into unescaped segments
fn pointer_segments(pointer: &str) -> Vec<String> {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Resolve pointer segments against the user tree
///
/// Returns the dot-path, with sequence indices rendered as `[i]`, and the
/// line of the deepest node that exists. Segments past a missing node are
/// appended as plain keys.
fn locate(user: &Node, segments: &[String]) -> (String, usize) {
    let mut path = String::new();
    let mut line = user.line;
    let mut current = Some(user);

    for segment in segments {
        let next = current.and_then(|node| match node.kind {
            NodeKind::Mapping(_) => node.entry(segment).map(|entry| (entry.line, &entry.value)),
            NodeKind::Sequence(ref items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index))
                .map(|item| (item.line, item)),
            NodeKind::Scalar(_) => None,
        });

        match next {
            Some((found_line, node)) => {
                if node_is_item(current, segment) {
                    path = format!("{path}[{segment}]");
                } else {
                    path = join_path(&path, segment);
                }
                line = found_line;
                current = Some(node);
            }
            None => {
                path = join_path(&path, segment);
                current = None;
            }
        }
    }
    (path, line)
}

fn node_is_item(parent: Option<&Node>, segment: &str) -> bool {
    parent.is_some_and(Node::is_sequence) && segment.parse::<usize>().is_ok()
}
