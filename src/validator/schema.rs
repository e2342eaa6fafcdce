//! Schema introspection and external-reference sandboxing
//!
//! Only `properties`, `type`, `deprecated`, `description` and same-document
//! `$ref`s are read here.
//! Everything else in the schema is left to the `jsonschema` evaluator.

use crate::error::CheckError;
use crate::validator::paths::join_path;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

/// Dot-path to allowed JSON Schema type names, e.g. `["integer", "null"]`
pub type SchemaTypeMap = BTreeMap<String, Vec<String>>;

/// Every property dot-path declared in the schema
pub type SchemaKeySet = BTreeSet<String>;

/// Deprecated dot-path to optional replacement guidance
pub type DeprecationMap = BTreeMap<String, Option<String>>;

/// A parsed values schema
#[derive(Debug, Clone)]
pub struct Schema {
    document: Value,
    blocked_ref: Option<String>,
}

impl Schema {
    /// Parse raw schema bytes
    ///
    /// Absent or zero-length bytes mean there is no schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid JSON.
    pub fn parse(bytes: Option<&[u8]>) -> Result<Option<Self>, CheckError> {
        let Some(bytes) = bytes.filter(|bytes| !bytes.is_empty()) else {
            return Ok(None);
        };
        let document: Value = serde_json::from_slice(bytes)
            .map_err(|e| CheckError::schema(format!("malformed values schema: {e}")))?;
        Ok(Some(Self::from_value(document)))
    }

    /// Wrap an already-parsed schema document
    #[must_use]
    pub fn from_value(document: Value) -> Self {
        let blocked_ref = find_external_ref(&document).map(str::to_owned);
        Self {
            document,
            blocked_ref,
        }
    }

    #[must_use]
    #[inline]
    pub const fn document(&self) -> &Value {
        &self.document
    }

    /// The first external `$ref` found, if the schema must not be evaluated
    #[must_use]
    #[inline]
    pub fn blocked_ref(&self) -> Option<&str> {
        self.blocked_ref.as_deref()
    }

    /// All declared property paths
    #[must_use]
    pub fn keys(&self) -> SchemaKeySet {
        let mut keys = SchemaKeySet::new();
        walk_properties(&self.document, &mut |path, _| {
            keys.insert(path.to_owned());
        });
        keys
    }

    /// Declared types per property path; empty for a blocked schema
    #[must_use]
    pub fn types(&self) -> SchemaTypeMap {
        let mut types = SchemaTypeMap::new();
        if self.blocked_ref.is_some() {
            return types;
        }
        walk_properties(&self.document, &mut |path, definition| {
            let declared: Vec<String> = match definition.get("type") {
                Some(&Value::String(ref name)) => vec![name.clone()],
                Some(&Value::Array(ref names)) => names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect(),
                _ => Vec::new(),
            };
            if !declared.is_empty() {
                types.insert(path.to_owned(), declared);
            }
        });
        types
    }

    /// Deprecated property paths with their guidance; empty for a blocked schema
    #[must_use]
    pub fn deprecated(&self) -> DeprecationMap {
        let mut deprecated = DeprecationMap::new();
        if self.blocked_ref.is_some() {
            return deprecated;
        }
        walk_properties(&self.document, &mut |path, definition| {
            let marker = match definition.get("deprecated") {
                Some(&Value::Bool(true)) => Some(None),
                Some(&Value::String(ref note)) if !note.trim().is_empty() => Some(Some(note.clone())),
                _ => None,
            };
            if let Some(note) = marker {
                let guidance = definition
                    .get("description")
                    .and_then(Value::as_str)
                    .filter(|text| !text.is_empty())
                    .map(str::to_owned)
                    .or(note);
                deprecated.insert(path.to_owned(), guidance);
            }
        });
        deprecated
    }
}

/// Visit every property definition under nested `properties`
///
/// Same-document `$ref`s are followed. Keywords written next to a `$ref`
/// take precedence over the target's, and a reference already being
/// expanded on the current path is not expanded again.
fn walk_properties<F>(root: &Value, visit: &mut F)
where
    F: FnMut(&str, &Map<String, Value>),
{
    let Some(schema) = root.as_object() else {
        return;
    };
    let mut active = Vec::new();
    let reference = local_ref(schema).map(str::to_owned);
    let effective = match reference {
        Some(ref target) => with_target(root, target, schema),
        None => Cow::Borrowed(schema),
    };
    active.extend(reference);
    walk_definitions(root, &effective, "", &mut active, visit);
}

fn walk_definitions<F>(
    root: &Value,
    schema: &Map<String, Value>,
    prefix: &str,
    active: &mut Vec<String>,
    visit: &mut F,
) where
    F: FnMut(&str, &Map<String, Value>),
{
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return;
    };
    for (name, definition) in properties {
        let full_path = join_path(prefix, name);
        let Some(object) = definition.as_object() else {
            visit(&full_path, &Map::new());
            continue;
        };

        let reference = local_ref(object)
            .filter(|target| !active.iter().any(|seen| seen.as_str() == *target))
            .map(str::to_owned);
        let effective = match reference {
            Some(ref target) => with_target(root, target, object),
            None => Cow::Borrowed(object),
        };
        visit(&full_path, &effective);

        let pushed = reference.is_some();
        active.extend(reference);
        walk_definitions(root, &effective, &full_path, active, visit);
        if pushed {
            active.pop();
        }
    }
}

/// The definition's `$ref`, when it points into the same document
fn local_ref(definition: &Map<String, Value>) -> Option<&str> {
    definition
        .get("$ref")
        .and_then(Value::as_str)
        .filter(|reference| reference.starts_with('#'))
}

/// Overlay a definition's own keywords on the object its `$ref` points to
///
/// An unresolvable reference leaves the definition as written.
fn with_target<'a>(
    root: &Value,
    reference: &str,
    own: &'a Map<String, Value>,
) -> Cow<'a, Map<String, Value>> {
    let target = reference
        .strip_prefix('#')
        .and_then(|pointer| root.pointer(pointer))
        .and_then(Value::as_object);
    let Some(target) = target else {
        return Cow::Borrowed(own);
    };

    let mut merged = target.clone();
    for (key, value) in own {
        if key != "$ref" {
            merged.insert(key.clone(), value.clone());
        }
    }
    Cow::Owned(merged)
}

/// Find a `$ref` anywhere in the document that points outside of it
///
/// Only same-document fragment references (starting with `#`) are allowed;
/// anything else could make the evaluator fetch network or local files.
#[must_use]
pub fn find_external_ref(value: &Value) -> Option<&str> {
    match *value {
        Value::Object(ref object) => object.iter().find_map(|(key, child)| {
            if key == "$ref" {
                if let Some(reference) = child.as_str() {
                    if !reference.starts_with('#') {
                        return Some(reference);
                    }
                }
            }
            find_external_ref(child)
        }),
        Value::Array(ref items) => items.iter().find_map(find_external_ref),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ref_inside_array_is_found() {
        let schema = json!({"oneOf": [{"$ref": "http://example.com/a.json"}]});
        assert_eq!(find_external_ref(&schema), Some("http://example.com/a.json"));
    }

    #[test]
    fn relative_file_ref_is_external() {
        let schema = json!({"properties": {"x": {"$ref": "other.json#/x"}}});
        assert_eq!(find_external_ref(&schema), Some("other.json#/x"));
    }

    #[test]
    fn recursive_fragment_ref_stops_at_the_cycle() {
        let schema = Schema::from_value(json!({
            "definitions": {
                "node": {
                    "type": "object",
                    "properties": {"name": {"type": "string"}, "child": {"$ref": "#/definitions/node"}}
                }
            },
            "properties": {"tree": {"$ref": "#/definitions/node"}}
        }));
        let keys: Vec<String> = schema.keys().into_iter().collect();
        assert_eq!(keys, vec!["tree", "tree.child", "tree.name"]);
    }

    #[test]
    fn fragment_ref_is_allowed() {
        let schema = json!({"properties": {"x": {"$ref": "#/definitions/x"}}});
        assert_eq!(find_external_ref(&schema), None);
    }
}
